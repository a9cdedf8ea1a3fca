//! Company domain models
//!
//! This module provides the Company entity: a member of the network that
//! registers, waits for approval, and accrues loyalty from its enrollment date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::info;
use uuid::Uuid;

use network_access::{AccessGate, AccessResult, DirectoryAction, Identity};
use network_tiers::{EnrollmentRecord, Tier, TierConfig};

/// Headcount bracket of a company.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    /// Early-stage startup
    Startup,

    /// Small business
    Small,

    /// Medium-sized business
    Medium,

    /// Large enterprise
    Large,
}

impl CompanySize {
    /// Parse size from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "startup" => Some(CompanySize::Startup),
            "small" => Some(CompanySize::Small),
            "medium" => Some(CompanySize::Medium),
            "large" => Some(CompanySize::Large),
            _ => None,
        }
    }

    /// Get string representation of the size.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::Startup => "startup",
            CompanySize::Small => "small",
            CompanySize::Medium => "medium",
            CompanySize::Large => "large",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A company enrolled (or applying to enroll) in the network.
///
/// # Lifecycle
///
/// ```text
/// Company::new ─→ pending (unapproved, no enrollment date)
///               └─ approve(gate, admin, date) ─→ approved, enrolled_on set
/// ```
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use network_access::{AccessGate, Identity};
/// use network_directory::Company;
/// use network_tiers::{FixedClock, TierConfig};
/// use uuid::Uuid;
///
/// let config = TierConfig::default();
/// let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// let gate = AccessGate::new(&config, &clock);
///
/// let mut company = Company::new("Northwind Robotics");
/// assert!(!company.is_approved);
///
/// let admin = Identity::admin(Uuid::now_v7());
/// company.approve(&gate, &admin, clock.0).unwrap();
/// assert!(company.is_approved);
/// assert!(company.enrolled_on.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier for the company
    pub id: Uuid,

    /// Company name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Industry, free text (e.g. "Manufacturing")
    pub industry: Option<String>,

    /// Headcount bracket
    pub size: Option<CompanySize>,

    /// Primary website URL
    pub website: Option<String>,

    /// Logo URL for directory cards
    pub logo_url: Option<String>,

    /// Date the company's membership started
    pub enrolled_on: Option<NaiveDate>,

    /// Whether an administrator has approved the company
    pub is_approved: bool,

    /// Last tier label written alongside the record.
    ///
    /// Denormalized for display only and may be stale. Never use it for an
    /// access decision; classify `enrolled_on` instead.
    #[serde(default)]
    pub cached_tier: Option<Tier>,

    /// When the company registered
    pub created_at: DateTime<Utc>,

    /// When the company was last updated
    pub updated_at: DateTime<Utc>,

    /// Custom metadata for extensibility
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Company {
    /// Creates a new, unapproved company.
    ///
    /// The company is created with:
    /// - A newly generated UUID v7 ID
    /// - No enrollment date
    /// - Current timestamp for created_at and updated_at
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            description: None,
            industry: None,
            size: None,
            website: None,
            logo_url: None,
            enrolled_on: None,
            is_approved: false,
            cached_tier: None,
            created_at: now,
            updated_at: now,
            metadata: HashMap::new(),
        }
    }

    /// Set the industry.
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Set the size bracket.
    pub fn with_size(mut self, size: CompanySize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the enrollment date while building a record, e.g. from storage.
    ///
    /// Changing the date of an existing company goes through
    /// [`Company::set_enrollment_date`].
    pub fn with_enrollment_date(mut self, enrolled_on: NaiveDate) -> Self {
        self.enrolled_on = Some(enrolled_on);
        self
    }

    /// Approve the company on behalf of an administrator.
    ///
    /// Membership starts on `enrolled_on` unless a start date was already
    /// recorded, which is kept.
    ///
    /// # Errors
    ///
    /// [`AccessError::NotAdmin`](network_access::AccessError::NotAdmin) for
    /// anyone but an administrator; the company is left untouched.
    pub fn approve(
        &mut self,
        gate: &AccessGate<'_>,
        identity: &Identity,
        enrolled_on: NaiveDate,
    ) -> AccessResult<()> {
        gate.check(identity, DirectoryAction::ApproveCompany, Some(self.id))?;
        self.is_approved = true;
        if self.enrolled_on.is_none() {
            self.enrolled_on = Some(enrolled_on);
        }
        self.updated_at = gate.now();
        info!(
            company_id = %self.id,
            admin_id = %identity.user_id,
            enrolled_on = ?self.enrolled_on,
            "Company approved"
        );
        Ok(())
    }

    /// Correct the membership start date on behalf of an administrator.
    ///
    /// The tier of every later evaluation follows the new date.
    ///
    /// # Errors
    ///
    /// [`AccessError::NotAdmin`](network_access::AccessError::NotAdmin) for
    /// anyone but an administrator; the date is left untouched.
    pub fn set_enrollment_date(
        &mut self,
        gate: &AccessGate<'_>,
        identity: &Identity,
        enrolled_on: NaiveDate,
    ) -> AccessResult<()> {
        gate.check(identity, DirectoryAction::ManageEnrollment, Some(self.id))?;
        let previous = self.enrolled_on.replace(enrolled_on);
        self.updated_at = gate.now();
        info!(
            company_id = %self.id,
            admin_id = %identity.user_id,
            previous = ?previous,
            enrolled_on = %enrolled_on,
            "Enrollment date changed"
        );
        Ok(())
    }

    /// Enrollment record for evaluation on `now`.
    pub fn enrollment(&self, now: NaiveDate) -> EnrollmentRecord {
        EnrollmentRecord::new(self.enrolled_on, now)
    }

    /// Recompute the denormalized tier label.
    pub fn refresh_cached_tier(&mut self, config: &TierConfig, now: NaiveDate) -> Tier {
        let tier = config.classify(&self.enrollment(now)).tier;
        self.cached_tier = Some(tier);
        tier
    }

    /// Apply a partial profile update on behalf of `identity`.
    ///
    /// # Errors
    ///
    /// Any denial from the gate; the company is left untouched.
    pub fn update_profile(
        &mut self,
        gate: &AccessGate<'_>,
        identity: &Identity,
        update: CompanyUpdate,
    ) -> AccessResult<()> {
        gate.check(identity, DirectoryAction::ManageCompany, Some(self.id))?;
        update.apply_to(self);
        self.updated_at = gate.now();
        Ok(())
    }
}

/// Partial update of a company profile.
///
/// `None` and blank strings leave the corresponding field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyUpdate {
    /// New name
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New industry
    pub industry: Option<String>,

    /// New size bracket
    pub size: Option<CompanySize>,

    /// New website
    pub website: Option<String>,
}

impl CompanyUpdate {
    fn apply_to(self, company: &mut Company) {
        if let Some(name) = non_blank(self.name) {
            company.name = name;
        }
        if let Some(description) = non_blank(self.description) {
            company.description = Some(description);
        }
        if let Some(industry) = non_blank(self.industry) {
            company.industry = Some(industry);
        }
        if let Some(size) = self.size {
            company.size = Some(size);
        }
        if let Some(website) = non_blank(self.website) {
            company.website = Some(website);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Companies awaiting approval, oldest registration first.
///
/// # Errors
///
/// [`AccessError::NotAdmin`](network_access::AccessError::NotAdmin) for
/// anyone but an administrator.
pub fn pending<'a>(
    gate: &AccessGate<'_>,
    identity: &Identity,
    companies: &'a [Company],
) -> AccessResult<Vec<&'a Company>> {
    gate.check(identity, DirectoryAction::ApproveCompany, None)?;
    let mut pending: Vec<&Company> = companies.iter().filter(|c| !c.is_approved).collect();
    pending.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    Ok(pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use network_access::AccessError;
    use network_tiers::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_company_creation() {
        let company = Company::new("Acme Corp");
        assert_eq!(company.name, "Acme Corp");
        assert!(!company.is_approved);
        assert!(company.enrolled_on.is_none());
        assert!(company.cached_tier.is_none());
    }

    fn admin() -> Identity {
        Identity::admin(Uuid::now_v7())
    }

    #[test]
    fn test_approve_keeps_existing_enrollment_date() {
        let config = TierConfig::default();
        let clock = FixedClock(date(2024, 1, 1));
        let gate = AccessGate::new(&config, &clock);

        let mut company = Company::new("Acme").with_enrollment_date(date(2020, 1, 1));
        company.approve(&gate, &admin(), date(2024, 1, 1)).unwrap();
        assert!(company.is_approved);
        assert_eq!(company.enrolled_on, Some(date(2020, 1, 1)));
        assert_eq!(company.updated_at, clock.0.and_hms_opt(0, 0, 0).unwrap().and_utc());
    }

    #[test]
    fn test_member_cannot_approve_own_company() {
        let config = TierConfig::default();
        let clock = FixedClock(date(2024, 1, 1));
        let gate = AccessGate::new(&config, &clock);

        let mut company = Company::new("Acme");
        let owner = Identity::member(Uuid::now_v7(), company.id);
        assert_eq!(
            company.approve(&gate, &owner, date(2024, 1, 1)),
            Err(AccessError::NotAdmin(DirectoryAction::ApproveCompany))
        );
        assert!(!company.is_approved);
        assert!(company.enrolled_on.is_none());
    }

    #[test]
    fn test_set_enrollment_date_by_admin() {
        let config = TierConfig::default();
        let clock = FixedClock(date(2024, 1, 1));
        let gate = AccessGate::new(&config, &clock);

        let mut company = Company::new("Acme");
        company
            .set_enrollment_date(&gate, &admin(), date(2022, 5, 5))
            .unwrap();
        assert_eq!(company.enrolled_on, Some(date(2022, 5, 5)));
    }

    #[test]
    fn test_member_cannot_backdate_enrollment() {
        let config = TierConfig::default();
        let clock = FixedClock(date(2024, 6, 15));
        let gate = AccessGate::new(&config, &clock);

        let mut company = Company::new("Acme").with_enrollment_date(date(2024, 5, 1));
        let owner = Identity::member(Uuid::now_v7(), company.id)
            .enrolled_on(company.enrolled_on)
            .approved(true);

        let err = company
            .set_enrollment_date(&gate, &owner, date(2020, 1, 1))
            .unwrap_err();
        assert_eq!(err, AccessError::NotAdmin(DirectoryAction::ManageEnrollment));
        assert_eq!(err.status_code(), 403);
        assert_eq!(company.enrolled_on, Some(date(2024, 5, 1)));
        assert_eq!(
            company.refresh_cached_tier(&config, clock.0),
            Tier::Explorer
        );
    }

    #[test]
    fn test_refresh_cached_tier() {
        let config = TierConfig::default();
        let mut company = Company::new("Acme").with_enrollment_date(date(2021, 1, 1));
        company.cached_tier = Some(Tier::Explorer);

        let tier = company.refresh_cached_tier(&config, date(2024, 1, 1));
        assert_eq!(tier, Tier::Champion);
        assert_eq!(company.cached_tier, Some(Tier::Champion));
    }

    #[test]
    fn test_size_parsing() {
        assert_eq!(CompanySize::parse("Startup"), Some(CompanySize::Startup));
        assert_eq!(CompanySize::parse("large"), Some(CompanySize::Large));
        assert_eq!(CompanySize::parse("huge"), None);
    }

    #[test]
    fn test_update_profile_by_owner() {
        let config = TierConfig::default();
        let clock = FixedClock(date(2024, 1, 1));
        let gate = AccessGate::new(&config, &clock);

        let mut company = Company::new("Acme").with_industry("Retail");
        let identity = Identity::member(Uuid::now_v7(), company.id);

        company
            .update_profile(
                &gate,
                &identity,
                CompanyUpdate {
                    name: Some("Acme Holdings".to_string()),
                    industry: Some("   ".to_string()),
                    size: Some(CompanySize::Medium),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(company.name, "Acme Holdings");
        assert_eq!(company.industry.as_deref(), Some("Retail"));
        assert_eq!(company.size, Some(CompanySize::Medium));
    }

    #[test]
    fn test_update_profile_by_stranger_is_denied() {
        let config = TierConfig::default();
        let clock = FixedClock(date(2024, 1, 1));
        let gate = AccessGate::new(&config, &clock);

        let mut company = Company::new("Acme");
        let stranger = Identity::member(Uuid::now_v7(), Uuid::now_v7());

        let err = company
            .update_profile(
                &gate,
                &stranger,
                CompanyUpdate {
                    name: Some("Hijacked".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err, AccessError::NotOwner(DirectoryAction::ManageCompany));
        assert_eq!(company.name, "Acme");
    }

    #[test]
    fn test_pending_lists_unapproved_only() {
        let config = TierConfig::default();
        let clock = FixedClock(date(2024, 1, 1));
        let gate = AccessGate::new(&config, &clock);

        let mut approved = Company::new("Approved");
        approved.approve(&gate, &admin(), date(2024, 1, 1)).unwrap();
        let waiting = Company::new("Waiting");
        let companies = vec![approved, waiting];

        let list = pending(&gate, &admin(), &companies).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Waiting");
    }

    #[test]
    fn test_pending_is_admin_only() {
        let config = TierConfig::default();
        let clock = FixedClock(date(2024, 1, 1));
        let gate = AccessGate::new(&config, &clock);

        let companies = vec![Company::new("Waiting")];
        let member = Identity::member(Uuid::now_v7(), Uuid::now_v7()).approved(true);
        assert_eq!(
            pending(&gate, &member, &companies).unwrap_err(),
            AccessError::NotAdmin(DirectoryAction::ApproveCompany)
        );
    }
}
