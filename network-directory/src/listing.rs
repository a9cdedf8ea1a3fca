//! Listing domain models
//!
//! Listings are the resources, events, sessions and collaboration offers a
//! company publishes to the network. Publishing and editing pass through the
//! access gate; the feed shows each listing with its company's current tier.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::info;
use uuid::Uuid;

use network_access::{AccessError, AccessGate, AccessResult, DirectoryAction, Identity};
use network_tiers::{Tier, TierConfig};

use crate::company::Company;

/// Kind of listing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ListingCategory {
    /// Shared document, tool or dataset
    #[default]
    Resource,

    /// Event open to network members
    Event,

    /// Training or knowledge-sharing session
    Session,

    /// Call for partners on a joint effort
    Collaboration,
}

impl ListingCategory {
    /// Parse category from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "resource" => Some(ListingCategory::Resource),
            "event" => Some(ListingCategory::Event),
            "session" => Some(ListingCategory::Session),
            "collaboration" => Some(ListingCategory::Collaboration),
            _ => None,
        }
    }

    /// Get string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingCategory::Resource => "resource",
            ListingCategory::Event => "event",
            ListingCategory::Session => "session",
            ListingCategory::Collaboration => "collaboration",
        }
    }
}

impl fmt::Display for ListingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listing published by a company.
///
/// Listings are only created through [`publish`], which requires the acting
/// company to hold the `create_listings` privilege at publication time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier for the listing
    pub id: Uuid,

    /// Company that published the listing
    pub company_id: Uuid,

    /// Title shown in the feed
    pub title: String,

    /// Body text
    pub description: String,

    /// Kind of listing
    pub category: ListingCategory,

    /// When the listing was published
    pub created_at: DateTime<Utc>,

    /// When the listing was last edited
    pub updated_at: DateTime<Utc>,

    /// Custom metadata for extensibility
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Input for a new listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingDraft {
    /// Title
    pub title: String,

    /// Body text
    pub description: String,

    /// Kind of listing
    #[serde(default)]
    pub category: ListingCategory,
}

impl ListingDraft {
    /// Create a draft.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: ListingCategory,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category,
        }
    }
}

/// Partial edit of a listing.
///
/// `None` and blank strings leave the corresponding field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingUpdate {
    /// New title
    pub title: Option<String>,

    /// New body text
    pub description: Option<String>,

    /// New category
    pub category: Option<ListingCategory>,
}

/// Publish a listing on behalf of `identity`'s company.
///
/// The tier is computed from the identity's enrollment date on the gate's
/// clock at the moment of the call, and the listing is stamped with that
/// clock's current instant.
///
/// # Errors
///
/// [`AccessError::NoCompany`] when the identity acts for no company (including
/// administrators, who have nothing to publish under), otherwise any denial
/// from the gate.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use network_access::{AccessGate, Identity};
/// use network_directory::{publish, ListingCategory, ListingDraft};
/// use network_tiers::{FixedClock, TierConfig};
/// use uuid::Uuid;
///
/// let config = TierConfig::default();
/// let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
/// let gate = AccessGate::new(&config, &clock);
///
/// let identity = Identity::member(Uuid::now_v7(), Uuid::now_v7())
///     .enrolled_on(NaiveDate::from_ymd_opt(2023, 1, 1))
///     .approved(true);
///
/// let draft = ListingDraft::new("Shared lab time", "Two days a month", ListingCategory::Resource);
/// let listing = publish(&gate, &identity, draft).unwrap();
/// assert_eq!(Some(listing.company_id), identity.company_id);
/// ```
pub fn publish(
    gate: &AccessGate<'_>,
    identity: &Identity,
    draft: ListingDraft,
) -> AccessResult<Listing> {
    let company_id = identity.company_id.ok_or(AccessError::NoCompany)?;
    let classification = gate.check(identity, DirectoryAction::CreateListing, None)?;

    let now = gate.now();
    let listing = Listing {
        id: Uuid::now_v7(),
        company_id,
        title: draft.title,
        description: draft.description,
        category: draft.category,
        created_at: now,
        updated_at: now,
        metadata: HashMap::new(),
    };

    info!(
        listing_id = %listing.id,
        company_id = %company_id,
        tier = %classification.tier,
        category = %listing.category,
        "Listing published"
    );
    Ok(listing)
}

impl Listing {
    /// Apply a partial edit on behalf of `identity`.
    ///
    /// # Errors
    ///
    /// Any denial from the gate; the listing is left untouched.
    pub fn apply_update(
        &mut self,
        gate: &AccessGate<'_>,
        identity: &Identity,
        update: ListingUpdate,
    ) -> AccessResult<()> {
        gate.check(identity, DirectoryAction::UpdateListing, Some(self.company_id))?;

        if let Some(title) = update.title.filter(|t| !t.trim().is_empty()) {
            self.title = title;
        }
        if let Some(description) = update.description.filter(|d| !d.trim().is_empty()) {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        self.updated_at = gate.now();
        Ok(())
    }

    /// Check that `identity` may delete this listing.
    ///
    /// Removal itself belongs to the persistence layer.
    pub fn authorize_removal(&self, gate: &AccessGate<'_>, identity: &Identity) -> AccessResult<()> {
        gate.check(identity, DirectoryAction::DeleteListing, Some(self.company_id))?;
        info!(listing_id = %self.id, user_id = %identity.user_id, "Listing removal authorized");
        Ok(())
    }
}

/// A listing joined with its publisher for the feed.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView<'a> {
    /// The listing
    #[serde(flatten)]
    pub listing: &'a Listing,

    /// Publishing company's name
    pub company_name: &'a str,

    /// Publishing company's tier at feed time
    pub company_tier: Tier,

    /// Badge of `company_tier`
    pub company_badge: &'static str,
}

/// Build the listing feed.
///
/// Listings whose company is missing from `companies` are skipped. The
/// result is ordered newest first, then by id.
pub fn listing_feed<'a>(
    listings: &'a [Listing],
    companies: &'a [Company],
    category: Option<ListingCategory>,
    config: &TierConfig,
    now: NaiveDate,
) -> Vec<ListingView<'a>> {
    let by_id: HashMap<Uuid, &Company> = companies.iter().map(|c| (c.id, c)).collect();

    let mut feed: Vec<ListingView<'a>> = listings
        .iter()
        .filter(|listing| category.map_or(true, |c| listing.category == c))
        .filter_map(|listing| {
            let company = by_id.get(&listing.company_id)?;
            let tier = config.classify(&company.enrollment(now)).tier;
            Some(ListingView {
                listing,
                company_name: &company.name,
                company_tier: tier,
                company_badge: tier.badge(),
            })
        })
        .collect();

    feed.sort_by(|a, b| {
        b.listing
            .created_at
            .cmp(&a.listing.created_at)
            .then_with(|| a.listing.id.cmp(&b.listing.id))
    });
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Months};
    use network_tiers::{Clock, FixedClock, Privilege};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn member(company_id: Uuid, months: u32) -> Identity {
        Identity::member(Uuid::now_v7(), company_id)
            .enrolled_on(Some(today() - Months::new(months)))
            .approved(true)
    }

    fn draft() -> ListingDraft {
        ListingDraft::new("Robotics meetup", "Monthly meetup", ListingCategory::Event)
    }

    #[test]
    fn test_publish_as_contributor() {
        let config = TierConfig::default();
        let clock = FixedClock(today());
        let gate = AccessGate::new(&config, &clock);

        let company_id = Uuid::now_v7();
        let listing = publish(&gate, &member(company_id, 12), draft()).unwrap();
        assert_eq!(listing.company_id, company_id);
        assert_eq!(listing.category, ListingCategory::Event);
        assert_eq!(listing.created_at, clock.now());
        assert_eq!(listing.updated_at, listing.created_at);
    }

    #[test]
    fn test_feed_order_follows_gate_clock() {
        let config = TierConfig::default();
        let company = Company::new("Acme").with_enrollment_date(today() - Months::new(20));
        let identity = member(company.id, 20);

        let later = FixedClock(today());
        let earlier = FixedClock(today() - Duration::days(3));

        // Published first in wall time, but stamped later by its clock.
        let newest = publish(&AccessGate::new(&config, &later), &identity, draft()).unwrap();
        let oldest = publish(&AccessGate::new(&config, &earlier), &identity, draft()).unwrap();
        assert!(oldest.created_at < newest.created_at);

        let listings = vec![oldest.clone(), newest.clone()];
        let companies = vec![company];
        let feed = listing_feed(&listings, &companies, None, &config, today());
        let ids: Vec<Uuid> = feed.iter().map(|v| v.listing.id).collect();
        assert_eq!(ids, [newest.id, oldest.id]);
    }

    #[test]
    fn test_publish_as_participant_names_required_tier() {
        let config = TierConfig::default();
        let clock = FixedClock(today());
        let gate = AccessGate::new(&config, &clock);

        let err = publish(&gate, &member(Uuid::now_v7(), 8), draft()).unwrap_err();
        assert_eq!(
            err,
            AccessError::InsufficientTier {
                held: Tier::Participant,
                required: Tier::Contributor,
                privilege: Privilege::CreateListings,
            }
        );
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_admin_cannot_publish_without_company() {
        let config = TierConfig::default();
        let clock = FixedClock(today());
        let gate = AccessGate::new(&config, &clock);

        let admin = Identity::admin(Uuid::now_v7());
        assert_eq!(
            publish(&gate, &admin, draft()).unwrap_err(),
            AccessError::NoCompany
        );
    }

    #[test]
    fn test_update_requires_ownership() {
        let config = TierConfig::default();
        let clock = FixedClock(today());
        let gate = AccessGate::new(&config, &clock);

        let owner = member(Uuid::now_v7(), 20);
        let mut listing = publish(&gate, &owner, draft()).unwrap();

        let other = member(Uuid::now_v7(), 40);
        let update = ListingUpdate {
            title: Some("Taken over".to_string()),
            ..Default::default()
        };
        assert_eq!(
            listing.apply_update(&gate, &other, update.clone()),
            Err(AccessError::NotOwner(DirectoryAction::UpdateListing))
        );
        assert_eq!(listing.title, "Robotics meetup");

        listing.apply_update(&gate, &owner, update).unwrap();
        assert_eq!(listing.title, "Taken over");
    }

    #[test]
    fn test_owner_can_remove_after_tier_changes() {
        let config = TierConfig::default();
        let contributor = member(Uuid::now_v7(), 20);
        let clock = FixedClock(today());
        let gate = AccessGate::new(&config, &clock);
        let listing = publish(&gate, &contributor, draft()).unwrap();

        // Enrollment corrected to a recent date: the company drops to Explorer.
        let corrected = contributor.enrolled_on(Some(today()));
        assert!(listing.authorize_removal(&gate, &corrected).is_ok());
        assert!(listing
            .authorize_removal(&gate, &member(Uuid::now_v7(), 40))
            .is_err());
    }

    #[test]
    fn test_feed_joins_filters_and_orders() {
        let config = TierConfig::default();
        let now = today();

        let veteran = Company::new("Veteran").with_enrollment_date(now - Months::new(40));
        let newcomer = Company::new("Newcomer").with_enrollment_date(now - Months::new(2));
        let base = Utc::now();

        let listing = |company: &Company, category: ListingCategory, age_days: i64| Listing {
            id: Uuid::now_v7(),
            company_id: company.id,
            title: format!("{} {}", company.name, category),
            description: String::new(),
            category,
            created_at: base - Duration::days(age_days),
            updated_at: base,
            metadata: HashMap::new(),
        };

        let listings = vec![
            listing(&veteran, ListingCategory::Event, 3),
            listing(&newcomer, ListingCategory::Resource, 1),
            listing(&veteran, ListingCategory::Resource, 2),
            Listing {
                company_id: Uuid::now_v7(),
                ..listing(&veteran, ListingCategory::Event, 0)
            },
        ];
        let companies = vec![veteran, newcomer];

        let feed = listing_feed(&listings, &companies, None, &config, now);
        let titles: Vec<&str> = feed.iter().map(|v| v.listing.title.as_str()).collect();
        assert_eq!(titles, ["Newcomer resource", "Veteran resource", "Veteran event"]);
        assert_eq!(feed[0].company_tier, Tier::Explorer);
        assert_eq!(feed[1].company_tier, Tier::Champion);
        assert_eq!(feed[1].company_badge, Tier::Champion.badge());

        let events = listing_feed(
            &listings,
            &companies,
            Some(ListingCategory::Event),
            &config,
            now,
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].company_name, "Veteran");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(ListingCategory::parse("Event"), Some(ListingCategory::Event));
        assert_eq!(ListingCategory::parse("webinar"), None);
        assert_eq!(ListingCategory::Collaboration.to_string(), "collaboration");
    }
}
