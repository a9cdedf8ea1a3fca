//! Acting identity supplied by the session layer
//!
//! The access gate never looks anything up itself. Whoever authenticates the
//! request fills in an [`Identity`] from the user record and its company.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use network_tiers::{parse_enrollment_date, EnrollmentRecord};

/// The user performing an action, with the company facts the gate needs.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use network_access::Identity;
/// use uuid::Uuid;
///
/// let identity = Identity::member(Uuid::now_v7(), Uuid::now_v7())
///     .enrolled_on(NaiveDate::from_ymd_opt(2023, 1, 1))
///     .approved(true);
/// assert!(identity.is_approved);
/// assert!(!identity.is_admin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID
    pub user_id: Uuid,

    /// Company the user acts for, if any
    pub company_id: Option<Uuid>,

    /// Company enrollment date, if known
    pub enrolled_on: Option<NaiveDate>,

    /// Whether the company has been approved
    #[serde(default)]
    pub is_approved: bool,

    /// Network administrator
    #[serde(default)]
    pub is_admin: bool,
}

impl Identity {
    /// Identity of a user acting for `company_id`.
    ///
    /// Starts unapproved with no enrollment date.
    pub fn member(user_id: Uuid, company_id: Uuid) -> Self {
        Self {
            user_id,
            company_id: Some(company_id),
            enrolled_on: None,
            is_approved: false,
            is_admin: false,
        }
    }

    /// Identity of a network administrator.
    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            company_id: None,
            enrolled_on: None,
            is_approved: false,
            is_admin: true,
        }
    }

    /// Set the enrollment date.
    pub fn enrolled_on(mut self, date: Option<NaiveDate>) -> Self {
        self.enrolled_on = date;
        self
    }

    /// Set the enrollment date from its stored text form.
    ///
    /// Unparseable values leave the identity without an enrollment date.
    pub fn enrolled_on_raw(mut self, raw: Option<&str>) -> Self {
        self.enrolled_on = raw.and_then(parse_enrollment_date);
        self
    }

    /// Set the approval status.
    pub fn approved(mut self, is_approved: bool) -> Self {
        self.is_approved = is_approved;
        self
    }

    /// Check if the identity acts for `company_id`.
    pub fn owns(&self, company_id: Uuid) -> bool {
        self.company_id == Some(company_id)
    }

    /// Enrollment record for evaluation on `now`.
    pub fn enrollment(&self, now: NaiveDate) -> EnrollmentRecord {
        EnrollmentRecord::new(self.enrolled_on, now)
    }
}
