//! # Access Gate
//!
//! Decides whether an action may proceed. The gate evaluates only what it is
//! handed: the acting identity, the target's owner, the tier configuration and
//! the clock. It never fetches data and never caches a tier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use network_tiers::{Classification, Clock, Privilege, PrivilegeSet, Tier, TierConfig};

use crate::actions::DirectoryAction;
use crate::error::{AccessError, AccessResult};
use crate::identity::Identity;

/// Outcome of comparing a held tier against a required tier.
///
/// # Example
///
/// ```
/// use network_access::{authorize, AccessDecision};
/// use network_tiers::Tier;
///
/// assert!(authorize(Tier::Champion, Tier::Contributor).is_allowed());
/// assert_eq!(
///     authorize(Tier::Participant, Tier::Contributor),
///     AccessDecision::Denied { required_tier: Tier::Contributor }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    /// The held tier is high enough
    Allowed,

    /// The held tier is too low
    Denied {
        /// Lowest tier that would be allowed
        required_tier: Tier,
    },
}

impl AccessDecision {
    /// Check if the action may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }

    /// The missing tier, on denial.
    pub fn required_tier(&self) -> Option<Tier> {
        match self {
            AccessDecision::Allowed => None,
            AccessDecision::Denied { required_tier } => Some(*required_tier),
        }
    }
}

/// Compare a held tier against a required tier.
pub fn authorize(held: Tier, required: Tier) -> AccessDecision {
    if held >= required {
        AccessDecision::Allowed
    } else {
        AccessDecision::Denied {
            required_tier: required,
        }
    }
}

/// Check a held privilege set for a required privilege.
///
/// With a monotonic privilege table this agrees with [`authorize`] whenever
/// `required` is first granted at the required tier.
pub fn has_privilege(held: &PrivilegeSet, required: Privilege) -> bool {
    held.has(required)
}

/// Gate for directory actions.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use network_access::{AccessGate, DirectoryAction, Identity};
/// use network_tiers::{FixedClock, TierConfig};
/// use uuid::Uuid;
///
/// let config = TierConfig::default();
/// let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// let gate = AccessGate::new(&config, &clock);
///
/// let identity = Identity::member(Uuid::now_v7(), Uuid::now_v7())
///     .enrolled_on(NaiveDate::from_ymd_opt(2024, 1, 1))
///     .approved(true);
///
/// let err = gate.check(&identity, DirectoryAction::CreateListing, None).unwrap_err();
/// assert_eq!(err.status_code(), 403);
/// assert_eq!(err.required_tier(), Some(network_tiers::Tier::Contributor));
/// ```
pub struct AccessGate<'a> {
    config: &'a TierConfig,
    clock: &'a dyn Clock,
}

impl<'a> AccessGate<'a> {
    /// Create a gate over a loaded configuration and a clock.
    pub fn new(config: &'a TierConfig, clock: &'a dyn Clock) -> Self {
        Self { config, clock }
    }

    /// The lowest tier granting `privilege`, if any tier does.
    pub fn required_tier_for(&self, privilege: Privilege) -> Option<Tier> {
        self.config
            .privilege_table()
            .lowest_tier_granting(privilege)
    }

    /// Check whether `identity` may perform `action`.
    ///
    /// # Arguments
    ///
    /// * `identity` - The acting user and company facts
    /// * `action` - The attempted action
    /// * `owner` - Company owning the target resource, for actions on existing resources
    ///
    /// # Returns
    ///
    /// The freshly computed classification of the acting company on success.
    ///
    /// # Errors
    ///
    /// An [`AccessError`] naming the first unmet requirement, checked in order:
    /// administrator, company, approval, tier, ownership. Administrators skip
    /// all of them.
    pub fn check(
        &self,
        identity: &Identity,
        action: DirectoryAction,
        owner: Option<Uuid>,
    ) -> AccessResult<Classification> {
        let classification = self
            .config
            .classify(&identity.enrollment(self.clock.today()));

        if identity.is_admin {
            return Ok(classification);
        }

        if action.requires_admin() {
            debug!(
                user_id = %identity.user_id,
                action = %action,
                held = %classification.tier,
                "Denied: admin access required"
            );
            return Err(AccessError::NotAdmin(action));
        }

        let company_id = identity.company_id.ok_or(AccessError::NoCompany)?;

        if action.requires_approval() && !identity.is_approved {
            debug!(
                company_id = %company_id,
                action = %action,
                held = %classification.tier,
                "Denied: company not approved"
            );
            return Err(AccessError::NotApproved(action));
        }

        if let Some(privilege) = action.required_privilege() {
            self.check_privilege(company_id, action, classification.tier, privilege)?;
        }

        if action.requires_ownership() && owner != Some(company_id) {
            debug!(
                company_id = %company_id,
                action = %action,
                held = %classification.tier,
                owner = ?owner,
                "Denied: not the owner"
            );
            return Err(AccessError::NotOwner(action));
        }

        Ok(classification)
    }

    /// Current instant on the gate's clock.
    ///
    /// Records created after a successful check take their timestamps from
    /// here, so a pinned clock pins them too.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn check_privilege(
        &self,
        company_id: Uuid,
        action: DirectoryAction,
        held: Tier,
        privilege: Privilege,
    ) -> AccessResult<()> {
        if has_privilege(self.config.privileges_for(held), privilege) {
            return Ok(());
        }

        // A privilege no tier grants is reported against the top tier.
        let required = self.required_tier_for(privilege).unwrap_or(Tier::top());
        debug!(
            company_id = %company_id,
            action = %action,
            held = %held,
            required = %required,
            privilege = %privilege,
            "Denied: tier too low"
        );
        Err(AccessError::InsufficientTier {
            held,
            required,
            privilege,
        })
    }
}
