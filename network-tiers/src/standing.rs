//! Full tier evaluation of one company

use serde::{Deserialize, Serialize};

use crate::classifier::EnrollmentRecord;
use crate::config::TierConfig;
use crate::privileges::PrivilegeSet;
use crate::progression::Progression;
use crate::tier::Tier;

/// Tier, privileges and progression derived from an enrollment.
///
/// A `Standing` is a derived value. Persisting one is fine for display, but
/// any authorization decision must recompute it from the enrollment date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Tier reached
    pub tier: Tier,

    /// Badge for the tier
    pub badge: String,

    /// Whole calendar months since enrollment
    pub elapsed_months: u32,

    /// Privileges granted at the tier
    pub privileges: PrivilegeSet,

    /// Progression toward the next tier
    pub progression: Progression,
}

impl TierConfig {
    /// Evaluate an enrollment end to end.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use network_tiers::{EnrollmentRecord, Privilege, Tier, TierConfig};
    ///
    /// let config = TierConfig::default();
    /// let record = EnrollmentRecord::new(
    ///     NaiveDate::from_ymd_opt(2023, 1, 10),
    ///     NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
    /// );
    /// let standing = config.standing(&record);
    /// assert_eq!(standing.tier, Tier::Contributor);
    /// assert!(standing.privileges.has(Privilege::CreateListings));
    /// assert_eq!(standing.progression.months_until_next, Some(23));
    /// ```
    pub fn standing(&self, record: &EnrollmentRecord) -> Standing {
        let classification = self.classify(record);
        Standing {
            tier: classification.tier,
            badge: classification.tier.badge().to_string(),
            elapsed_months: classification.elapsed_months,
            privileges: self.privileges_for(classification.tier).clone(),
            progression: self.progression(classification.tier, classification.elapsed_months),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_standing_without_enrollment() {
        let config = TierConfig::default();
        let record = EnrollmentRecord::new(None, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let standing = config.standing(&record);

        assert_eq!(standing.tier, Tier::Explorer);
        assert_eq!(standing.badge, "🌱");
        assert_eq!(standing.elapsed_months, 0);
        assert_eq!(standing.privileges.len(), 1);
        assert_eq!(standing.progression.next_tier, Some(Tier::Participant));
        assert_eq!(standing.progression.months_until_next, Some(3));
    }

    #[test]
    fn test_standing_serializes_privileges_as_names() {
        let config = TierConfig::default();
        let record = EnrollmentRecord::new(
            NaiveDate::from_ymd_opt(2020, 1, 1),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        let json = serde_json::to_value(config.standing(&record)).unwrap();
        assert_eq!(json["tier"], "champion");
        assert_eq!(json["privileges"][3], "featured_badge");
        assert!(json["progression"]["next_tier"].is_null());
    }
}
