//! Progression toward the next tier

use serde::{Deserialize, Serialize};

use crate::config::TierConfig;
use crate::privileges::Privilege;
use crate::tier::Tier;

/// Where a company stands relative to the next tier.
///
/// `next_tier`, `months_until_next`, `unlocks` and `message` are all `None`
/// exactly when `current_tier` is the top tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    /// Tier currently held
    pub current_tier: Tier,

    /// Whole calendar months since enrollment
    pub elapsed_months: u32,

    /// Tier one rank above the current one
    pub next_tier: Option<Tier>,

    /// Months left before the next tier opens
    pub months_until_next: Option<u32>,

    /// First privilege the next tier adds, in declaration order
    pub unlocks: Option<Privilege>,

    /// Human-readable summary of the above
    pub message: Option<String>,
}

impl Progression {
    /// Check if the company has reached the top tier.
    pub fn is_complete(&self) -> bool {
        self.next_tier.is_none()
    }
}

impl TierConfig {
    /// Compute progression from a tier and elapsed months.
    ///
    /// # Examples
    ///
    /// ```
    /// use network_tiers::{Tier, TierConfig};
    ///
    /// let config = TierConfig::default();
    /// let progression = config.progression(Tier::Participant, 8);
    /// assert_eq!(progression.next_tier, Some(Tier::Contributor));
    /// assert_eq!(progression.months_until_next, Some(4));
    /// assert_eq!(
    ///     progression.message.as_deref(),
    ///     Some("You are 4 months away from Contributor! Unlock create_listings.")
    /// );
    /// ```
    pub fn progression(&self, tier: Tier, elapsed_months: u32) -> Progression {
        let Some(next_tier) = tier.next() else {
            return Progression {
                current_tier: tier,
                elapsed_months,
                next_tier: None,
                months_until_next: None,
                unlocks: None,
                message: None,
            };
        };

        let months_until_next = self
            .thresholds()
            .lower_bound(next_tier)
            .saturating_sub(elapsed_months);
        let unlocks = self
            .privileges_for(next_tier)
            .difference(self.privileges_for(tier))
            .next();

        Progression {
            current_tier: tier,
            elapsed_months,
            next_tier: Some(next_tier),
            months_until_next: Some(months_until_next),
            unlocks,
            message: Some(progress_message(months_until_next, next_tier, unlocks)),
        }
    }
}

fn progress_message(months: u32, next_tier: Tier, unlocks: Option<Privilege>) -> String {
    let unit = if months == 1 { "month" } else { "months" };
    match unlocks {
        Some(privilege) => {
            format!("You are {months} {unit} away from {next_tier}! Unlock {privilege}.")
        }
        None => format!("You are {months} {unit} away from {next_tier}!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_tier_has_no_progression() {
        let progression = TierConfig::default().progression(Tier::Champion, 61);
        assert!(progression.is_complete());
        assert_eq!(progression.months_until_next, None);
        assert_eq!(progression.unlocks, None);
        assert_eq!(progression.message, None);
    }

    #[test]
    fn test_explorer_from_zero() {
        let progression = TierConfig::default().progression(Tier::Explorer, 0);
        assert_eq!(progression.next_tier, Some(Tier::Participant));
        assert_eq!(progression.months_until_next, Some(3));
        assert_eq!(progression.unlocks, Some(Privilege::AttendEvents));
        assert_eq!(
            progression.message.as_deref(),
            Some("You are 3 months away from Participant! Unlock attend_events.")
        );
    }

    #[test]
    fn test_first_added_privilege_is_named() {
        let progression = TierConfig::default().progression(Tier::Contributor, 30);
        assert_eq!(progression.months_until_next, Some(6));
        assert_eq!(progression.unlocks, Some(Privilege::FeaturedBadge));
    }

    #[test]
    fn test_singular_month() {
        let progression = TierConfig::default().progression(Tier::Contributor, 35);
        assert_eq!(
            progression.message.as_deref(),
            Some("You are 1 month away from Champion! Unlock featured_badge.")
        );
    }

    #[test]
    fn test_months_until_next_never_negative() {
        // A stale tier paired with a larger month count clamps to zero.
        let progression = TierConfig::default().progression(Tier::Explorer, 20);
        assert_eq!(progression.months_until_next, Some(0));
    }
}
