//! Loyalty tiers
//!
//! This module defines the closed, ordered set of loyalty tiers a company moves
//! through as its enrollment ages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Loyalty tier of an enrolled company.
///
/// Tiers are strictly ordered; comparisons such as "at least Contributor"
/// use the derived `Ord`.
///
/// # Tier Hierarchy
///
/// - **Explorer**: Newly enrolled, can browse the network
/// - **Participant**: Can attend network events
/// - **Contributor**: Can publish listings
/// - **Champion**: Featured across the directory
///
/// # Examples
///
/// ```
/// use network_tiers::Tier;
///
/// assert!(Tier::Contributor > Tier::Participant);
/// assert_eq!(Tier::Explorer.next(), Some(Tier::Participant));
/// assert_eq!(Tier::Champion.next(), None);
/// ```
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Lowest tier, assigned on enrollment
    #[default]
    Explorer = 0,

    /// Second tier
    Participant = 1,

    /// Third tier
    Contributor = 2,

    /// Top tier
    Champion = 3,
}

impl Tier {
    /// Number of tiers.
    pub const COUNT: usize = 4;

    /// All tiers, lowest first.
    pub const fn all() -> [Tier; Tier::COUNT] {
        [
            Tier::Explorer,
            Tier::Participant,
            Tier::Contributor,
            Tier::Champion,
        ]
    }

    /// The lowest tier.
    pub const fn lowest() -> Tier {
        Tier::Explorer
    }

    /// The top tier.
    pub const fn top() -> Tier {
        Tier::Champion
    }

    /// Zero-based position in the hierarchy.
    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Look up a tier by its rank.
    ///
    /// # Returns
    ///
    /// `None` if `rank` is outside the hierarchy
    pub fn from_rank(rank: usize) -> Option<Self> {
        Tier::all().get(rank).copied()
    }

    /// The tier one rank above this one, or `None` at the top.
    pub fn next(self) -> Option<Self> {
        Tier::from_rank(self.rank() + 1)
    }

    /// The tier one rank below this one, or `None` at the bottom.
    pub fn previous(self) -> Option<Self> {
        self.rank().checked_sub(1).and_then(Tier::from_rank)
    }

    /// Check if this is the top tier.
    pub fn is_top(self) -> bool {
        self == Tier::top()
    }

    /// Parse tier from string representation.
    ///
    /// Matching is case-insensitive. Labels from the older metal-named scheme
    /// map onto the tier at the same rank.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse
    ///
    /// # Returns
    ///
    /// `Some(Tier)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use network_tiers::Tier;
    ///
    /// assert_eq!(Tier::parse("Contributor"), Some(Tier::Contributor));
    /// assert_eq!(Tier::parse("gold"), Some(Tier::Contributor));
    /// assert_eq!(Tier::parse("diamond"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "explorer" | "bronze" => Some(Tier::Explorer),
            "participant" | "silver" => Some(Tier::Participant),
            "contributor" | "gold" => Some(Tier::Contributor),
            "champion" | "platinum" => Some(Tier::Champion),
            _ => None,
        }
    }

    /// Get string representation of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Explorer => "explorer",
            Tier::Participant => "participant",
            Tier::Contributor => "contributor",
            Tier::Champion => "champion",
        }
    }

    /// Get a human-readable display name for the tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Explorer => "Explorer",
            Tier::Participant => "Participant",
            Tier::Contributor => "Contributor",
            Tier::Champion => "Champion",
        }
    }

    /// Badge shown next to a company carrying this tier.
    pub fn badge(&self) -> &'static str {
        match self {
            Tier::Explorer => "🌱",
            Tier::Participant => "🔵",
            Tier::Contributor => "🟢",
            Tier::Champion => "⭐",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
