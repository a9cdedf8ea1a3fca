//! Privileges granted by loyalty tiers
//!
//! Each tier maps to an explicit, ordered list of privileges. The table is
//! monotonic: every tier holds all privileges of the tier below it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ConfigError, ConfigResult};
use crate::tier::Tier;

/// A named capability granted at or above some tier.
///
/// # Examples
///
/// ```
/// use network_tiers::Privilege;
///
/// assert_eq!(Privilege::CreateListings.as_str(), "create_listings");
/// assert_eq!(Privilege::parse("attend_events"), Some(Privilege::AttendEvents));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Privilege {
    /// Browse the directory and listings
    ViewNetwork,

    /// Register for network events
    AttendEvents,

    /// Publish and edit listings
    CreateListings,

    /// Show a featured badge on the company card
    FeaturedBadge,

    /// Appear first in promoted placements
    PriorityVisibility,
}

impl Privilege {
    /// Get the string representation of the privilege.
    pub fn as_str(&self) -> &'static str {
        match self {
            Privilege::ViewNetwork => "view_network",
            Privilege::AttendEvents => "attend_events",
            Privilege::CreateListings => "create_listings",
            Privilege::FeaturedBadge => "featured_badge",
            Privilege::PriorityVisibility => "priority_visibility",
        }
    }

    /// Parse privilege from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "view_network" => Some(Privilege::ViewNetwork),
            "attend_events" => Some(Privilege::AttendEvents),
            "create_listings" => Some(Privilege::CreateListings),
            "featured_badge" => Some(Privilege::FeaturedBadge),
            "priority_visibility" => Some(Privilege::PriorityVisibility),
            _ => None,
        }
    }

    /// Get all privileges.
    pub fn all() -> Vec<Self> {
        vec![
            Privilege::ViewNetwork,
            Privilege::AttendEvents,
            Privilege::CreateListings,
            Privilege::FeaturedBadge,
            Privilege::PriorityVisibility,
        ]
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered set of privileges.
///
/// Keeps declaration order so that "the first privilege a tier adds" is
/// well defined. Duplicates are dropped on insert.
///
/// # Example
///
/// ```
/// use network_tiers::{Privilege, PrivilegeSet};
///
/// let set = PrivilegeSet::from_iter([Privilege::ViewNetwork, Privilege::AttendEvents]);
/// assert!(set.has(Privilege::AttendEvents));
/// assert!(!set.has(Privilege::CreateListings));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Privilege>", into = "Vec<Privilege>")]
pub struct PrivilegeSet {
    privileges: Vec<Privilege>,
}

impl PrivilegeSet {
    /// Create a new empty privilege set.
    pub fn new() -> Self {
        Self {
            privileges: Vec::new(),
        }
    }

    /// Add a privilege, keeping the first position if already present.
    pub fn add(&mut self, privilege: Privilege) {
        if !self.privileges.contains(&privilege) {
            self.privileges.push(privilege);
        }
    }

    /// Check if the set grants a privilege.
    pub fn has(&self, privilege: Privilege) -> bool {
        self.privileges.contains(&privilege)
    }

    /// Check if this set contains every privilege of `other`.
    pub fn contains_all(&self, other: &PrivilegeSet) -> bool {
        other.iter().all(|p| self.has(p))
    }

    /// Privileges of this set that `other` lacks, in declaration order.
    pub fn difference<'a>(&'a self, other: &'a PrivilegeSet) -> impl Iterator<Item = Privilege> + 'a {
        self.iter().filter(move |p| !other.has(*p))
    }

    /// Iterate over the privileges in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Privilege> + '_ {
        self.privileges.iter().copied()
    }

    /// Privileges as a slice, in declaration order.
    pub fn as_slice(&self) -> &[Privilege] {
        &self.privileges
    }

    /// Get the count of privileges.
    pub fn len(&self) -> usize {
        self.privileges.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.privileges.is_empty()
    }
}

impl FromIterator<Privilege> for PrivilegeSet {
    fn from_iter<T: IntoIterator<Item = Privilege>>(iter: T) -> Self {
        let mut set = PrivilegeSet::new();
        for privilege in iter {
            set.add(privilege);
        }
        set
    }
}

impl From<Vec<Privilege>> for PrivilegeSet {
    fn from(privileges: Vec<Privilege>) -> Self {
        privileges.into_iter().collect()
    }
}

impl From<PrivilegeSet> for Vec<Privilege> {
    fn from(set: PrivilegeSet) -> Self {
        set.privileges
    }
}

/// Tier to privilege mapping.
///
/// Constructed only through [`PrivilegeTable::new`] (or deserialization, which
/// routes through it), so a table in hand is always complete and monotonic.
///
/// Serialized as a map from tier name to privilege list:
///
/// ```json
/// { "explorer": ["view_network"], "participant": ["view_network", "attend_events"], ... }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Tier, PrivilegeSet>",
    into = "BTreeMap<Tier, PrivilegeSet>"
)]
pub struct PrivilegeTable {
    sets: [PrivilegeSet; Tier::COUNT],
}

impl PrivilegeTable {
    /// Build and validate a privilege table.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingTier`] if any tier has no entry
    /// - [`ConfigError::EmptyTier`] if the lowest tier grants nothing
    /// - [`ConfigError::NonMonotonic`] if a tier drops a privilege of the tier below
    /// - [`ConfigError::NoExclusivePrivilege`] if the top tier adds nothing
    pub fn new(mut entries: BTreeMap<Tier, PrivilegeSet>) -> ConfigResult<Self> {
        let mut sets: [PrivilegeSet; Tier::COUNT] = Default::default();
        for tier in Tier::all() {
            sets[tier.rank()] = entries
                .remove(&tier)
                .ok_or(ConfigError::MissingTier(tier))?;
        }

        let table = Self { sets };
        table.validate()?;
        Ok(table)
    }

    /// Check the table invariants.
    pub fn validate(&self) -> ConfigResult<()> {
        let lowest = Tier::lowest();
        if self.get(lowest).is_empty() {
            return Err(ConfigError::EmptyTier(lowest));
        }

        for higher in Tier::all().into_iter().skip(1) {
            let Some(lower) = higher.previous() else {
                continue;
            };
            if let Some(privilege) = self.get(lower).difference(self.get(higher)).next() {
                return Err(ConfigError::NonMonotonic {
                    lower,
                    higher,
                    privilege,
                });
            }
        }

        let top = Tier::top();
        if let Some(below) = top.previous() {
            if self.get(top).difference(self.get(below)).next().is_none() {
                return Err(ConfigError::NoExclusivePrivilege(top));
            }
        }

        Ok(())
    }

    /// Privileges granted at `tier`.
    pub fn get(&self, tier: Tier) -> &PrivilegeSet {
        &self.sets[tier.rank()]
    }

    /// The lowest tier whose set grants `privilege`, if any does.
    pub fn lowest_tier_granting(&self, privilege: Privilege) -> Option<Tier> {
        Tier::all().into_iter().find(|tier| self.get(*tier).has(privilege))
    }
}

impl Default for PrivilegeTable {
    fn default() -> Self {
        let explorer = PrivilegeSet::from_iter([Privilege::ViewNetwork]);
        let participant = PrivilegeSet::from_iter([Privilege::ViewNetwork, Privilege::AttendEvents]);
        let contributor = PrivilegeSet::from_iter([
            Privilege::ViewNetwork,
            Privilege::AttendEvents,
            Privilege::CreateListings,
        ]);
        let champion = PrivilegeSet::from_iter([
            Privilege::ViewNetwork,
            Privilege::AttendEvents,
            Privilege::CreateListings,
            Privilege::FeaturedBadge,
            Privilege::PriorityVisibility,
        ]);

        Self {
            sets: [explorer, participant, contributor, champion],
        }
    }
}

impl TryFrom<BTreeMap<Tier, PrivilegeSet>> for PrivilegeTable {
    type Error = ConfigError;

    fn try_from(entries: BTreeMap<Tier, PrivilegeSet>) -> Result<Self, Self::Error> {
        PrivilegeTable::new(entries)
    }
}

impl From<PrivilegeTable> for BTreeMap<Tier, PrivilegeSet> {
    fn from(table: PrivilegeTable) -> Self {
        Tier::all().into_iter().zip(table.sets).collect()
    }
}
