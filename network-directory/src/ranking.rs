//! # Directory Ranker
//!
//! Filters and orders directory entries. Tiers are recomputed for every entry
//! on every call; cached labels are never consulted.
//!
//! Every sort key ends in a chain of tie-breakers that reaches the entry id,
//! so the output order depends only on the entries, never on their input order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;
use uuid::Uuid;

use network_tiers::{Classification, Tier, TierConfig};

use crate::company::{Company, CompanySize};

/// Fields the ranker reads from a directory entry.
///
/// Implemented for [`Company`]; other record types can implement it to be
/// ranked without conversion.
pub trait DirectoryEntry {
    /// Stable unique identifier, used as the final tie-breaker
    fn entry_id(&self) -> Uuid;

    /// Display name
    fn entry_name(&self) -> &str;

    /// Membership start date
    fn enrolled_on(&self) -> Option<NaiveDate>;

    /// Industry, if recorded
    fn industry(&self) -> Option<&str>;

    /// Size bracket, if recorded
    fn size(&self) -> Option<CompanySize>;

    /// Whether the entry should appear in the public directory
    fn is_listed(&self) -> bool {
        true
    }
}

impl DirectoryEntry for Company {
    fn entry_id(&self) -> Uuid {
        self.id
    }

    fn entry_name(&self) -> &str {
        &self.name
    }

    fn enrolled_on(&self) -> Option<NaiveDate> {
        self.enrolled_on
    }

    fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }

    fn size(&self) -> Option<CompanySize> {
        self.size
    }

    fn is_listed(&self) -> bool {
        self.is_approved
    }
}

/// Directory sort order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Case-insensitive name, A to Z
    #[default]
    Name,

    /// Longest enrolled first
    Duration,

    /// Highest tier first, then longest enrolled, then name
    Tier,
}

impl SortKey {
    /// Parse a sort key from a query parameter.
    ///
    /// `loyalty` is accepted as an alias of `tier`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "duration" => Some(SortKey::Duration),
            "tier" | "loyalty" | "level" => Some(SortKey::Tier),
            _ => None,
        }
    }
}

/// Filters applied before sorting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryFilter {
    /// Only entries in this industry (case-insensitive)
    #[serde(default)]
    pub industry: Option<String>,

    /// Only entries of this size
    #[serde(default)]
    pub size: Option<CompanySize>,

    /// Include entries that are not publicly listed (e.g. unapproved)
    #[serde(default)]
    pub include_unlisted: bool,
}

impl DirectoryFilter {
    /// Check if an entry passes the filter.
    pub fn matches<E: DirectoryEntry + ?Sized>(&self, entry: &E) -> bool {
        if !self.include_unlisted && !entry.is_listed() {
            return false;
        }
        if let Some(industry) = &self.industry {
            let wanted = industry.trim();
            match entry.industry() {
                Some(actual) if actual.trim().eq_ignore_ascii_case(wanted) => {}
                _ => return false,
            }
        }
        if let Some(size) = self.size {
            if entry.size() != Some(size) {
                return false;
            }
        }
        true
    }
}

/// An entry with its freshly computed classification.
#[derive(Debug, Clone)]
pub struct RankedEntry<'a, E> {
    /// The ranked entry
    pub entry: &'a E,

    /// Tier and elapsed months at ranking time
    pub classification: Classification,

    name_key: String,
}

impl<'a, E: DirectoryEntry> RankedEntry<'a, E> {
    fn new(entry: &'a E, config: &TierConfig, now: NaiveDate) -> Self {
        let record = network_tiers::EnrollmentRecord::new(entry.enrolled_on(), now);
        Self {
            entry,
            classification: config.classify(&record),
            name_key: entry.entry_name().to_lowercase(),
        }
    }

    /// Tier at ranking time.
    pub fn tier(&self) -> Tier {
        self.classification.tier
    }

    /// Whole calendar months enrolled at ranking time.
    pub fn elapsed_months(&self) -> u32 {
        self.classification.elapsed_months
    }

    fn by_name(&self, other: &Self) -> Ordering {
        self.name_key
            .cmp(&other.name_key)
            .then_with(|| self.entry.entry_name().cmp(other.entry.entry_name()))
            .then_with(|| self.entry.entry_id().cmp(&other.entry.entry_id()))
    }

    fn by_duration(&self, other: &Self) -> Ordering {
        other
            .elapsed_months()
            .cmp(&self.elapsed_months())
            .then_with(|| self.by_name(other))
    }

    fn by_tier(&self, other: &Self) -> Ordering {
        other
            .tier()
            .cmp(&self.tier())
            .then_with(|| self.by_duration(other))
    }
}

/// Filter and order directory entries.
///
/// # Arguments
///
/// * `entries` - Entries to rank; not modified
/// * `filter` - Predicate applied before sorting
/// * `sort` - Sort order
/// * `config` - Tier configuration
/// * `now` - Evaluation date, sampled fresh by the caller
///
/// # Examples
///
/// ```
/// use chrono::{Months, NaiveDate};
/// use network_access::{AccessGate, Identity};
/// use network_directory::{rank, Company, DirectoryFilter, SortKey};
/// use network_tiers::{FixedClock, TierConfig};
/// use uuid::Uuid;
///
/// let now = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let config = TierConfig::default();
/// let clock = FixedClock(now);
/// let gate = AccessGate::new(&config, &clock);
/// let admin = Identity::admin(Uuid::now_v7());
///
/// let companies: Vec<Company> = [("New", 1), ("Veteran", 40), ("Mid", 8)]
///     .into_iter()
///     .map(|(name, months)| {
///         let mut c = Company::new(name);
///         c.approve(&gate, &admin, now - Months::new(months)).unwrap();
///         c
///     })
///     .collect();
///
/// let ranked = rank(&companies, &DirectoryFilter::default(), SortKey::Tier, &config, now);
/// let names: Vec<&str> = ranked.iter().map(|r| r.entry.name.as_str()).collect();
/// assert_eq!(names, ["Veteran", "Mid", "New"]);
/// ```
pub fn rank<'a, E: DirectoryEntry>(
    entries: &'a [E],
    filter: &DirectoryFilter,
    sort: SortKey,
    config: &TierConfig,
    now: NaiveDate,
) -> Vec<RankedEntry<'a, E>> {
    let mut ranked: Vec<RankedEntry<'a, E>> = entries
        .iter()
        .filter(|entry| filter.matches(*entry))
        .map(|entry| RankedEntry::new(entry, config, now))
        .collect();

    match sort {
        SortKey::Name => ranked.sort_by(|a, b| a.by_name(b)),
        SortKey::Duration => ranked.sort_by(|a, b| a.by_duration(b)),
        SortKey::Tier => ranked.sort_by(|a, b| a.by_tier(b)),
    }

    debug!(
        total = entries.len(),
        matched = ranked.len(),
        sort = ?sort,
        "Ranked directory entries"
    );
    ranked
}
