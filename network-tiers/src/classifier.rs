//! Tier classification from enrollment dates
//!
//! Elapsed time is counted in whole calendar months: the year/month
//! difference, less one when the current day-of-month has not yet reached the
//! enrollment day-of-month. Fixed-length month approximations disagree with
//! this near month boundaries and are not used anywhere.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TierConfig;
use crate::tier::Tier;

/// Source of the current time.
///
/// Injected wherever "now" is needed so tests can pin it.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Today's date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one date.
///
/// [`Clock::now`] reports midnight UTC of that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Inputs to one tier evaluation.
///
/// Built fresh for each request from the stored enrollment date and a freshly
/// sampled "now". Never cache one across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    /// When the company was enrolled, if known
    pub enrolled_on: Option<NaiveDate>,

    /// Evaluation date
    pub now: NaiveDate,
}

impl EnrollmentRecord {
    /// Create a record from a parsed date.
    pub fn new(enrolled_on: Option<NaiveDate>, now: NaiveDate) -> Self {
        Self { enrolled_on, now }
    }

    /// Create a record from a stored date string, sampling "now" from `clock`.
    ///
    /// Unparseable strings are treated as a missing date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use network_tiers::{EnrollmentRecord, FixedClock};
    ///
    /// let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    /// let record = EnrollmentRecord::from_raw(Some("2024-01-15"), &clock);
    /// assert_eq!(record.enrolled_on, NaiveDate::from_ymd_opt(2024, 1, 15));
    ///
    /// let record = EnrollmentRecord::from_raw(Some("not a date"), &clock);
    /// assert_eq!(record.enrolled_on, None);
    /// ```
    pub fn from_raw(enrolled_on: Option<&str>, clock: &dyn Clock) -> Self {
        Self {
            enrolled_on: enrolled_on.and_then(parse_enrollment_date),
            now: clock.today(),
        }
    }

    /// Whole calendar months elapsed since enrollment.
    pub fn elapsed_months(&self) -> u32 {
        self.enrolled_on
            .map(|start| elapsed_months(start, self.now))
            .unwrap_or(0)
    }
}

/// Result of classifying an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Tier reached
    pub tier: Tier,

    /// Whole calendar months since enrollment
    pub elapsed_months: u32,
}

/// Parse a stored enrollment date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, and RFC 3339 timestamps.
/// Returns `None` for anything else; callers treat that as "not enrolled".
pub fn parse_enrollment_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

/// Whole calendar months from `start` to `now`, never negative.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use network_tiers::elapsed_months;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// assert_eq!(elapsed_months(d(2024, 1, 15), d(2024, 4, 15)), 3);
/// assert_eq!(elapsed_months(d(2024, 1, 15), d(2024, 4, 14)), 2);
/// assert_eq!(elapsed_months(d(2024, 5, 1), d(2024, 4, 1)), 0);
/// ```
pub fn elapsed_months(start: NaiveDate, now: NaiveDate) -> u32 {
    let mut months = i64::from(now.year() - start.year()) * 12 + i64::from(now.month())
        - i64::from(start.month());
    if now.day() < start.day() {
        months -= 1;
    }
    u32::try_from(months.max(0)).unwrap_or(u32::MAX)
}

impl TierConfig {
    /// Classify an enrollment into a tier.
    ///
    /// A missing enrollment date yields the lowest tier with zero months.
    pub fn classify(&self, record: &EnrollmentRecord) -> Classification {
        let elapsed_months = record.elapsed_months();
        Classification {
            tier: self.thresholds().tier_for_months(elapsed_months),
            elapsed_months,
        }
    }
}
