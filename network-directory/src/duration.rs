//! Human-readable membership durations

use chrono::NaiveDate;

use network_tiers::elapsed_months;

/// Format a whole-month duration as years and months.
///
/// # Examples
///
/// ```
/// use network_directory::format_duration;
///
/// assert_eq!(format_duration(0), "0 months");
/// assert_eq!(format_duration(1), "1 month");
/// assert_eq!(format_duration(24), "2 years");
/// assert_eq!(format_duration(14), "1 year, 2 months");
/// ```
pub fn format_duration(months: u32) -> String {
    let years = months / 12;
    let rest = months % 12;
    match (years, rest) {
        (0, m) => plural(m, "month"),
        (y, 0) => plural(y, "year"),
        (y, m) => format!("{}, {}", plural(y, "year"), plural(m, "month")),
    }
}

/// Membership duration label, or `None` when the company has no start date.
pub fn membership_duration(enrolled_on: Option<NaiveDate>, now: NaiveDate) -> Option<String> {
    enrolled_on.map(|start| format_duration(elapsed_months(start, now)))
}

fn plural(count: u32, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}
