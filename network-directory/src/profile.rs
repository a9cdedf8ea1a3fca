//! Company profile view

use chrono::NaiveDate;
use serde::Serialize;

use network_tiers::{Standing, TierConfig};

use crate::company::Company;
use crate::duration::membership_duration;
use crate::listing::Listing;

/// Everything shown on a company's profile page.
///
/// Serializes flat: the company's fields sit alongside `standing`,
/// `membership_duration` and `listings`.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyProfile<'a> {
    /// The company
    #[serde(flatten)]
    pub company: &'a Company,

    /// Tier, privileges and progression on the evaluation date
    pub standing: Standing,

    /// Membership duration label, absent without an enrollment date
    pub membership_duration: Option<String>,

    /// The company's listings, newest first
    pub listings: Vec<&'a Listing>,
}

impl<'a> CompanyProfile<'a> {
    /// Assemble the profile of `company` as of `now`.
    ///
    /// Listings belonging to other companies are ignored.
    pub fn build(
        company: &'a Company,
        listings: &'a [Listing],
        config: &TierConfig,
        now: NaiveDate,
    ) -> Self {
        let mut own: Vec<&'a Listing> = listings
            .iter()
            .filter(|l| l.company_id == company.id)
            .collect();
        own.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

        Self {
            company,
            standing: config.standing(&company.enrollment(now)),
            membership_duration: membership_duration(company.enrolled_on, now),
            listings: own,
        }
    }
}
