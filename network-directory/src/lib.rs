//! # Network Directory
//!
//! This crate provides the company directory of the member network: company
//! records, published listings, and the tier-ranked directory view.
//!
//! ## Overview
//!
//! The network-directory crate handles:
//! - **Companies**: Registration, approval, enrollment dates and profile edits
//! - **Listings**: Tier-gated publishing, editing and the listing feed
//! - **Ranking**: Filtering and deterministic ordering by name, duration or tier
//! - **Profiles**: Company standing, membership duration and listings in one view
//!
//! ## Architecture
//!
//! ```text
//! Company ─ enrolled_on ─→ network_tiers::classify (fresh, per call)
//!   ├─ rank ──────────→ RankedEntry (tier, elapsed_months)
//!   ├─ CompanyProfile ─→ Standing + duration + listings
//!   └─ Listing
//!        ├─ publish / apply_update / authorize_removal ─→ network_access::AccessGate
//!        └─ listing_feed ─→ ListingView (company name, tier)
//! ```
//!
//! Tier labels stored on a [`Company`] are advisory only; every view and every
//! access decision recomputes the tier from the enrollment date.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use network_directory::{rank, Company, DirectoryFilter, SortKey};
//! use network_tiers::TierConfig;
//!
//! let config = TierConfig::default();
//! let companies: Vec<Company> = Vec::new();
//!
//! let filter = DirectoryFilter {
//!     industry: Some("Manufacturing".to_string()),
//!     ..Default::default()
//! };
//! for entry in rank(&companies, &filter, SortKey::Tier, &config, Utc::now().date_naive()) {
//!     println!("{} {}", entry.tier().badge(), entry.entry.name);
//! }
//! ```

pub mod company;
pub mod duration;
pub mod listing;
pub mod profile;
pub mod ranking;

// Re-export main types for convenience
pub use company::{pending, Company, CompanySize, CompanyUpdate};
pub use duration::{format_duration, membership_duration};
pub use listing::{
    listing_feed, publish, Listing, ListingCategory, ListingDraft, ListingUpdate, ListingView,
};
pub use profile::CompanyProfile;
pub use ranking::{rank, DirectoryEntry, DirectoryFilter, RankedEntry, SortKey};
