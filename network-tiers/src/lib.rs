//! # Network Tiers
//!
//! This crate provides the loyalty tier engine for the member network
//! directory: it turns a company's enrollment date into a tier, a privilege
//! set, and a projection toward the next tier.
//!
//! ## Overview
//!
//! The network-tiers crate handles:
//! - **Tiers**: Explorer < Participant < Contributor < Champion
//! - **Classification**: Whole calendar months since enrollment mapped to a tier
//! - **Privileges**: Monotonic, table-driven capability sets per tier
//! - **Progression**: Next tier, months remaining, and what it unlocks
//! - **Configuration**: Thresholds and privilege table, validated at load
//!
//! ## Architecture
//!
//! ```text
//! EnrollmentRecord (enrolled_on, now)
//!   └─ classify ─→ Classification (tier, elapsed_months)
//!                    ├─ privileges_for ─→ PrivilegeSet
//!                    └─ progression ───→ Progression
//! ```
//!
//! Every operation is a pure function of its inputs and an immutable
//! [`TierConfig`]. There is no shared mutable state, so the engine can be
//! called from any number of request handlers at once.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use network_tiers::{EnrollmentRecord, SystemClock, TierConfig};
//!
//! // Load once at startup; a bad configuration must stop the service.
//! let config = TierConfig::from_env().expect("invalid tier configuration");
//!
//! // Per request: build a fresh record from the stored date and the clock.
//! let record = EnrollmentRecord::from_raw(Some("2023-04-01"), &SystemClock);
//! let standing = config.standing(&record);
//! println!("{} {}", standing.badge, standing.tier);
//! ```
//!
//! ## Integration
//!
//! This crate is designed to work with:
//! - `network-access`: Gating actions on tiers and privileges
//! - `network-directory`: Ranking and presenting enrolled companies

pub mod classifier;
pub mod config;
pub mod error;
pub mod privileges;
pub mod progression;
pub mod standing;
pub mod tier;

// Re-export main types for convenience
pub use classifier::{
    elapsed_months, parse_enrollment_date, Classification, Clock, EnrollmentRecord, FixedClock,
    SystemClock,
};
pub use config::{TierConfig, TierThresholds};
pub use error::{ConfigError, ConfigResult};
pub use privileges::{Privilege, PrivilegeSet, PrivilegeTable};
pub use progression::Progression;
pub use standing::Standing;
pub use tier::Tier;
