//! # Network Access
//!
//! This crate provides the access gate of the member network directory:
//! it decides whether a company may perform an action, based on the loyalty
//! tier recomputed from its enrollment date.
//!
//! ## Overview
//!
//! The network-access crate handles:
//! - **Tier gate**: `authorize(held, required)` by rank
//! - **Privilege gate**: `has_privilege(held_set, required)` by membership
//! - **Actions**: Directory actions with their privilege, approval and ownership needs
//! - **Identity**: The acting user and company facts supplied by the session layer
//! - **Errors**: Denials mapped to 403 responses that name what was missing
//!
//! ## Architecture
//!
//! ```text
//! Identity ─┐
//! Action ───┼─→ AccessGate::check ─→ Ok(Classification)
//! Owner ────┘         │              Err(AccessError) ─→ 403
//!                     └─ TierConfig + Clock (injected)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use network_access::{AccessGate, DirectoryAction, Identity};
//! use network_tiers::{SystemClock, TierConfig};
//! use uuid::Uuid;
//!
//! let config = TierConfig::default();
//! let gate = AccessGate::new(&config, &SystemClock);
//!
//! let identity = Identity::member(Uuid::now_v7(), Uuid::now_v7())
//!     .enrolled_on_raw(Some("2021-03-01"))
//!     .approved(true);
//!
//! match gate.check(&identity, DirectoryAction::CreateListing, None) {
//!     Ok(_) => { /* persist the listing */ }
//!     Err(denied) => println!("{} {}", denied.status_code(), denied),
//! }
//! ```
//!
//! ## Integration with network-tiers
//!
//! The gate never trusts a stored tier label. Every check classifies the
//! identity's enrollment date against the clock's current date.

pub mod actions;
pub mod error;
pub mod gate;
pub mod identity;

// Re-export main types for convenience
pub use actions::DirectoryAction;
pub use error::{AccessError, AccessResult};
pub use gate::{authorize, has_privilege, AccessDecision, AccessGate};
pub use identity::Identity;
