//! Error types for access decisions
//!
//! A denial is an ordinary outcome, not a fault. These errors exist so the HTTP
//! layer can turn a denial into a 403 response that names what was missing.

use thiserror::Error;

use network_tiers::{Privilege, Tier};

use crate::actions::DirectoryAction;

/// Access denial types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The acting user has no company, so no tier can be determined
    #[error("No company is associated with this account")]
    NoCompany,

    /// The acting company has not been approved yet
    #[error("Company must be approved before it can {0}")]
    NotApproved(DirectoryAction),

    /// The acting company's tier is below the one the action needs
    #[error(
        "This action requires {required} level or above ({privilege}); current level is {held}"
    )]
    InsufficientTier {
        /// Tier the company holds
        held: Tier,
        /// Lowest tier granting `privilege`
        required: Tier,
        /// Privilege the action needs
        privilege: Privilege,
    },

    /// The acting company does not own the target resource
    #[error("Forbidden: only the owning company can {0}")]
    NotOwner(DirectoryAction),

    /// The action is reserved for network administrators
    #[error("Admin access required to {0}")]
    NotAdmin(DirectoryAction),
}

/// Result type for access checks.
pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Get HTTP status code for this error.
    ///
    /// Every denial is a 403: the caller is authenticated but not permitted.
    pub fn status_code(&self) -> u16 {
        match self {
            AccessError::NoCompany
            | AccessError::NotApproved(_)
            | AccessError::InsufficientTier { .. }
            | AccessError::NotOwner(_)
            | AccessError::NotAdmin(_) => 403,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::NoCompany => "NO_COMPANY",
            AccessError::NotApproved(_) => "NOT_APPROVED",
            AccessError::InsufficientTier { .. } => "INSUFFICIENT_TIER",
            AccessError::NotOwner(_) => "NOT_OWNER",
            AccessError::NotAdmin(_) => "NOT_ADMIN",
        }
    }

    /// Human-readable denial for API responses.
    ///
    /// Tier denials name both the missing tier and the privilege it grants.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The tier the caller would need, for tier denials.
    pub fn required_tier(&self) -> Option<Tier> {
        match self {
            AccessError::InsufficientTier { required, .. } => Some(*required),
            _ => None,
        }
    }

    /// The privilege the caller lacks, for tier denials.
    pub fn missing_privilege(&self) -> Option<Privilege> {
        match self {
            AccessError::InsufficientTier { privilege, .. } => Some(*privilege),
            _ => None,
        }
    }
}
