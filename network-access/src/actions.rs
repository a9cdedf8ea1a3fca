//! # Actions
//!
//! Defines the directory actions a user can attempt and what each one
//! requires. Member actions may need a privilege, an approved company or
//! ownership of the target; lifecycle actions need an administrator.

use serde::{Deserialize, Serialize};
use std::fmt;

use network_tiers::Privilege;

/// Actions a company can perform in the directory.
///
/// - **Browse**: View companies and listings
/// - **AttendEvent**: Register for a network event
/// - **CreateListing**: Publish a new listing
/// - **UpdateListing**: Edit one of the company's listings
/// - **DeleteListing**: Remove one of the company's listings
/// - **ManageCompany**: Edit the company profile
/// - **ApproveCompany**: Review pending companies and approve them (admin)
/// - **ManageEnrollment**: Correct a company's enrollment date (admin)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryAction {
    /// Browse the directory.
    Browse,

    /// Register for an event.
    AttendEvent,

    /// Publish a listing.
    CreateListing,

    /// Edit an owned listing.
    ///
    /// Editing is held to the same tier as publishing.
    UpdateListing,

    /// Remove an owned listing.
    ///
    /// Not tier-gated, so a company can always withdraw what it published.
    DeleteListing,

    /// Edit the company profile.
    ManageCompany,

    /// Review and approve pending companies.
    ApproveCompany,

    /// Correct a company's enrollment date.
    ///
    /// The date drives the tier, so only administrators may move it.
    ManageEnrollment,
}

impl DirectoryAction {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectoryAction::Browse => "browse",
            DirectoryAction::AttendEvent => "attend_event",
            DirectoryAction::CreateListing => "create_listing",
            DirectoryAction::UpdateListing => "update_listing",
            DirectoryAction::DeleteListing => "delete_listing",
            DirectoryAction::ManageCompany => "manage_company",
            DirectoryAction::ApproveCompany => "approve_company",
            DirectoryAction::ManageEnrollment => "manage_enrollment",
        }
    }

    /// Parse action from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, `-` accepted for `_`)
    ///
    /// # Returns
    ///
    /// `Some(DirectoryAction)` if valid, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use network_access::DirectoryAction;
    ///
    /// assert_eq!(DirectoryAction::parse("create_listing"), Some(DirectoryAction::CreateListing));
    /// assert_eq!(DirectoryAction::parse("Attend-Event"), Some(DirectoryAction::AttendEvent));
    /// assert_eq!(DirectoryAction::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "browse" => Some(DirectoryAction::Browse),
            "attend_event" => Some(DirectoryAction::AttendEvent),
            "create_listing" => Some(DirectoryAction::CreateListing),
            "update_listing" => Some(DirectoryAction::UpdateListing),
            "delete_listing" => Some(DirectoryAction::DeleteListing),
            "manage_company" => Some(DirectoryAction::ManageCompany),
            "approve_company" => Some(DirectoryAction::ApproveCompany),
            "manage_enrollment" => Some(DirectoryAction::ManageEnrollment),
            _ => None,
        }
    }

    /// Get all actions.
    pub fn all() -> Vec<Self> {
        vec![
            DirectoryAction::Browse,
            DirectoryAction::AttendEvent,
            DirectoryAction::CreateListing,
            DirectoryAction::UpdateListing,
            DirectoryAction::DeleteListing,
            DirectoryAction::ManageCompany,
            DirectoryAction::ApproveCompany,
            DirectoryAction::ManageEnrollment,
        ]
    }

    /// The privilege the acting company's tier must grant, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use network_access::DirectoryAction;
    /// use network_tiers::Privilege;
    ///
    /// assert_eq!(
    ///     DirectoryAction::CreateListing.required_privilege(),
    ///     Some(Privilege::CreateListings)
    /// );
    /// assert_eq!(DirectoryAction::DeleteListing.required_privilege(), None);
    /// ```
    pub fn required_privilege(&self) -> Option<Privilege> {
        match self {
            DirectoryAction::Browse => Some(Privilege::ViewNetwork),
            DirectoryAction::AttendEvent => Some(Privilege::AttendEvents),
            DirectoryAction::CreateListing | DirectoryAction::UpdateListing => {
                Some(Privilege::CreateListings)
            }
            DirectoryAction::DeleteListing
            | DirectoryAction::ManageCompany
            | DirectoryAction::ApproveCompany
            | DirectoryAction::ManageEnrollment => None,
        }
    }

    /// Check if the acting company must own the target resource.
    pub fn requires_ownership(&self) -> bool {
        matches!(
            self,
            DirectoryAction::UpdateListing
                | DirectoryAction::DeleteListing
                | DirectoryAction::ManageCompany
        )
    }

    /// Check if the acting company must be approved.
    pub fn requires_approval(&self) -> bool {
        matches!(
            self,
            DirectoryAction::AttendEvent
                | DirectoryAction::CreateListing
                | DirectoryAction::UpdateListing
        )
    }

    /// Check if only administrators may perform the action.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            DirectoryAction::ApproveCompany | DirectoryAction::ManageEnrollment
        )
    }
}

impl fmt::Display for DirectoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
