//! Well-known role name constants.
//!
//! Roles are stored as free text on the `users` row; these are the values the
//! service itself assigns or checks.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Role given to a user created without an explicit role.
pub const DEFAULT_ROLE: &str = ROLE_USER;

/// Every role a user may hold.
pub const ROLES: [&str; 2] = [ROLE_ADMIN, ROLE_USER];

/// Reject role names outside [`ROLES`].
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if ROLES.contains(&role) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Unknown role '{role}'. Must be one of: {}",
        ROLES.join(", ")
    )))
}
