//! Validation rules shared across admin request payloads.

use validator::ValidationError;

use crate::models::user::UserRole;

/// Validates that a role name maps onto a known [`UserRole`].
pub fn validate_user_role(role: &str) -> Result<(), ValidationError> {
    if UserRole::parse(role).is_none() {
        return Err(ValidationError::new("invalid_user_role"));
    }
    Ok(())
}
