//! Role-based authorization policy.
//!
//! Pure policy check: no IO, no business logic. Handlers call
//! [`require`] before touching storage.

use crate::error::ApiError;
use crate::models::Role;

/// Actions gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ManageVehicles,
    ManageAuctions,
    ManageUsers,
    ListUsers,
    ManageInquiries,
    SubmitInquiry,
}

/// Whether `role` may perform `action`
pub fn can_perform(role: Role, action: Action) -> bool {
    match role {
        Role::Admin => true,
        Role::User => matches!(action, Action::SubmitInquiry),
    }
}

/// Check `can_perform`, mapping a refusal to a 403
pub fn require(role: Role, action: Action) -> Result<(), ApiError> {
    if can_perform(role, action) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admins only"))
    }
}
