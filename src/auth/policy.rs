//! Role policy: who may call which operation and which role transitions are legal.
//!
//! Privileged operations check, in order: (1) permission here, (2) existence of the
//! target, (3) validity of the target's state. A caller without permission learns
//! nothing about whether the target exists.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{RequestUser, Role};

/// Require `subject` to hold exactly `required`.
pub fn authorize(subject: &RequestUser, required: Role) -> AppResult<()> {
    if subject.role == required {
        return Ok(());
    }

    match required {
        Role::Admin => Err(AppError::unauthorized(
            ErrorCode::NoneAdminAccount,
            "Admin privileges are required",
        )),
        Role::CenterAdmin | Role::Lector | Role::Pending => Err(AppError::unauthorized(
            ErrorCode::NotAccessible,
            format!("{} role is required", required),
        )),
    }
}

/// Only a PENDING user may sign up, as LECTOR or CENTER_ADMIN. A user holds a single role,
/// so a second sign-up of either kind fails and an ADMIN is never demoted.
pub fn ensure_can_sign_up(subject: &RequestUser, target: Role) -> AppResult<()> {
    match (subject.role, target) {
        (_, Role::Pending | Role::Admin) => Err(AppError::invalid_format(format!(
            "{} is not a sign-up target",
            target
        ))),
        (Role::Pending, Role::Lector | Role::CenterAdmin) => Ok(()),
        (current @ (Role::Lector | Role::CenterAdmin | Role::Admin), _) => {
            Err(AppError::bad_request(
                ErrorCode::UserAlreadySignedUp,
                format!("User is already signed up as {}", current),
            ))
        }
    }
}

/// Require `subject` to own the resource held by `owner_id`, unless the subject is ADMIN.
pub fn ensure_owner(subject: &RequestUser, owner_id: uuid::Uuid) -> AppResult<()> {
    if subject.role == Role::Admin || subject.id == owner_id {
        return Ok(());
    }
    Err(AppError::unauthorized(
        ErrorCode::NotAccessible,
        "Resource belongs to another user",
    ))
}
