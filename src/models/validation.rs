//! Field-level request checks shared by the sign-up and answer DTOs.
//! Every failure is `BadRequest(INVALID_FORMAT)`.

use chrono::NaiveTime;

use crate::error::{AppError, AppResult};

pub const NICKNAME_MIN_CHARS: usize = 2;
pub const NICKNAME_MAX_CHARS: usize = 20;

pub fn nickname(value: &str) -> AppResult<()> {
    let chars = value.chars().count();
    if value.trim() != value || !(NICKNAME_MIN_CHARS..=NICKNAME_MAX_CHARS).contains(&chars) {
        return Err(AppError::invalid_format(format!(
            "nickname must be {}-{} characters without surrounding spaces",
            NICKNAME_MIN_CHARS, NICKNAME_MAX_CHARS
        )));
    }
    Ok(())
}

pub fn email(value: &str) -> AppResult<()> {
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::invalid_format(format!("invalid email: {}", value))),
    }
}

pub fn not_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_format(format!("{} must not be blank", field)));
    }
    Ok(())
}

/// `HH:MM` in 24-hour time.
pub fn clock_time(value: &str) -> AppResult<NaiveTime> {
    if value.len() != 5 {
        return Err(AppError::invalid_format(format!(
            "time must be HH:MM, got {}",
            value
        )));
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::invalid_format(format!("time must be HH:MM, got {}", value)))
}

pub fn non_negative(field: &str, value: i32) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::invalid_format(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(())
}
