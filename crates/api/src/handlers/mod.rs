pub mod health;
pub mod notes;
pub mod tags;

use crate::error::{AppError, AppResult};

/// Reject a blank path or query parameter. The value itself is passed on
/// untouched, so `" abc"` never resolves to `"abc"`.
pub(crate) fn require_param<'a>(value: &'a str, name: &str) -> AppResult<&'a str> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{name} parameter is required")));
    }
    Ok(value)
}
