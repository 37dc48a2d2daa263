//! Key builders for every entry the preference store writes.
//!
//! Backends that need a flat key space (Redis) build their keys here so
//! the layout is defined in one place.

use motivator_core::error::AppError;
use motivator_core::types::id::UserId;

/// Namespace of notification preference documents.
const PREFERENCE_NS: &str = "notification:preference:";

/// Key for a user's notification preference document.
pub fn preference(user_id: &UserId) -> String {
    format!("{PREFERENCE_NS}{user_id}")
}

/// Pattern matching every preference document.
pub fn preference_pattern() -> String {
    format!("{PREFERENCE_NS}*")
}

/// Recover the user from a preference key written under `prefix`.
///
/// The prefix is removed first, so a prefix that itself contains the
/// preference namespace does not confuse the parse.
pub fn user_from_preference_key(prefix: &str, key: &str) -> Result<UserId, AppError> {
    let not_ours = || AppError::internal(format!("'{key}' is not a preference key"));
    let id = key
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(PREFERENCE_NS))
        .ok_or_else(not_ours)?;
    UserId::new(id)
}
