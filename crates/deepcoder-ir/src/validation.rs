//! Value bound validation.

use crate::Value;

/// Largest magnitude a valid integer may have, in lists as well as alone.
pub const V_MAX: i64 = 256;

/// Whether a single integer lies within `-V_MAX..=V_MAX`.
pub fn in_bounds(n: i64) -> bool {
    (-V_MAX..=V_MAX).contains(&n)
}

/// Validate an operation result.
///
/// `None` is the no-result marker and is never valid. Every produced value
/// goes through this check; a failing value is dropped rather than reported
/// as an error.
pub fn validate(result: Option<&Value>) -> bool {
    result.is_some_and(Value::is_valid)
}
