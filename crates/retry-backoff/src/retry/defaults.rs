//! Normalization of caller-supplied tunables.
//!
//! Out-of-range values are replaced by the variant's default rather than
//! rejected. Each replacement is logged at debug level.

use std::time::Duration;
use tracing::debug;

/// `value` if non-zero, otherwise `default`.
pub(crate) fn positive_duration(
    field: &'static str,
    value: Duration,
    default: Duration,
) -> Duration {
    if value.is_zero() {
        debug!(field, default = ?default, "using default for unset duration");
        default
    } else {
        value
    }
}

/// `value` if strictly greater than `floor`, otherwise `default`.
///
/// Values beyond `u32::MAX` saturate rather than fall back.
pub(crate) fn count_above(field: &'static str, value: i64, floor: i64, default: u32) -> u32 {
    if value <= floor {
        debug!(field, value, default, "using default for out-of-range count");
        return default;
    }
    u32::try_from(value).unwrap_or(u32::MAX)
}
