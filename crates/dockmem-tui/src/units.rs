//! Byte count conversions for display.

/// Bytes in one gibibyte (2^30).
pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Converts a byte count to GiB. NaN and infinities pass through.
#[must_use]
pub fn to_gib(bytes: f64) -> f64 {
    bytes / BYTES_PER_GIB
}
