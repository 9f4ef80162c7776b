//! Daemon API version handling.

use std::cmp::Ordering;

use dockmem_common::constants::{FALLBACK_API_VERSION, MAX_API_VERSION};

/// Compares two `major.minor` API versions numerically.
///
/// Missing or non-numeric components count as zero, so `"1.9"` sorts
/// before `"1.10"`.
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    parse(a).cmp(&parse(b))
}

/// Picks the API version to use given what the daemon advertised on ping.
///
/// The daemon's version wins when it is older than ours; an absent
/// advertisement falls back to the oldest version every daemon accepts.
#[must_use]
pub fn negotiate(advertised: Option<&str>) -> String {
    match advertised.map(str::trim).filter(|v| !v.is_empty()) {
        Some(server) if compare(server, MAX_API_VERSION).is_lt() => server.to_string(),
        Some(_) => MAX_API_VERSION.to_string(),
        None => FALLBACK_API_VERSION.to_string(),
    }
}

fn parse(version: &str) -> (u32, u32) {
    let mut parts = version
        .trim_start_matches('v')
        .split('.')
        .map(|p| p.parse().unwrap_or(0));
    (parts.next().unwrap_or(0), parts.next().unwrap_or(0))
}
