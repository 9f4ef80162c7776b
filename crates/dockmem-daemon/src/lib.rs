//! Client for a Docker-compatible container daemon.
//!
//! Talks HTTP over a Unix socket or TCP to list containers, negotiate the
//! API version, and follow a container's streaming stats endpoint.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod client;
pub mod lookup;
pub mod provider;
pub mod transport;
pub mod version;
