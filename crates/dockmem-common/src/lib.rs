//! # dockmem-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the dockmem workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and holds the primitives every other crate builds upon,
//! including the [`provider::StatsProvider`] seam between the daemon client
//! and the sampling loop.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod provider;
pub mod types;
