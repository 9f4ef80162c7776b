//! # dockmem-tui
//!
//! Live terminal chart of a container's memory usage.
//!
//! - [`window`]: bounded sample history per series.
//! - [`units`]: byte to GiB conversion.
//! - [`chart`]: multi-series ASCII line chart.
//! - [`decode`]: incremental decoding of the stats stream.
//! - [`display`]: frame sink that clears and redraws in place.
//! - [`sampler`]: the loop tying them together.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod chart;
pub mod decode;
pub mod display;
pub mod sampler;
pub mod units;
pub mod window;
