//! Seam between the sampling loop and whatever produces stats records.

use std::io::Read;

use crate::error::Result;

/// Opens the raw stats stream for one container.
///
/// The returned reader yields back-to-back JSON stat records until the
/// daemon closes the stream. Implementations own every daemon detail
/// (connection, name lookup, version negotiation); the sampling loop only
/// sees bytes.
pub trait StatsProvider {
    /// Byte stream of concatenated JSON stat records.
    type Stream: Read;

    /// Opens the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon cannot be reached or refuses the
    /// request.
    fn open_stats(&mut self) -> Result<Self::Stream>;
}
