//! Incremental decoding of the stats stream.

use std::io::{BufReader, Read};

use dockmem_common::error::Result;
use dockmem_common::types::StatRecord;
use serde_json::de::IoRead;
use serde_json::{Deserializer, StreamDeserializer};

/// Iterator over the stat records of a byte stream.
///
/// Records may be separated by any amount of whitespace. Iteration ends
/// cleanly at end of stream; a malformed or truncated record yields one
/// error.
pub struct StatDecoder<R: Read> {
    inner: StreamDeserializer<'static, IoRead<BufReader<R>>, StatRecord>,
}

impl<R: Read> StatDecoder<R> {
    /// Starts decoding `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            inner: Deserializer::from_reader(BufReader::new(reader)).into_iter(),
        }
    }
}

impl<R: Read> Iterator for StatDecoder<R> {
    type Item = Result<StatRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|r| r.map_err(Into::into))
    }
}
