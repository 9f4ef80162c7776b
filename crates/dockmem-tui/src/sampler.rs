//! The sampling loop: stream in, chart out.
//!
//! Each stat record is folded into the latest memory reading, converted to
//! GiB, pushed into the usage and limit windows, and the chart is redrawn
//! in place. The loop ends when the stream ends or a record fails to
//! decode.

use dockmem_common::error::Result;
use dockmem_common::provider::StatsProvider;
use dockmem_common::types::{MemoryReading, StatRecord};

use crate::chart::{self, ChartConfig};
use crate::decode::StatDecoder;
use crate::display::ChartDisplay;
use crate::units::to_gib;
use crate::window::SlidingWindow;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The daemon closed the stream.
    EndOfStream,
    /// A record could not be decoded.
    DecodeFailed,
    /// The stream could not be opened.
    StreamUnavailable,
    /// A frame could not be written.
    DisplayFailed,
}

/// Lifecycle of a [`Sampler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    /// Consuming records.
    Running,
    /// Stopped for good.
    Terminated(Termination),
}

/// Drives one container's chart from its stats stream.
#[derive(Debug)]
pub struct Sampler<P, D> {
    provider: P,
    display: D,
    config: ChartConfig,
    reading: MemoryReading,
    usage: SlidingWindow,
    limit: SlidingWindow,
    state: SamplerState,
    frames: u64,
}

impl<P: StatsProvider, D: ChartDisplay> Sampler<P, D> {
    /// Creates a sampler charting `container_name` as given by the user.
    pub fn new(provider: P, display: D, container_name: &str) -> Self {
        Self {
            provider,
            display,
            config: ChartConfig::for_container(container_name),
            reading: MemoryReading::default(),
            usage: SlidingWindow::new(),
            limit: SlidingWindow::new(),
            state: SamplerState::Running,
            frames: 0,
        }
    }

    /// Opens the stream and redraws on every record until it ends.
    ///
    /// Returns the number of frames drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be opened, a record fails to
    /// decode, or a frame cannot be written. Each of these terminates the
    /// sampler; records after a failure are never read.
    pub fn run(&mut self) -> Result<u64> {
        let stream = match self.provider.open_stats() {
            Ok(stream) => stream,
            Err(e) => {
                self.state = SamplerState::Terminated(Termination::StreamUnavailable);
                return Err(e);
            }
        };
        tracing::info!(caption = %self.config.caption, "stats stream opened");

        for record in StatDecoder::new(stream) {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    self.state = SamplerState::Terminated(Termination::DecodeFailed);
                    tracing::debug!(frames = self.frames, error = %e, "stats stream undecodable");
                    return Err(e);
                }
            };
            if let Err(e) = self.observe(&record) {
                self.state = SamplerState::Terminated(Termination::DisplayFailed);
                return Err(e);
            }
        }

        self.state = SamplerState::Terminated(Termination::EndOfStream);
        tracing::info!(frames = self.frames, "stats stream ended");
        Ok(self.frames)
    }

    /// Folds one record into the windows and redraws the chart.
    ///
    /// Fields the record omits keep the value of the last record that
    /// carried them.
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be written.
    #[allow(clippy::cast_precision_loss)]
    pub fn observe(&mut self, record: &StatRecord) -> Result<()> {
        self.reading.update(&record.memory_stats);
        let usage = to_gib(self.reading.usage as f64);
        let limit = to_gib(self.reading.limit as f64);
        self.usage.push(usage);
        self.limit.push(limit);
        tracing::debug!(usage_gib = usage, limit_gib = limit, "sample");

        let frame = chart::render(&[&self.limit, &self.usage], &self.config);
        self.display.clear()?;
        self.display.write_frame(&frame)?;
        self.frames += 1;
        Ok(())
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> SamplerState {
        self.state
    }

    /// Frames drawn so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Latest memory figures, in bytes.
    pub const fn reading(&self) -> MemoryReading {
        self.reading
    }

    /// Used-memory window, in GiB.
    pub const fn usage(&self) -> &SlidingWindow {
        &self.usage
    }

    /// Memory-limit window, in GiB.
    pub const fn limit(&self) -> &SlidingWindow {
        &self.limit
    }

    /// Chart settings in use.
    pub const fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The display frames are written to.
    pub const fn display(&self) -> &D {
        &self.display
    }

    /// Consumes the sampler, handing back its display.
    pub fn into_display(self) -> D {
        self.display
    }
}
