//! Frame sinks for the rendered chart.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use dockmem_common::error::{DockmemError, Result};

/// Somewhere a chart frame can be drawn, replacing the previous one.
pub trait ChartDisplay {
    /// Removes the previously drawn frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be written.
    fn clear(&mut self) -> Result<()>;

    /// Draws `frame`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot be written.
    fn write_frame(&mut self, frame: &str) -> Result<()>;
}

/// Draws frames on a terminal, clearing the screen before each one.
#[derive(Debug)]
pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl TerminalDisplay<Stdout> {
    /// Display on the process's standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Display writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartDisplay for TerminalDisplay<W> {
    fn clear(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0)).map_err(terminal_error)
    }

    fn write_frame(&mut self, frame: &str) -> Result<()> {
        writeln!(self.out, "{frame}").map_err(terminal_error)?;
        self.out.flush().map_err(terminal_error)
    }
}

fn terminal_error(source: io::Error) -> DockmemError {
    DockmemError::io("terminal", source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_then_frame_emits_escape_then_text() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.clear().unwrap();
        display.write_frame("chart").unwrap();
        let text = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(text, "\x1b[2J\x1b[1;1Hchart\n");
    }

    #[test]
    fn frames_accumulate_in_order() {
        let mut display = TerminalDisplay::new(Vec::new());
        for frame in ["one", "two"] {
            display.clear().unwrap();
            display.write_frame(frame).unwrap();
        }
        let text = String::from_utf8(display.into_inner()).unwrap();
        assert!(text.find("one").unwrap() < text.find("two").unwrap());
        assert_eq!(text.matches("\x1b[2J").count(), 2);
    }
}
