//! Text presentation that writes frames and notifications to a stream.

use std::{
    fmt,
    io::{self, Write},
};

use follow_leader_rendering::{Frame, InputMode, Presentation};

/// Presentation that prints every frame as a grid of characters.
///
/// Write failures are remembered and reported by [`TerminalPresentation::finish`]
/// since the presentation hooks cannot return errors.
#[derive(Debug)]
pub(crate) struct TerminalPresentation<W> {
    out: W,
    narrow: bool,
    error: Option<io::Error>,
}

impl<W: Write> TerminalPresentation<W> {
    /// Creates a presentation writing to `out`.
    pub(crate) fn new(out: W, narrow: bool) -> Self {
        Self {
            out,
            narrow,
            error: None,
        }
    }

    /// Flushes the stream and surfaces the first write error, if any.
    pub(crate) fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        let written = self
            .out
            .write_fmt(args)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(error) = written {
            self.error = Some(error);
        }
    }
}

impl<W: Write> Presentation for TerminalPresentation<W> {
    fn render(&mut self, frame: &Frame) {
        self.line(format_args!("[{:?}]", frame.phase));
        for row in frame.text_rows() {
            self.line(format_args!("  {row}"));
        }
    }

    fn viewport_is_narrow(&self) -> bool {
        self.narrow
    }

    fn on_input_mode(&mut self, mode: InputMode) {
        self.line(format_args!("{}", mode.instructions()));
    }

    fn on_prompt(&mut self, message: &str) {
        self.line(format_args!("Leader: {message}"));
    }

    fn on_score_changed(&mut self, score: u32) {
        self.line(format_args!("Score: {score}"));
    }

    fn on_round_won(&mut self, message: &str, score: u32) {
        self.line(format_args!("{message} (score {score})"));
    }

    fn on_round_lost(&mut self, final_score: u32) {
        self.line(format_args!("Game over! Final score: {final_score}"));
    }
}
