//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use wl_brain::Transition;
use wl_core::Frame;
use wl_sim::{FrameSummary, SimObserver};

use crate::row::{FrameSummaryRow, TransitionRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every transition and each periodic frame
/// summary to an [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:      W,
    transitions: u64,
    last_error:  Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, transitions: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Transitions written so far.
    pub fn transitions_written(&self) -> u64 {
        self.transitions
    }

    /// Flush the writer.  `run` does this on its own; call it after driving
    /// the sim with `step` or `run_frames`.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_transition(&mut self, frame: Frame, transition: &Transition) {
        let result = self.writer.write_transition(&TransitionRow::new(frame, transition));
        if result.is_ok() {
            self.transitions += 1;
        }
        self.store_err(result);
    }

    fn on_summary(&mut self, summary: &FrameSummary) {
        let result = self.writer.write_frame_summary(&FrameSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_frame: Frame) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
