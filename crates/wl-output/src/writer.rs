//! The `OutputWriter` trait implemented by all backend writers.

use crate::{FrameSummaryRow, OutputResult, TransitionRow};

/// Trait implemented by output backends.
///
/// The observer never propagates these results; it keeps the first error,
/// retrievable with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    fn write_transition(&mut self, row: &TransitionRow) -> OutputResult<()>;

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
