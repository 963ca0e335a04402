//! Simulation observer trait for progress reporting and data collection.

use wl_brain::Transition;
use wl_core::Frame;

/// Population counts at the end of a frame.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FrameSummary {
    pub frame: Frame,
    /// Sim seconds on the world clock after the frame's advance.
    pub time:  f64,
    pub live:  usize,
    pub dead:  usize,
}

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] at key points in the
/// frame loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: transition printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_transition(&mut self, frame: Frame, t: &Transition) {
///         println!("{frame}: {} {} -> {}", t.agent, t.from, t.to);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each frame, before any agent ticks.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called once per committed mode change, in commit order.
    ///
    /// Changes caused by calls made between frames (damage, stuns, scripted
    /// requests) are reported at the start of the following frame.
    fn on_transition(&mut self, _frame: Frame, _transition: &Transition) {}

    /// Called at the end of each frame with the number of agents ticked.
    fn on_frame_end(&mut self, _frame: Frame, _ticked: usize) {}

    /// Called every `config.output_interval_frames` frames.
    fn on_summary(&mut self, _summary: &FrameSummary) {}

    /// Called once after the final frame of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_frame: Frame) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
