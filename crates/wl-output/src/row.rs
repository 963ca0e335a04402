//! Plain data row types written by output backends.

use wl_brain::Transition;
use wl_core::{Frame, Mode};
use wl_sim::FrameSummary;

/// One committed mode change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRow {
    pub frame: u64,
    /// Sim seconds at commit.
    pub time:  f64,
    pub agent: u32,
    pub from:  Mode,
    pub to:    Mode,
}

impl TransitionRow {
    pub fn new(frame: Frame, t: &Transition) -> Self {
        Self { frame: frame.0, time: t.at, agent: t.agent.0, from: t.from, to: t.to }
    }
}

/// Population counts at the end of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummaryRow {
    pub frame: u64,
    pub time:  f64,
    pub live:  u64,
    pub dead:  u64,
}

impl From<&FrameSummary> for FrameSummaryRow {
    fn from(s: &FrameSummary) -> Self {
        Self { frame: s.frame.0, time: s.time, live: s.live as u64, dead: s.dead as u64 }
    }
}
