//! Movement and animation signals emitted once per agent per tick.
//!
//! The behavior core never plays animations.  It derives a compact
//! [`MotionSignals`] value in post-process and hands it to a [`MotionSink`]
//! owned by the host.

use wl_core::AgentId;

/// Coarse locomotion state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum MoveState {
    #[default]
    Stopped,
    Walk,
    Stalk,
    Run,
}

impl MoveState {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveState::Stopped => "stopped",
            MoveState::Walk    => "walk",
            MoveState::Stalk   => "stalk",
            MoveState::Run     => "run",
        }
    }
}

/// Animation layer the host should be playing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Locomotion,
    /// Attack variant for one side of the body.
    Attack { side: u8 },
    Alert,
    Feed,
    Howl,
    Sleep,
    Stunned,
    Struggle,
    Dead,
    Scripted,
    /// Custom species mode; the host maps the number to its own asset.
    Custom(u16),
}

/// One tick's worth of derived movement output.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct MotionSignals {
    pub move_state: MoveState,
    pub anim_state: AnimState,
    /// Metres per second.
    pub goal_speed: f32,
    /// Degrees per second.
    pub turn_speed: f32,
}

/// Receives motion output from post-process.
pub trait MotionSink {
    fn emit(&mut self, agent: AgentId, signals: MotionSignals);
}

/// Discards everything.
#[derive(Default, Debug)]
pub struct NullSink;

impl MotionSink for NullSink {
    fn emit(&mut self, _agent: AgentId, _signals: MotionSignals) {}
}

/// Keeps every emitted value in order.  Handy in tests.
#[derive(Default, Debug)]
pub struct RecordingSink {
    pub emitted: Vec<(AgentId, MotionSignals)>,
}

impl RecordingSink {
    /// The most recent signals for `agent`.
    pub fn last_for(&self, agent: AgentId) -> Option<MotionSignals> {
        self.emitted.iter().rev().find(|(a, _)| *a == agent).map(|(_, s)| *s)
    }
}

impl MotionSink for RecordingSink {
    fn emit(&mut self, agent: AgentId, signals: MotionSignals) {
        self.emitted.push((agent, signals));
    }
}
