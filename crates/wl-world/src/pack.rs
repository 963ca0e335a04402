//! Pack coordination seam.
//!
//! Pack morale and group alerts span many agents, so they live in a shared
//! coordinator rather than in any one agent.  Methods take `&self`;
//! implementations that keep state use interior mutability.

use wl_core::{AgentId, TargetId};

pub trait PackCoordinator {
    /// Whether the agent's pack allows it to engage `target` at all.
    fn is_valid_target(&self, _agent: AgentId, _target: TargetId) -> bool {
        true
    }

    /// Try to form a hunting group around `target`.  `true` means a group
    /// formed and the group, not the individual, decides the response.
    fn try_form_group(&self, _agent: AgentId, _target: TargetId) -> bool {
        false
    }

    /// Tell pack mates that `agent` acquired `target`.
    fn alert(&self, _agent: AgentId, _target: TargetId) {}

    /// Pack morale that forbids fleeing.
    fn morale_override(&self, _agent: AgentId) -> bool {
        false
    }

    fn notify_damaged(&self, _agent: AgentId, _amount: f32) {}
}

/// Every agent is a loner.
#[derive(Default, Debug)]
pub struct NoPacks;

impl PackCoordinator for NoPacks {}
