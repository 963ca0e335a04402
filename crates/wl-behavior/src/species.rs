//! The `SpeciesBehavior` trait — the per-species extension point.

use std::sync::Arc;

use wl_agent::{AgentState, TargetView};
use wl_core::{Mode, SpeciesConfig, ThreatReading};
use wl_world::MotionSignals;

use crate::{Hook, TickEnv};

/// Species-specific strategy composed into the base mode pipeline.
///
/// One boxed strategy is built per agent at spawn time and holds the
/// species' immutable [`SpeciesConfig`].  Every hook defaults to
/// [`Hook::Continue`], so a species overrides only the phases it cares
/// about.
///
/// # Hooks
///
/// | Hook                    | Phase replaced                 | Handled value              |
/// |-------------------------|--------------------------------|----------------------------|
/// | `pre_process`           | timers, wounds, hold ground    | mode to request, if any    |
/// | `process`               | per-mode dispatch              | mode to request, if any    |
/// | `post_process`          | motion derivation              | signals to emit            |
/// | `enter_mode`            | base enter handler             | `()`                       |
/// | `exit_mode`             | base exit handler              | `()`                       |
/// | `resolve_mode`          | the whole preprocessor         | final mode, `None` = no-op |
/// | `scan`                  | target scan                    | mode to request, if any    |
/// | `detection_response`    | flee / stalk decision          | mode to request, if any    |
/// | `hold_ground`           | the whole threat negotiation   | hold ground?               |
/// | `threat_check`          | one category's inner test      | inside inner radius?       |
///
/// # Example
///
/// ```rust,ignore
/// struct Timberwolf { config: Arc<SpeciesConfig> }
///
/// impl SpeciesBehavior for Timberwolf {
///     fn config(&self) -> &SpeciesConfig { &self.config }
///
///     // Timberwolves never hold ground against a spear.
///     fn threat_check(&mut self, _a: &AgentState, r: &ThreatReading) -> Hook<bool> {
///         if r.category == ThreatCategory::Spear { Hook::Handled(false) } else { Hook::Continue }
///     }
/// }
/// ```
pub trait SpeciesBehavior {
    fn config(&self) -> &SpeciesConfig;

    fn pre_process(&mut self, _agent: &mut AgentState, _env: &mut TickEnv<'_>) -> Hook<Option<Mode>> {
        Hook::Continue
    }

    fn process(&mut self, _agent: &mut AgentState, _env: &mut TickEnv<'_>) -> Hook<Option<Mode>> {
        Hook::Continue
    }

    fn post_process(&mut self, _agent: &mut AgentState, _env: &mut TickEnv<'_>) -> Hook<MotionSignals> {
        Hook::Continue
    }

    /// Runs before the base enter handler for `mode`.  The context still
    /// shows the outgoing mode.
    fn enter_mode(&mut self, _agent: &mut AgentState, _mode: Mode, _env: &mut TickEnv<'_>) -> Hook<()> {
        Hook::Continue
    }

    /// Runs before the base exit handler for `mode`, which is still current.
    fn exit_mode(&mut self, _agent: &mut AgentState, _mode: Mode, _env: &mut TickEnv<'_>) -> Hook<()> {
        Hook::Continue
    }

    /// First rule of mode arbitration.  `Handled(x)` is final.
    fn resolve_mode(&mut self, _agent: &AgentState, _requested: Mode) -> Hook<Option<Mode>> {
        Hook::Continue
    }

    fn scan(&mut self, _agent: &mut AgentState, _env: &mut TickEnv<'_>) -> Hook<Option<Mode>> {
        Hook::Continue
    }

    fn detection_response(&mut self, _agent: &mut AgentState, _env: &mut TickEnv<'_>) -> Hook<Option<Mode>> {
        Hook::Continue
    }

    /// `Handled(true)` means the species committed to holding ground by its
    /// own logic; the caller requests HoldGround.
    fn hold_ground(&mut self, _agent: &mut AgentState, _env: &mut TickEnv<'_>) -> Hook<bool> {
        Hook::Continue
    }

    /// Override one category's inner-radius test.
    fn threat_check(&mut self, _agent: &AgentState, _reading: &ThreatReading) -> Hook<bool> {
        Hook::Continue
    }

    /// Called when an attack target cannot be reached, before the agent
    /// reverts to its default mode.
    fn on_cannot_reach_target(&mut self, _agent: &mut AgentState, _env: &mut TickEnv<'_>) {}

    /// Targets that force a certain flee on detection.
    fn always_flee_from(&self, target: &TargetView) -> bool {
        let config = self.config();
        match target.kind {
            Some(kind) => config.always_flee_from.contains(&kind),
            None       => target.target.is_player() && config.always_flee_from_player,
        }
    }

    /// Whether the agent may drop into Stalking right now.
    fn can_stalk(&self, agent: &AgentState) -> bool {
        self.config().can_stalk && !agent.is_dead()
    }
}

/// The base pipeline with no overrides.
#[derive(Clone, Debug)]
pub struct StandardSpecies {
    config: Arc<SpeciesConfig>,
}

impl StandardSpecies {
    pub fn new(config: Arc<SpeciesConfig>) -> Self {
        Self { config }
    }
}

impl SpeciesBehavior for StandardSpecies {
    fn config(&self) -> &SpeciesConfig {
        &self.config
    }
}
