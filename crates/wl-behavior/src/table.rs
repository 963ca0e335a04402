//! `ModeTable` — the mode → handlers dispatch map.
//!
//! Built once at startup and shared between agents behind an `Arc`.  Modes
//! without an entry (including every `Mode::Custom` a species has not
//! registered) dispatch to [`ModeHandlers::NOOP`].

use rustc_hash::FxHashMap;

use wl_agent::AgentState;
use wl_core::{Mode, SpeciesConfig};

use crate::{BehaviorError, BehaviorResult, SpeciesBehavior, TickEnv};

/// Per-tick behavior of a mode.  Returns the mode it wants next, if any.
pub type ProcessFn = fn(&mut AgentState, &mut dyn SpeciesBehavior, &mut TickEnv<'_>) -> Option<Mode>;

/// Runs when a mode is entered.  The context still shows the outgoing mode.
pub type EnterFn = fn(&mut AgentState, &SpeciesConfig, &mut TickEnv<'_>);

/// Runs when a mode is left.  The context still shows that mode as current.
pub type ExitFn = fn(&mut AgentState, &SpeciesConfig, &mut TickEnv<'_>);

fn noop_enter(_: &mut AgentState, _: &SpeciesConfig, _: &mut TickEnv<'_>) {}

fn noop_process(_: &mut AgentState, _: &mut dyn SpeciesBehavior, _: &mut TickEnv<'_>) -> Option<Mode> {
    None
}

#[derive(Copy, Clone)]
pub struct ModeHandlers {
    pub enter:   EnterFn,
    pub process: ProcessFn,
    pub exit:    ExitFn,
}

impl ModeHandlers {
    /// Does nothing and never requests a transition.
    pub const NOOP: ModeHandlers = ModeHandlers {
        enter:   noop_enter,
        process: noop_process,
        exit:    noop_enter,
    };

    /// Only a process step; enter and exit do nothing.
    pub const fn process(process: ProcessFn) -> Self {
        Self { process, ..Self::NOOP }
    }

    pub const fn with_enter(mut self, enter: EnterFn) -> Self {
        self.enter = enter;
        self
    }

    pub const fn with_exit(mut self, exit: ExitFn) -> Self {
        self.exit = exit;
        self
    }
}

impl std::fmt::Debug for ModeHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeHandlers").finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ModeTable {
    handlers: FxHashMap<Mode, ModeHandlers>,
}

impl ModeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register handlers for a mode that has none yet.
    pub fn register(&mut self, mode: Mode, handlers: ModeHandlers) -> BehaviorResult<()> {
        if self.handlers.contains_key(&mode) {
            return Err(BehaviorError::DuplicateMode(mode));
        }
        self.handlers.insert(mode, handlers);
        Ok(())
    }

    /// Install `handlers` for `mode`, returning whatever they replaced.
    pub fn replace(&mut self, mode: Mode, handlers: ModeHandlers) -> Option<ModeHandlers> {
        self.handlers.insert(mode, handlers)
    }

    /// Handlers for `mode`, falling back to [`ModeHandlers::NOOP`].
    #[inline]
    pub fn get(&self, mode: Mode) -> &ModeHandlers {
        self.handlers.get(&mode).unwrap_or(&ModeHandlers::NOOP)
    }

    #[inline]
    pub fn contains(&self, mode: Mode) -> bool {
        self.handlers.contains_key(&mode)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
