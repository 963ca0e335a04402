//! The published population: one read-only snapshot per live agent plus the
//! player.
//!
//! The driver publishes each agent's snapshot right after its tick, so agents
//! ticked later in the same frame see the fresh values.  Target handles are
//! resolved here on every use; a handle with no entry is an ordinary "no
//! target".

use std::sync::Arc;

use wl_core::{AgentId, SpeciesKind, TargetId, Vec3};

// ── Published ─────────────────────────────────────────────────────────────────

/// What other agents may know about one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct Published {
    pub id:         AgentId,
    /// `None` for an entity of unknown class.  Scanners always ignore those.
    pub kind:       Option<SpeciesKind>,
    pub position:   Vec3,
    pub alive:      bool,
    /// Set once the entity has been removed from the world.
    pub destroyed:  bool,
    /// Wounded, stunned or otherwise easy prey.
    pub vulnerable: bool,
    /// Families this agent hunts.
    pub prey:       Arc<[SpeciesKind]>,
}

impl Published {
    /// `true` if this agent hunts `kind`.
    #[inline]
    pub fn hunts(&self, kind: SpeciesKind) -> bool {
        self.prey.contains(&kind)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Something the player holds that wildlife may react to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum HeldItem {
    Torch,
    RedFlare,
    BlueFlare,
    Spear,
    Other,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSnapshot {
    pub position:        Vec3,
    pub forward:         Vec3,
    pub alive:           bool,
    /// Debug invisibility; wildlife never targets the player while set.
    pub invisible_to_ai: bool,
    /// The animal currently locked in a struggle with the player.
    pub struggling_with: Option<AgentId>,
    pub held:            Option<HeldItem>,
}

impl PlayerSnapshot {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            forward:         Vec3::FORWARD,
            alive:           true,
            invisible_to_ai: false,
            struggling_with: None,
            held:            None,
        }
    }

    #[inline]
    pub fn in_struggle(&self) -> bool {
        self.struggling_with.is_some()
    }
}

// ── TargetView ────────────────────────────────────────────────────────────────

/// A resolved target handle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TargetView {
    pub target:   TargetId,
    pub kind:     Option<SpeciesKind>,
    pub position: Vec3,
    pub alive:    bool,
}

// ── Roster ────────────────────────────────────────────────────────────────────

/// Slot-indexed population snapshot.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    entries: Vec<Option<Published>>,
    player:  Option<PlayerSnapshot>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or refresh an agent's snapshot.
    ///
    /// A dead agent whose entry has already been pruned stays pruned.
    pub fn publish(&mut self, entry: Published) {
        let idx = entry.id.index();
        if idx >= self.entries.len() {
            self.entries.resize(idx + 1, None);
        }
        let slot = &mut self.entries[idx];
        if slot.is_none() && !entry.alive {
            return;
        }
        *slot = Some(entry);
    }

    /// Flag an entity as removed.  The next prune drops it.
    pub fn mark_destroyed(&mut self, id: AgentId) {
        if let Some(Some(entry)) = self.entries.get_mut(id.index()) {
            entry.destroyed = true;
            entry.alive = false;
        }
    }

    /// Drop every dead or destroyed entry.  Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let mut removed = 0;
        for slot in &mut self.entries {
            if slot.as_ref().is_some_and(|e| !e.alive || e.destroyed) {
                *slot = None;
                removed += 1;
            }
        }
        removed
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Published> {
        self.entries.get(id.index()).and_then(Option::as_ref)
    }

    /// Every entry currently held, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Published> {
        self.entries.iter().filter_map(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    // ── Player ────────────────────────────────────────────────────────────

    #[inline]
    pub fn player(&self) -> Option<&PlayerSnapshot> {
        self.player.as_ref()
    }

    pub fn set_player(&mut self, player: PlayerSnapshot) {
        self.player = Some(player);
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerSnapshot> {
        self.player.as_mut()
    }

    pub fn clear_player(&mut self) {
        self.player = None;
    }

    // ── Handle resolution ─────────────────────────────────────────────────

    /// Look up a target handle.  `None` when the entity no longer exists.
    pub fn resolve(&self, target: TargetId) -> Option<TargetView> {
        match target {
            TargetId::Player => self.player.as_ref().map(|p| TargetView {
                target,
                kind:     None,
                position: p.position,
                alive:    p.alive,
            }),
            TargetId::Agent(id) => self.get(id).filter(|e| !e.destroyed).map(|e| TargetView {
                target,
                kind:     e.kind,
                position: e.position,
                alive:    e.alive,
            }),
        }
    }
}
