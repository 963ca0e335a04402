//! World and species configuration.
//!
//! Configuration values are immutable once an agent is spawned: each species
//! strategy receives its `SpeciesConfig` behind an `Arc` at construction time
//! and never mutates it.
//!
//! # TOML layout
//!
//! ```toml
//! [world]
//! seed = 7
//! frame_secs = 0.1
//!
//! [[species]]
//! name = "grey wolf"
//! kind = "Wolf"
//! default_mode = "Wander"
//!
//! [species.flee]
//! base_chance = 35.0
//! player_bonus = 15.0
//! ```
//!
//! Every table and field is optional; omitted values fall back to
//! [`SpeciesConfig::for_kind`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, Mode, SpeciesKind, ThreatCategory, WildlifeMode};

// ── WorldConfig ───────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,
    /// Real seconds per frame (`dt` passed to every agent tick).
    pub frame_secs: f32,
    /// Real seconds per in-game day.
    pub day_length_real_secs: f32,
    /// Frames to simulate in `Sim::run`.
    pub total_frames: u64,
    /// Global difficulty scalar applied to flee chances against the player.
    pub flee_chance_scalar: f32,
    /// Report a frame summary every N frames.  0 disables summaries.
    pub output_interval_frames: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed:                   0,
            frame_secs:             0.1,
            day_length_real_secs:   1_440.0,
            total_frames:           600,
            flee_chance_scalar:     1.0,
            output_interval_frames: 10,
        }
    }
}

// ── Species sub-tables ────────────────────────────────────────────────────────

/// Senses used by the target scanner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Detection range for other animals, metres.
    pub range:            f32,
    /// Detection range for the player, metres.
    pub player_range:     f32,
    /// Full field-of-view cone, degrees.
    pub fov_deg:          f32,
    /// Maximum height difference for a valid sighting, metres.
    pub height_tolerance: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            range:            40.0,
            player_range:     60.0,
            fov_deg:          200.0,
            height_tolerance: 6.0,
        }
    }
}

/// Detection-response flee chances, percent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleeConfig {
    /// Starting chance to flee a freshly detected target.
    pub base_chance:  f32,
    /// Flat bonus added when a wolf-type agent detects the player.
    pub player_bonus: f32,
}

impl Default for FleeConfig {
    fn default() -> Self {
        Self { base_chance: 50.0, player_bonus: 0.0 }
    }
}

/// Goal speeds in metres per second and turn speed in degrees per second.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub walk:    f32,
    pub stalk:   f32,
    pub run:     f32,
    pub flee:    f32,
    /// Flee speed used right after a retreat is ordered.
    pub retreat: f32,
    pub turn:    f32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            walk:    1.4,
            stalk:   2.2,
            run:     8.0,
            flee:    9.0,
            retreat: 5.0,
            turn:    180.0,
        }
    }
}

/// Inner (hold) and outer (slow down) radius for one deterrent category.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreatRadii {
    pub inner: f32,
    pub outer: f32,
}

impl ThreatRadii {
    pub const fn new(inner: f32, outer: f32) -> Self {
        Self { inner, outer }
    }
}

/// Per-category radii.  Field categories take their radii from the field
/// itself plus `field_slowdown_band`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatRadiiTable {
    pub torch:                ThreatRadii,
    pub torch_on_ground:      ThreatRadii,
    pub fire:                 ThreatRadii,
    pub red_flare:            ThreatRadii,
    pub red_flare_on_ground:  ThreatRadii,
    pub blue_flare:           ThreatRadii,
    pub blue_flare_on_ground: ThreatRadii,
    pub spear:                ThreatRadii,
    pub active_struggle:      ThreatRadii,
    /// Extra distance beyond a field's edge in which the agent slows down.
    pub field_slowdown_band:  f32,
}

impl ThreatRadiiTable {
    /// Configured radii for `category`; `None` for field categories.
    pub fn radii(&self, category: ThreatCategory) -> Option<ThreatRadii> {
        let r = match category {
            ThreatCategory::Torch             => self.torch,
            ThreatCategory::TorchOnGround     => self.torch_on_ground,
            ThreatCategory::Fire              => self.fire,
            ThreatCategory::RedFlare          => self.red_flare,
            ThreatCategory::RedFlareOnGround  => self.red_flare_on_ground,
            ThreatCategory::BlueFlare         => self.blue_flare,
            ThreatCategory::BlueFlareOnGround => self.blue_flare_on_ground,
            ThreatCategory::Spear             => self.spear,
            ThreatCategory::ActiveStruggle    => self.active_struggle,
            ThreatCategory::HazardField | ThreatCategory::SafeHaven => return None,
        };
        Some(r)
    }
}

impl Default for ThreatRadiiTable {
    fn default() -> Self {
        Self {
            torch:                ThreatRadii::new(8.0, 16.0),
            torch_on_ground:      ThreatRadii::new(6.0, 12.0),
            fire:                 ThreatRadii::new(10.0, 20.0),
            red_flare:            ThreatRadii::new(12.0, 24.0),
            red_flare_on_ground:  ThreatRadii::new(10.0, 20.0),
            blue_flare:           ThreatRadii::new(14.0, 28.0),
            blue_flare_on_ground: ThreatRadii::new(12.0, 24.0),
            spear:                ThreatRadii::new(4.0, 8.0),
            active_struggle:      ThreatRadii::new(10.0, 20.0),
            field_slowdown_band:  8.0,
        }
    }
}

/// Hold-ground negotiation tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldGroundConfig {
    /// Blend speed toward a stop inside the outer radius.
    pub allow_slowdown:                bool,
    /// Attacking agents skip the negotiator entirely.
    pub ignore_stimuli_when_attacking: bool,
    /// Seconds after holding ground for a category before that category may
    /// trigger again.
    pub cooldown_secs:                 f32,
    /// Longest continuous hold before the agent gives up and moves on.
    pub max_hold_secs:                 f32,
    pub radii:                         ThreatRadiiTable,
}

impl Default for HoldGroundConfig {
    fn default() -> Self {
        Self {
            allow_slowdown:                true,
            ignore_stimuli_when_attacking: false,
            cooldown_secs:                 3.0,
            max_hold_secs:                 20.0,
            radii:                         ThreatRadiiTable::default(),
        }
    }
}

/// Wound and bleed-out tuning.  Durations are in in-game minutes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WoundConfig {
    pub can_die_from_bleed_out:        bool,
    /// During a struggle, bleed progress stops this far short of death.
    pub struggle_bleed_margin_minutes: f32,
    /// Forced bleed-out applied when a trigger-volume flee saves the agent.
    pub trigger_volume_bleed_minutes:  f32,
    /// Damage multiplier for predators hit by the player during a global event.
    pub event_damage_scale:            f32,
    /// Wounds close on their own after this long; `None` keeps them open.
    pub recovery_minutes:              Option<f32>,
}

impl Default for WoundConfig {
    fn default() -> Self {
        Self {
            can_die_from_bleed_out:        true,
            struggle_bleed_margin_minutes: 1.0,
            trigger_volume_bleed_minutes:  30.0,
            event_damage_scale:            0.5,
            recovery_minutes:              None,
        }
    }
}

/// Durations (sim seconds) and ranges (metres) for the base mode behaviors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeTiming {
    pub idle_secs:         f32,
    pub wander_pause_secs: f32,
    pub wander_radius:     f32,
    /// Seconds an attack lasts before the attacker passes through and flees.
    pub attack_pass_secs:  f32,
    pub attack_range:      f32,
    pub flee_secs:         f32,
    pub feed_secs:         f32,
    pub investigate_secs:  f32,
    pub howl_secs:         f32,
    /// Stalking ends when the target is further than `range * this`.
    pub stalk_give_up_scale: f32,
}

impl Default for ModeTiming {
    fn default() -> Self {
        Self {
            idle_secs:           4.0,
            wander_pause_secs:   3.0,
            wander_radius:       25.0,
            attack_pass_secs:    2.5,
            attack_range:        3.0,
            flee_secs:           12.0,
            feed_secs:           30.0,
            investigate_secs:    10.0,
            howl_secs:           5.0,
            stalk_give_up_scale: 1.5,
        }
    }
}

/// Animation asset counts the motion mapper indexes into.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Number of per-side attack variants.  Zero is a configuration error
    /// surfaced at attack time.
    pub attack_sides: u8,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { attack_sides: 2 }
    }
}

// ── SpeciesConfig ─────────────────────────────────────────────────────────────

/// Immutable per-species tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesConfig {
    pub name:                    String,
    pub kind:                    SpeciesKind,
    pub start_mode:              Mode,
    pub default_mode:            Mode,
    pub max_hp:                  f32,
    pub invulnerable:            bool,
    /// Non-reactive species never run the detection response.
    pub reactive:                bool,
    pub pack_capable:            bool,
    /// Whether the species can drop into a stalking sub-state after detection.
    pub can_stalk:               bool,
    /// Families this species hunts.
    pub prey:                    Vec<SpeciesKind>,
    /// Families that force a 100 % flee chance on detection.
    pub always_flee_from:        Vec<SpeciesKind>,
    pub always_flee_from_player: bool,
    pub targets_player_only:     bool,
    pub wildlife_mode:           WildlifeMode,
    pub detection:               DetectionConfig,
    pub flee:                    FleeConfig,
    pub speeds:                  SpeedConfig,
    pub hold_ground:             HoldGroundConfig,
    pub wounds:                  WoundConfig,
    pub timing:                  ModeTiming,
    pub animation:               AnimationConfig,
}

impl SpeciesConfig {
    /// Family defaults for `kind`.
    pub fn for_kind(kind: SpeciesKind) -> Self {
        let predator = kind.is_predator();
        let prey = match kind {
            SpeciesKind::Wolf | SpeciesKind::Timberwolf => {
                vec![SpeciesKind::Deer, SpeciesKind::Rabbit, SpeciesKind::Ptarmigan]
            }
            SpeciesKind::Bear | SpeciesKind::Cougar => vec![SpeciesKind::Deer],
            _ => Vec::new(),
        };
        let (max_hp, base_chance) = match kind {
            SpeciesKind::Bear       => (300.0, 10.0),
            SpeciesKind::Moose      => (400.0, 20.0),
            SpeciesKind::Cougar     => (150.0, 0.0),
            SpeciesKind::Wolf       => (100.0, 35.0),
            SpeciesKind::Timberwolf => (120.0, 25.0),
            SpeciesKind::Deer       => (80.0, 90.0),
            SpeciesKind::Rabbit | SpeciesKind::Ptarmigan => (10.0, 100.0),
            SpeciesKind::Human      => (100.0, 0.0),
        };

        Self {
            name:                    kind.as_str().to_owned(),
            kind,
            start_mode:              Mode::Wander,
            default_mode:            Mode::Wander,
            max_hp,
            invulnerable:            false,
            reactive:                kind != SpeciesKind::Human,
            pack_capable:            kind == SpeciesKind::Timberwolf,
            can_stalk:               predator,
            prey,
            always_flee_from:        Vec::new(),
            always_flee_from_player: false,
            targets_player_only:     false,
            wildlife_mode:           WildlifeMode::Normal,
            detection:               DetectionConfig::default(),
            flee:                    FleeConfig {
                base_chance,
                player_bonus: if kind.is_wolf_type() { 15.0 } else { 0.0 },
            },
            speeds:                  SpeedConfig::default(),
            hold_ground:             HoldGroundConfig::default(),
            wounds:                  WoundConfig::default(),
            timing:                  ModeTiming::default(),
            animation:               AnimationConfig::default(),
        }
    }

    #[inline]
    pub fn is_predator(&self) -> bool {
        self.kind.is_predator()
    }

    /// Reject contradictory values that would make the behavior undefined.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.max_hp > 0.0) {
            return Err(CoreError::Config(format!("{}: max_hp must be positive", self.name)));
        }
        if matches!(self.start_mode, Mode::None) || matches!(self.default_mode, Mode::None) {
            return Err(CoreError::Config(format!(
                "{}: start_mode and default_mode must name a real mode",
                self.name
            )));
        }
        for category in ThreatCategory::PRIORITY {
            if let Some(r) = self.hold_ground.radii.radii(category) {
                if r.inner < 0.0 || r.outer < r.inner {
                    return Err(CoreError::Config(format!(
                        "{}: {category} radii must satisfy 0 <= inner <= outer",
                        self.name
                    )));
                }
            }
        }
        if self.wounds.struggle_bleed_margin_minutes < 0.0 {
            return Err(CoreError::Config(format!(
                "{}: struggle_bleed_margin_minutes must not be negative",
                self.name
            )));
        }
        Ok(())
    }
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self::for_kind(SpeciesKind::Wolf)
    }
}

// ── ScenarioConfig ────────────────────────────────────────────────────────────

/// A world plus the species that populate it, as read from one TOML file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub world:   WorldConfig,
    pub species: Vec<SpeciesConfig>,
}

impl ScenarioConfig {
    /// Parse and validate a scenario from TOML text.
    ///
    /// Each `[[species]]` table is layered over the family defaults of its
    /// `kind` before deserialization, so a deer entry that omits `flee`
    /// inherits deer flee chances rather than wolf ones.
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        let mut root: toml::Table = text.parse()?;
        if let Some(toml::Value::Array(entries)) = root.get_mut("species") {
            for entry in entries.iter_mut() {
                if let toml::Value::Table(table) = entry {
                    let kind = match table.get("kind") {
                        Some(v) => v.clone().try_into::<SpeciesKind>()?,
                        None    => SpeciesKind::Wolf,
                    };
                    let base = family_table(kind)?;
                    *table = overlay(base, std::mem::take(table));
                }
            }
        }
        let scenario: ScenarioConfig = toml::Value::Table(root).try_into()?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read, parse and validate a scenario file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.world.frame_secs > 0.0) {
            return Err(CoreError::Config("world.frame_secs must be positive".into()));
        }
        if !(self.world.day_length_real_secs > 0.0) {
            return Err(CoreError::Config("world.day_length_real_secs must be positive".into()));
        }
        self.species.iter().try_for_each(SpeciesConfig::validate)
    }

    /// Look up a species by its `name`.
    pub fn species(&self, name: &str) -> Option<&SpeciesConfig> {
        self.species.iter().find(|s| s.name == name)
    }
}

// ── TOML layering helpers ─────────────────────────────────────────────────────

fn family_table(kind: SpeciesKind) -> CoreResult<toml::Table> {
    match toml::Value::try_from(SpeciesConfig::for_kind(kind)) {
        Ok(toml::Value::Table(table)) => Ok(table),
        Ok(_)  => Err(CoreError::Config(format!("{kind}: defaults did not serialize to a table"))),
        Err(e) => Err(CoreError::Config(format!("{kind}: {e}"))),
    }
}

/// Recursively overlay `top` onto `base`; nested tables merge key by key,
/// every other value in `top` replaces the one in `base`.
fn overlay(mut base: toml::Table, top: toml::Table) -> toml::Table {
    for (key, value) in top {
        let merged = match (base.remove(&key), value) {
            (Some(toml::Value::Table(below)), toml::Value::Table(above)) => {
                toml::Value::Table(overlay(below, above))
            }
            (_, value) => value,
        };
        base.insert(key, merged);
    }
    base
}
