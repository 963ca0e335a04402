//! Species families.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The animal family an agent belongs to.
///
/// Family-level rules (wolves ignore moose, cougars never flee the player,
/// …) key off this value; per-individual tuning lives in `SpeciesConfig`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SpeciesKind {
    Wolf,
    Timberwolf,
    Bear,
    Cougar,
    Moose,
    Deer,
    Rabbit,
    Ptarmigan,
    /// Fully scripted human NPC.
    Human,
}

impl SpeciesKind {
    #[inline]
    pub const fn is_predator(self) -> bool {
        matches!(
            self,
            SpeciesKind::Wolf | SpeciesKind::Timberwolf | SpeciesKind::Bear | SpeciesKind::Cougar
        )
    }

    #[inline]
    pub const fn is_wolf_type(self) -> bool {
        matches!(self, SpeciesKind::Wolf | SpeciesKind::Timberwolf)
    }

    /// Small animals that never register as a threat to anything.
    #[inline]
    pub const fn is_ambient(self) -> bool {
        matches!(self, SpeciesKind::Rabbit | SpeciesKind::Ptarmigan)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpeciesKind::Wolf       => "wolf",
            SpeciesKind::Timberwolf => "timberwolf",
            SpeciesKind::Bear       => "bear",
            SpeciesKind::Cougar     => "cougar",
            SpeciesKind::Moose      => "moose",
            SpeciesKind::Deer       => "deer",
            SpeciesKind::Rabbit     => "rabbit",
            SpeciesKind::Ptarmigan  => "ptarmigan",
            SpeciesKind::Human      => "human",
        }
    }
}

impl fmt::Display for SpeciesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which animal targets an agent may consider.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum WildlifeMode {
    #[default]
    Normal,
    /// Non-player targets only count while they stand inside an active
    /// hazard field.
    HazardBound,
}
