//! Deterrent categories evaluated by the hold-ground negotiator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A kind of environmental deterrent that can make a predator hold its ground.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ThreatCategory {
    /// Lit torch carried by the player.
    Torch,
    TorchOnGround,
    /// Campfire or other placed fire.
    Fire,
    RedFlare,
    RedFlareOnGround,
    BlueFlare,
    BlueFlareOnGround,
    /// Spear raised by the player.
    Spear,
    HazardField,
    SafeHaven,
    /// The player is locked in a struggle with another animal.
    ActiveStruggle,
}

impl ThreatCategory {
    /// Evaluation order.  The first category whose inner radius triggers wins.
    pub const PRIORITY: [ThreatCategory; 11] = [
        ThreatCategory::Torch,
        ThreatCategory::TorchOnGround,
        ThreatCategory::Fire,
        ThreatCategory::RedFlare,
        ThreatCategory::RedFlareOnGround,
        ThreatCategory::BlueFlare,
        ThreatCategory::BlueFlareOnGround,
        ThreatCategory::Spear,
        ThreatCategory::HazardField,
        ThreatCategory::SafeHaven,
        ThreatCategory::ActiveStruggle,
    ];

    pub const COUNT: usize = Self::PRIORITY.len();

    /// Position in [`PRIORITY`](Self::PRIORITY); doubles as an array index.
    pub const fn index(self) -> usize {
        match self {
            ThreatCategory::Torch             => 0,
            ThreatCategory::TorchOnGround     => 1,
            ThreatCategory::Fire              => 2,
            ThreatCategory::RedFlare          => 3,
            ThreatCategory::RedFlareOnGround  => 4,
            ThreatCategory::BlueFlare         => 5,
            ThreatCategory::BlueFlareOnGround => 6,
            ThreatCategory::Spear             => 7,
            ThreatCategory::HazardField       => 8,
            ThreatCategory::SafeHaven         => 9,
            ThreatCategory::ActiveStruggle    => 10,
        }
    }

    /// Categories whose radii come from a containing field rather than from
    /// species configuration.
    pub const fn is_field(self) -> bool {
        matches!(self, ThreatCategory::HazardField | ThreatCategory::SafeHaven)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThreatCategory::Torch             => "torch",
            ThreatCategory::TorchOnGround     => "torch_on_ground",
            ThreatCategory::Fire              => "fire",
            ThreatCategory::RedFlare          => "red_flare",
            ThreatCategory::RedFlareOnGround  => "red_flare_on_ground",
            ThreatCategory::BlueFlare         => "blue_flare",
            ThreatCategory::BlueFlareOnGround => "blue_flare_on_ground",
            ThreatCategory::Spear             => "spear",
            ThreatCategory::HazardField       => "hazard_field",
            ThreatCategory::SafeHaven         => "safe_haven",
            ThreatCategory::ActiveStruggle    => "active_struggle",
        }
    }
}

impl fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category's measurement for one agent on one tick.  Never persisted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ThreatReading {
    pub category:     ThreatCategory,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Horizontal distance from the agent to the deterrent.
    pub distance:     f32,
}

impl ThreatReading {
    #[inline]
    pub fn within_inner(&self) -> bool {
        self.distance <= self.inner_radius
    }

    #[inline]
    pub fn within_outer(&self) -> bool {
        self.distance <= self.outer_radius
    }

    /// Eased slowdown factor in `[0, 1]`: 0 at the inner radius, 1 at the
    /// outer radius.
    pub fn slowdown_factor(&self) -> f32 {
        let band = self.outer_radius - self.inner_radius;
        if band <= f32::EPSILON {
            return if self.within_inner() { 0.0 } else { 1.0 };
        }
        ((self.distance - self.inner_radius) / band).clamp(0.0, 1.0).sqrt()
    }
}
