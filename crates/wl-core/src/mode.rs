//! Behavior modes and their static flag sets.
//!
//! Every agent occupies exactly one [`Mode`] at a time.  Three named flag
//! sets are derived from the enumeration at compile time:
//!
//! | Set                    | Meaning                                                |
//! |------------------------|--------------------------------------------------------|
//! | `MOVEMENT_ALLOWED`     | the mode drives locomotion (non-zero goal speed)       |
//! | `TYPICAL_DONT_INTERRUPT` | ordinary behavior requests should not pre-empt it    |
//! | `EARLY_OUT_HOLD_GROUND`| the threat negotiator never runs in this mode          |
//!
//! `Mode::Custom(n)` is the species-extension range.  Custom modes carry no
//! flags and bypass most of the transition arbitration rules.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── ModeFlags ─────────────────────────────────────────────────────────────────

/// Bitset of the named flag sets a mode belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct ModeFlags(u8);

impl ModeFlags {
    pub const NONE: ModeFlags = ModeFlags(0);
    pub const MOVEMENT_ALLOWED: ModeFlags = ModeFlags(1 << 0);
    pub const TYPICAL_DONT_INTERRUPT: ModeFlags = ModeFlags(1 << 1);
    pub const EARLY_OUT_HOLD_GROUND: ModeFlags = ModeFlags(1 << 2);

    #[inline]
    pub const fn union(self, other: ModeFlags) -> ModeFlags {
        ModeFlags(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: ModeFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

// ── Mode ──────────────────────────────────────────────────────────────────────

/// A mutually exclusive behavior state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Mode {
    /// "No mode requested".  Normalized to `Idle` during arbitration.
    #[default]
    None,
    Idle,
    Wander,
    WanderPaused,
    PatrolPointsOfInterest,
    FollowWaypoints,
    Stalking,
    Attack,
    Flee,
    HoldGround,
    Feeding,
    Investigate,
    InvestigateFood,
    Howl,
    Sleep,
    Dead,
    Stunned,
    Struggle,
    ScriptedSequence,
    /// Species-specific extension mode.
    Custom(u16),
}

impl Mode {
    /// Every vanilla-known mode, in declaration order.
    pub const VANILLA: [Mode; 19] = [
        Mode::None,
        Mode::Idle,
        Mode::Wander,
        Mode::WanderPaused,
        Mode::PatrolPointsOfInterest,
        Mode::FollowWaypoints,
        Mode::Stalking,
        Mode::Attack,
        Mode::Flee,
        Mode::HoldGround,
        Mode::Feeding,
        Mode::Investigate,
        Mode::InvestigateFood,
        Mode::Howl,
        Mode::Sleep,
        Mode::Dead,
        Mode::Stunned,
        Mode::Struggle,
        Mode::ScriptedSequence,
    ];

    /// Static flag membership.
    pub const fn flags(self) -> ModeFlags {
        const MOVE: ModeFlags = ModeFlags::MOVEMENT_ALLOWED;
        const DONT: ModeFlags = ModeFlags::TYPICAL_DONT_INTERRUPT;
        const EARLY: ModeFlags = ModeFlags::EARLY_OUT_HOLD_GROUND;

        match self {
            Mode::Wander
            | Mode::PatrolPointsOfInterest
            | Mode::FollowWaypoints
            | Mode::Stalking
            | Mode::Attack
            | Mode::Investigate
            | Mode::InvestigateFood => MOVE,
            Mode::Flee => MOVE.union(EARLY),
            Mode::Dead | Mode::Stunned | Mode::Struggle | Mode::ScriptedSequence => {
                DONT.union(EARLY)
            }
            Mode::HoldGround | Mode::Sleep => EARLY,
            Mode::None
            | Mode::Idle
            | Mode::WanderPaused
            | Mode::Feeding
            | Mode::Howl
            | Mode::Custom(_) => ModeFlags::NONE,
        }
    }

    #[inline]
    pub const fn is_movement_allowed(self) -> bool {
        self.flags().contains(ModeFlags::MOVEMENT_ALLOWED)
    }

    #[inline]
    pub const fn is_typical_dont_interrupt(self) -> bool {
        self.flags().contains(ModeFlags::TYPICAL_DONT_INTERRUPT)
    }

    #[inline]
    pub const fn is_early_out_hold_ground(self) -> bool {
        self.flags().contains(ModeFlags::EARLY_OUT_HOLD_GROUND)
    }

    /// `false` only for the species-extension range.
    #[inline]
    pub const fn is_vanilla(self) -> bool {
        !matches!(self, Mode::Custom(_))
    }

    /// Human-readable label, used as the CSV column value.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::None                   => "none",
            Mode::Idle                   => "idle",
            Mode::Wander                 => "wander",
            Mode::WanderPaused           => "wander_paused",
            Mode::PatrolPointsOfInterest => "patrol_points_of_interest",
            Mode::FollowWaypoints        => "follow_waypoints",
            Mode::Stalking               => "stalking",
            Mode::Attack                 => "attack",
            Mode::Flee                   => "flee",
            Mode::HoldGround             => "hold_ground",
            Mode::Feeding                => "feeding",
            Mode::Investigate            => "investigate",
            Mode::InvestigateFood        => "investigate_food",
            Mode::Howl                   => "howl",
            Mode::Sleep                  => "sleep",
            Mode::Dead                   => "dead",
            Mode::Stunned                => "stunned",
            Mode::Struggle               => "struggle",
            Mode::ScriptedSequence       => "scripted_sequence",
            Mode::Custom(_)              => "custom",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Custom(n) => write!(f, "custom#{n}"),
            other           => f.write_str(other.as_str()),
        }
    }
}
