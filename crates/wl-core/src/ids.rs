//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys without
//! ceremony.  The inner integer is `pub` to allow direct indexing into slot
//! `Vec`s, but callers should prefer the `.index()` helpers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Slot index of a spawned agent.  Never reused within one run.
    pub struct AgentId(u32);
}

typed_id! {
    /// A placed deterrent source (campfire, dropped torch, burning flare).
    pub struct SourceId(u32);
}

typed_id! {
    /// A threat field (hazard zone or safe haven).
    pub struct FieldId(u32);
}

/// Weak handle to whatever an agent is currently interested in.
///
/// Handles are resolved through the population roster on every use; a handle
/// whose entity has been destroyed simply resolves to nothing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TargetId {
    Agent(AgentId),
    Player,
}

impl TargetId {
    #[inline]
    pub fn is_player(self) -> bool {
        matches!(self, TargetId::Player)
    }

    #[inline]
    pub fn agent(self) -> Option<AgentId> {
        match self {
            TargetId::Agent(id) => Some(id),
            TargetId::Player    => None,
        }
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetId::Agent(id) => fmt::Display::fmt(id, f),
            TargetId::Player    => f.write_str("Player"),
        }
    }
}
