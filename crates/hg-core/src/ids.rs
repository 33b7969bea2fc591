//! Typed arena indices.
//!
//! Networks, zone sets and populations are stored as flat `Vec`s; these
//! wrappers are the indices into them.  External identifiers (MATSim link
//! ids, zone names, person ids) stay strings and live beside the arenas.

use std::fmt;

/// Generate a typed index wrapper around a `u32`.
macro_rules! arena_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel for "not assigned".
            pub const INVALID: $name = $name(u32::MAX);

            /// Position in the owning arena.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
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
                u32::try_from(n).map($name)
            }
        }
    };
}

arena_id! {
    /// Position of a synthetic agent in the generated population.
    pub struct AgentId;
}

arena_id! {
    /// Index of a network node.
    pub struct NodeId;
}

arena_id! {
    /// Index of a directed network link.
    pub struct LinkId;
}

arena_id! {
    /// Index of a zone polygon in its `ZoneSet`.
    pub struct ZoneId;
}
