//! `hg-core`: foundational types for the `homegoing` population synthesizer.
//!
//! This crate is a dependency of every other `hg-*` crate.  It intentionally
//! has no `hg-*` dependencies and minimal external ones (`rand`, `thiserror`
//! and the `log` facade, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`, `LinkId`, `ZoneId`               |
//! | [`coord`]       | `Coord` (planar, projected CRS)                       |
//! | [`time`]        | `SimTime` (seconds since midnight)                    |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (shared)             |
//! | [`transport`]   | `TransportMode` enum, `ModeSet` bitset                |
//! | [`error`]       | `HgError`, `HgResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `hg-synth` for its JSON configuration.         |

pub mod coord;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::Coord;
pub use error::{HgError, HgResult};
pub use ids::{AgentId, LinkId, NodeId, ZoneId};
pub use rng::{AgentRng, SimRng};
pub use time::SimTime;
pub use transport::{ModeSet, TransportMode};
