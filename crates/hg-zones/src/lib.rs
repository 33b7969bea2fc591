//! `hg-zones`: where synthetic agents may live.
//!
//! Takes the eligible links from `hg-network` and the zone polygons of the
//! attendance distribution, and produces a [`CandidateIndex`]: for every zone
//! the links whose representative point (terminal-node coordinate) lies
//! inside it.
//!
//! ```text
//! eligible links ──apply_mask──▶ masked links ──ZoneIndexer──▶ CandidateIndex
//!                      ▲                             ▲
//!              residential mask                   ZoneSet
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`zone`]        | `Zone`, `ZoneSet`                                     |
//! | [`load`]        | GeoJSON readers: `load_zones_geojson`, `load_mask_geojson` |
//! | [`mask`]        | `apply_mask`                                          |
//! | [`index`]       | `ZoneIndexer`, `OverlapPolicy`, `CandidateIndex`      |
//! | [`diagnostics`] | `empty_zones`, `log_candidate_report`                 |
//! | [`error`]       | `ZoneError`, `ZoneResult<T>`                          |

pub mod diagnostics;
pub mod error;
pub mod index;
pub mod load;
pub mod mask;
pub mod zone;


pub use diagnostics::{empty_zones, log_candidate_report};
pub use error::{ZoneError, ZoneResult};
pub use index::{CandidateIndex, OverlapPolicy, ZoneIndexer};
pub use load::{load_mask_geojson, load_mask_str, load_zones_geojson, load_zones_str};
pub use mask::apply_mask;
pub use zone::{Zone, ZoneSet};

/// Zone and mask geometry type.
pub type Area = geo::MultiPolygon<f64>;
