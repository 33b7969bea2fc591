//! `hg-network`: road network, link eligibility, and network readers.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `Network` (SoA link/node arena), `NetworkBuilder`, `LinkSpec` |
//! | [`filter`]  | `LinkFilter`, `MissingRoadTypePolicy`                        |
//! | [`csv`]     | `load_links_csv`, `load_links_reader`                        |
//! | [`matsim`]  | `load_matsim_network`, `load_matsim_reader`                  |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on filter policy types.    |

pub mod csv;
pub mod error;
pub mod filter;
mod input;
pub mod matsim;
pub mod network;

#[cfg(test)]
mod tests;

pub use self::csv::{load_links_csv, load_links_reader};
pub use error::{NetworkError, NetworkResult};
pub use filter::{LinkFilter, MissingRoadTypePolicy};
pub use matsim::{load_matsim_network, load_matsim_reader};
pub use network::{LinkSpec, Network, NetworkBuilder};
