//! `hg-synth`: home-going plan synthesis.
//!
//! Turns a network and an attendance distribution into one plan per agent:
//! leave the venue some time after the event ends, travel home to a link
//! drawn from the agent's home zone.
//!
//! ```text
//! SynthBuilder::build
//!   ① validate SynthConfig
//!   ② eligible links      (hg-network LinkFilter)
//!   ③ residential mask    (hg-zones apply_mask)
//!   ④ zone index          (hg-zones ZoneIndexer) + candidate report
//!   ⑤ zone pool           (WeightedZonePool)
//! Synthesizer::synthesize
//!   for agent in 0..agent_count: offset → zone → link → Plan
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Runs `RngStrategy::PerAgent` on Rayon's thread pool.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hg_synth::{NoopObserver, SynthBuilder, SynthConfig};
//!
//! let synth = SynthBuilder::new(SynthConfig::default())
//!     .network(network)
//!     .zones(zones)
//!     .build()?;
//! let plans = synth.synthesize(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod plan;
pub mod sampler;
pub mod synth;


pub use builder::SynthBuilder;
pub use config::{EmptyZonePolicy, RngStrategy, SynthConfig};
pub use error::{SynthError, SynthResult};
pub use observer::{NoopObserver, ProgressLogger, SynthObserver};
pub use plan::{zone_counts, Activity, Leg, Plan};
pub use sampler::{SamplingMethod, WeightedZonePool};
pub use synth::Synthesizer;
