//! Run parameters.
//!
//! [`SynthConfig`] deserializes from JSON; every field is optional and falls
//! back to the value used for the Olympiastadion home-going scenario:
//!
//! ```json
//! { "agent_count": 20000, "seed": 7, "sampling": "expanded" }
//! ```

use std::path::Path;

use hg_core::{Coord, ModeSet, SimTime, TransportMode};
use hg_network::{LinkFilter, MissingRoadTypePolicy};
use hg_zones::OverlapPolicy;
use serde::{Deserialize, Serialize};

use crate::{SamplingMethod, SynthError, SynthResult};

// ── Policies ──────────────────────────────────────────────────────────────────

/// Which generator(s) drive the per-agent draws.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RngStrategy {
    /// One generator seeded once, consumed in agent order.
    #[default]
    Shared,
    /// An independent generator per agent derived from `(seed, agent)`.
    /// Agents can then be generated in any order or in parallel.
    PerAgent,
}

/// What happens when the sampler could draw a zone without candidate links.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyZonePolicy {
    /// Abort the run with [`SynthError::EmptyZone`] when such a zone is drawn.
    #[default]
    Fail,
    /// Give empty zones weight 0 before the pool is built, so they are never
    /// drawn.  Their attendance is spread proportionally over the others.
    ExcludeFromPool,
}

// ── SynthConfig ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthConfig {
    /// Number of agents (plans) to generate.
    pub agent_count: u32,

    /// End of the event; the earliest departure.
    pub event_end_time: SimTime,

    /// Departures are uniform in `[event_end_time, event_end_time + window)`.
    pub departure_window_secs: u32,

    pub venue: Coord,

    pub leg_mode: TransportMode,

    pub seed: u64,

    /// Person ids are `{prefix}{agent index}`.
    pub person_id_prefix: String,
    pub origin_activity_type: String,
    pub home_activity_type: String,

    // Link eligibility.
    pub allowed_modes: Vec<TransportMode>,
    pub max_link_length_m: f64,
    pub excluded_road_types: Vec<String>,
    pub missing_road_type: MissingRoadTypePolicy,

    // Zone data.
    pub zone_name_property: String,
    pub zone_weight_property: String,
    pub overlap: OverlapPolicy,
    pub empty_zone: EmptyZonePolicy,

    pub sampling: SamplingMethod,
    pub rng: RngStrategy,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            agent_count:           50_000,
            event_end_time:        SimTime::from_hms(22, 0, 0),
            departure_window_secs: 1_800,
            venue:                 Coord::new(4_584_569.8, 5_820_911.8),
            leg_mode:              TransportMode::Pt,
            seed:                  1,
            person_id_prefix:      "football_fan_".into(),
            origin_activity_type:  "dummy".into(),
            home_activity_type:    "dummy".into(),
            allowed_modes:         vec![TransportMode::Car],
            max_link_length_m:     250.0,
            excluded_road_types:   ["motorway", "motorway_link", "trunk", "trunk_link"]
                .into_iter()
                .map(String::from)
                .collect(),
            missing_road_type:     MissingRoadTypePolicy::default(),
            zone_name_property:    "Gemeinde_n".into(),
            zone_weight_property:  "Fansnumber".into(),
            overlap:               OverlapPolicy::default(),
            empty_zone:            EmptyZonePolicy::default(),
            sampling:              SamplingMethod::default(),
            rng:                   RngStrategy::default(),
        }
    }
}

impl SynthConfig {
    /// Read a JSON config file.  The result is validated.
    pub fn from_json_file(path: &Path) -> SynthResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter values for which no population can be produced.
    pub fn validate(&self) -> SynthResult<()> {
        if self.agent_count == 0 {
            return Err(SynthError::Config("agent_count must be positive".into()));
        }
        if self.departure_window_secs == 0 {
            return Err(SynthError::Config("departure_window_secs must be positive".into()));
        }
        if self.event_end_time.secs().checked_add(self.departure_window_secs).is_none() {
            return Err(SynthError::Config("event_end_time + departure window overflows".into()));
        }
        if !self.venue.is_finite() {
            return Err(SynthError::Config(format!("venue {} is not finite", self.venue)));
        }
        if self.allowed_modes.is_empty() {
            return Err(SynthError::Config("allowed_modes is empty".into()));
        }
        if !(self.max_link_length_m.is_finite() && self.max_link_length_m > 0.0) {
            return Err(SynthError::Config(format!(
                "max_link_length_m must be positive, got {}",
                self.max_link_length_m
            )));
        }
        Ok(())
    }

    /// The link filter described by the eligibility fields.
    pub fn link_filter(&self) -> SynthResult<LinkFilter> {
        let modes: ModeSet = self.allowed_modes.iter().copied().collect();
        Ok(LinkFilter::new(modes, self.max_link_length_m)?
            .exclude_road_types(self.excluded_road_types.iter().cloned())
            .missing_road_type(self.missing_road_type))
    }
}
