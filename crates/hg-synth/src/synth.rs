//! `Synthesizer`: draws one home-going plan per agent.

use std::sync::Arc;

use hg_core::{AgentId, AgentRng, SimRng};
use hg_network::Network;
use hg_zones::{CandidateIndex, ZoneSet};
use rand::Rng;

use crate::{
    Activity, Leg, Plan, RngStrategy, SynthConfig, SynthError, SynthObserver, SynthResult,
    WeightedZonePool,
};

/// The assembled pipeline state.  Construct with
/// [`SynthBuilder`][crate::SynthBuilder].
///
/// Everything here is read-only during synthesis.
///
/// # Per-agent draw order
///
/// ```text
/// offset ~ U[0, window)          departure = event_end_time + offset
/// zone   ~ pool                  (weights ∝ attendance)
/// link   ~ U(candidates[zone])   home = link's terminal-node coordinate
/// ```
///
/// The order is fixed: the same seed and inputs reproduce the same plans.
pub struct Synthesizer {
    pub(crate) config:  SynthConfig,
    pub(crate) network: Network,
    pub(crate) zones:   ZoneSet,
    pub(crate) index:   CandidateIndex,
    pub(crate) pool:    WeightedZonePool,
    pub(crate) origin_type: Arc<str>,
    pub(crate) home_type:   Arc<str>,
}

impl Synthesizer {
    /// Generate `config.agent_count` plans, in agent order.
    ///
    /// Either every plan is produced or an error is returned; there is no
    /// partial population.  `observer.on_plan` is only called once the whole
    /// population has been drawn successfully.
    pub fn synthesize<O: SynthObserver>(&self, observer: &mut O) -> SynthResult<Vec<Plan>> {
        let plans = match self.config.rng {
            RngStrategy::Shared => {
                let mut rng = SimRng::new(self.config.seed);
                (0..self.config.agent_count)
                    .map(|i| self.draw_plan(AgentId(i), rng.inner()))
                    .collect::<SynthResult<Vec<_>>>()?
            }
            RngStrategy::PerAgent => self.per_agent()?,
        };
        for plan in &plans {
            observer.on_plan(plan);
        }
        observer.on_finish(&plans);
        Ok(plans)
    }

    /// The plan of `agent` under [`RngStrategy::PerAgent`].
    ///
    /// Independent of every other agent, so it can be computed in any order.
    pub fn plan_for_agent(&self, agent: AgentId) -> SynthResult<Plan> {
        let mut rng = AgentRng::new(self.config.seed, agent);
        self.draw_plan(agent, rng.inner())
    }

    #[cfg(not(feature = "parallel"))]
    fn per_agent(&self) -> SynthResult<Vec<Plan>> {
        (0..self.config.agent_count)
            .map(|i| self.plan_for_agent(AgentId(i)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn per_agent(&self) -> SynthResult<Vec<Plan>> {
        use rayon::prelude::*;

        (0..self.config.agent_count)
            .into_par_iter()
            .map(|i| self.plan_for_agent(AgentId(i)))
            .collect()
    }

    fn draw_plan<R: Rng + ?Sized>(&self, agent: AgentId, rng: &mut R) -> SynthResult<Plan> {
        let cfg = &self.config;

        let offset = rng.gen_range(0..cfg.departure_window_secs);
        let zone_id = self.pool.draw(rng);
        let zone = self.zones.get(zone_id);
        let candidates = self.index.candidates(zone_id);
        if candidates.is_empty() {
            return Err(SynthError::EmptyZone { zone: zone.name.to_string() });
        }
        let link = candidates[rng.gen_range(0..candidates.len())];

        Ok(Plan {
            agent,
            person_id: format!("{}{}", cfg.person_id_prefix, agent.0),
            origin: Activity {
                activity_type: Arc::clone(&self.origin_type),
                coord:         cfg.venue,
                end_time:      Some(cfg.event_end_time.offset(offset)),
            },
            leg: Leg { mode: cfg.leg_mode },
            destination: Activity {
                activity_type: Arc::clone(&self.home_type),
                coord:         self.network.link_to_coord(link),
                end_time:      None,
            },
            home_zone: Arc::clone(&zone.name),
            home_link: Arc::clone(self.network.link_ext_id(link)),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }

    pub fn index(&self) -> &CandidateIndex {
        &self.index
    }

    pub fn pool(&self) -> &WeightedZonePool {
        &self.pool
    }
}
