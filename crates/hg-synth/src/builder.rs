//! Fluent builder for constructing a [`Synthesizer`].

use std::sync::Arc;

use hg_network::Network;
use hg_zones::{apply_mask, empty_zones, log_candidate_report, Area, ZoneIndexer, ZoneSet};

use crate::{
    EmptyZonePolicy, NoopObserver, SynthConfig, SynthError, SynthObserver, SynthResult,
    Synthesizer, WeightedZonePool,
};

/// Fluent builder for [`Synthesizer`].
///
/// # Inputs
///
/// | Method         | Required | Default            |
/// |----------------|----------|--------------------|
/// | `.network(n)`  | yes      |                    |
/// | `.zones(z)`    | yes      |                    |
/// | `.mask(m)`     | no       | every link passes  |
///
/// `build` runs the whole preparation pipeline:
///
/// ```text
/// validate config → eligible links → mask → zone index → report → zone pool
/// ```
///
/// Any configuration or data error surfaces here, before a single plan is
/// drawn.
///
/// # Example
///
/// ```rust,ignore
/// let synth = SynthBuilder::new(SynthConfig::default())
///     .network(load_matsim_network(path)?)
///     .zones(load_zones_geojson(zones_path, "Gemeinde_n", "Fansnumber")?)
///     .build()?;
/// let plans = synth.synthesize(&mut NoopObserver)?;
/// ```
pub struct SynthBuilder {
    config:  SynthConfig,
    network: Option<Network>,
    zones:   Option<ZoneSet>,
    mask:    Option<Area>,
}

impl SynthBuilder {
    pub fn new(config: SynthConfig) -> Self {
        Self { config, network: None, zones: None, mask: None }
    }

    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    pub fn zones(mut self, zones: ZoneSet) -> Self {
        self.zones = Some(zones);
        self
    }

    /// Restrict home links to those ending inside `mask`.
    pub fn mask(mut self, mask: Area) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn build(self) -> SynthResult<Synthesizer> {
        self.build_with(&mut NoopObserver)
    }

    /// Like [`build`](Self::build), reporting the candidate index to
    /// `observer`.
    pub fn build_with<O: SynthObserver>(self, observer: &mut O) -> SynthResult<Synthesizer> {
        let config = self.config;
        config.validate()?;
        let network = self.network.ok_or_else(|| SynthError::Config("no network supplied".into()))?;
        let zones = self.zones.ok_or_else(|| SynthError::Config("no zones supplied".into()))?;
        if zones.is_empty() {
            return Err(SynthError::Config("zone set is empty".into()));
        }

        // ── Candidate links ───────────────────────────────────────────────
        let eligible = config.link_filter()?.eligible_links(&network)?;
        let masked = apply_mask(&network, eligible, self.mask.as_ref());
        let index = ZoneIndexer::new(config.overlap).index(&network, &masked, &zones)?;

        log_candidate_report(&index, &zones);
        observer.on_indexed(&index, &zones);

        // ── Zone pool ─────────────────────────────────────────────────────
        let mut weights = zones.weights();
        if config.empty_zone == EmptyZonePolicy::ExcludeFromPool {
            for name in empty_zones(&index, &zones) {
                let Some(id) = zones.id_of(name) else { continue };
                if weights[id.index()] > 0.0 {
                    log::warn!(
                        "zone {name} has no home links; excluding its weight {} from the pool",
                        weights[id.index()]
                    );
                    weights[id.index()] = 0.0;
                }
            }
        }
        let pool = WeightedZonePool::build(&weights, config.sampling, config.seed)?;

        Ok(Synthesizer {
            origin_type: Arc::from(config.origin_activity_type.as_str()),
            home_type:   Arc::from(config.home_activity_type.as_str()),
            config,
            network,
            zones,
            index,
            pool,
        })
    }
}
