//! Synthesis observer trait for progress reporting and data collection.

use hg_zones::{CandidateIndex, ZoneSet};

use crate::Plan;

/// Callbacks invoked by [`SynthBuilder::build`][crate::SynthBuilder::build]
/// and [`Synthesizer::synthesize`][crate::Synthesizer::synthesize].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: count plans per zone as they are produced
///
/// ```rust,ignore
/// struct ZoneTally(HashMap<Arc<str>, usize>);
///
/// impl SynthObserver for ZoneTally {
///     fn on_plan(&mut self, plan: &Plan) {
///         *self.0.entry(plan.home_zone.clone()).or_default() += 1;
///     }
/// }
/// ```
pub trait SynthObserver {
    /// Called once the candidate index is complete, before any plan is drawn.
    fn on_indexed(&mut self, _index: &CandidateIndex, _zones: &ZoneSet) {}

    /// Called for every plan, in agent order.
    fn on_plan(&mut self, _plan: &Plan) {}

    /// Called once after the last plan.
    fn on_finish(&mut self, _plans: &[Plan]) {}
}

/// A [`SynthObserver`] that does nothing.
pub struct NoopObserver;

impl SynthObserver for NoopObserver {}

/// Logs an index summary and a progress line every `interval` plans.
pub struct ProgressLogger {
    interval: usize,
    seen:     usize,
}

impl ProgressLogger {
    pub fn new(interval: usize) -> Self {
        Self { interval: interval.max(1), seen: 0 }
    }
}

impl SynthObserver for ProgressLogger {
    fn on_indexed(&mut self, index: &CandidateIndex, zones: &ZoneSet) {
        log::info!(
            "{} candidate links in {} zones, {} zone(s) empty",
            index.total(),
            zones.len(),
            hg_zones::empty_zones(index, zones).len()
        );
    }

    fn on_plan(&mut self, _plan: &Plan) {
        self.seen += 1;
        if self.seen % self.interval == 0 {
            log::info!("generated {} plans", self.seen);
        }
    }

    fn on_finish(&mut self, plans: &[Plan]) {
        log::info!("finished: {} plans", plans.len());
    }
}
