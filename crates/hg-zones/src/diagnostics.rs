//! Zone coverage report.
//!
//! A zone with no candidate links is not an error at index time; it only
//! becomes one if the sampler later draws it.

use crate::{CandidateIndex, ZoneSet};

/// Names of the zones with zero candidate links, in zone order.
pub fn empty_zones<'a>(index: &CandidateIndex, zones: &'a ZoneSet) -> Vec<&'a str> {
    zones
        .iter()
        .filter(|(id, _)| index.candidates(*id).is_empty())
        .map(|(_, zone)| &*zone.name)
        .collect()
}

/// Log the candidate count of every zone, warning for the empty ones.
pub fn log_candidate_report(index: &CandidateIndex, zones: &ZoneSet) {
    for (id, zone) in zones.iter() {
        let n = index.candidates(id).len();
        if n == 0 {
            log::warn!("zone {} has no suitable home links", zone.name);
        } else {
            log::info!("zone {}: {} home links", zone.name, n);
        }
    }
}
