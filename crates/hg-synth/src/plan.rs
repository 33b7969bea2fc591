//! Plan records: one venue → home trip per agent.
//!
//! A [`Plan`] is immutable once produced.  Text fields are `Arc<str>` so that
//! the activity labels and zone names shared by thousands of agents are
//! stored once.

use std::collections::BTreeMap;
use std::sync::Arc;

use hg_core::{AgentId, Coord, SimTime, TransportMode};

// ── Activity / Leg ────────────────────────────────────────────────────────────

/// A stay at a location.  `end_time` is `None` for the final activity of a
/// plan, which lasts until the end of the day.
#[derive(Clone, Debug, PartialEq)]
pub struct Activity {
    pub activity_type: Arc<str>,
    pub coord:         Coord,
    pub end_time:      Option<SimTime>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    pub mode: TransportMode,
}

// ── Plan ──────────────────────────────────────────────────────────────────────

/// Venue activity, one leg, home activity.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    pub agent:       AgentId,
    pub person_id:   String,
    pub origin:      Activity,
    pub leg:         Leg,
    pub destination: Activity,
    /// Name of the zone the home was drawn from.
    pub home_zone:   Arc<str>,
    /// External id of the home link.
    pub home_link:   Arc<str>,
}

impl Plan {
    /// Departure time from the venue.
    #[inline]
    pub fn departure(&self) -> SimTime {
        self.origin.end_time.unwrap_or_default()
    }
}

/// Number of plans per home zone, ordered by zone name.
pub fn zone_counts(plans: &[Plan]) -> BTreeMap<Arc<str>, usize> {
    let mut counts = BTreeMap::new();
    for plan in plans {
        *counts.entry(Arc::clone(&plan.home_zone)).or_insert(0) += 1;
    }
    counts
}
