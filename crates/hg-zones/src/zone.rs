//! Zones of the attendance distribution.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use hg_core::ZoneId;

use crate::{Area, ZoneError, ZoneResult};

/// A named polygon with the number of attendees living there.
#[derive(Clone, Debug)]
pub struct Zone {
    pub name:     Arc<str>,
    /// Attendance count.  Any finite, non-negative number; a zone with
    /// weight 0 is indexed and reported but never drawn.
    pub weight:   f64,
    pub geometry: Area,
}

impl Zone {
    pub fn new(name: impl Into<Arc<str>>, weight: f64, geometry: Area) -> Self {
        Self { name: name.into(), weight, geometry }
    }
}

/// The zones of one distribution, addressable by [`ZoneId`] (their position)
/// or by name.
#[derive(Clone, Debug)]
pub struct ZoneSet {
    zones:   Vec<Zone>,
    by_name: FxHashMap<Arc<str>, ZoneId>,
}

impl ZoneSet {
    /// Validate and index `zones`.
    ///
    /// Fails on a repeated name or on a negative / non-finite weight.  An
    /// all-zero set is accepted here: whether that is fatal depends on what
    /// the caller samples, and is decided when the zone pool is built.
    pub fn new(zones: Vec<Zone>) -> ZoneResult<Self> {
        let mut by_name = FxHashMap::default();
        for (i, zone) in zones.iter().enumerate() {
            if !(zone.weight.is_finite() && zone.weight >= 0.0) {
                return Err(ZoneError::InvalidWeight {
                    zone:  zone.name.to_string(),
                    value: zone.weight.to_string(),
                });
            }
            if by_name.insert(Arc::clone(&zone.name), ZoneId(i as u32)).is_some() {
                return Err(ZoneError::DuplicateZone(zone.name.to_string()));
            }
        }
        Ok(Self { zones, by_name })
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    #[inline]
    pub fn get(&self, id: ZoneId) -> &Zone {
        &self.zones[id.index()]
    }

    pub fn id_of(&self, name: &str) -> Option<ZoneId> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, &Zone)> + '_ {
        self.zones.iter().enumerate().map(|(i, z)| (ZoneId(i as u32), z))
    }

    /// Weights in `ZoneId` order.
    pub fn weights(&self) -> Vec<f64> {
        self.zones.iter().map(|z| z.weight).collect()
    }

    pub fn total_weight(&self) -> f64 {
        self.zones.iter().map(|z| z.weight).sum()
    }
}
