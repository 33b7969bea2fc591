//! Zone → candidate-link index.
//!
//! Every eligible link is reduced to its representative point and bulk-loaded
//! into an R-tree.  Each zone then queries the tree with its bounding box and
//! keeps the hits its polygon actually contains.  The cost is therefore
//! proportional to the number of links near each zone rather than to
//! `zones × links`.

use geo::{BoundingRect, Contains, Point};
use rstar::{RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use hg_core::{LinkId, ZoneId};
use hg_network::Network;

use crate::{ZoneError, ZoneResult, ZoneSet};

// ── Overlap policy ────────────────────────────────────────────────────────────

/// What to do with a link whose point lies in more than one zone.
///
/// Zones of an attendance distribution are normally a partition, so overlaps
/// only appear with sloppy polygon data (shared borders digitised twice,
/// sliver overlaps).  They are always counted and logged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverlapPolicy {
    /// The link is a candidate of every zone containing it.
    #[default]
    MultiAssign,
    /// The link belongs to the first containing zone in `ZoneSet` order.
    FirstMatch,
    /// Fail with [`ZoneError::OverlappingZones`].
    Reject,
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct LinkPoint {
    point: [f64; 2],
    link:  LinkId,
}

impl RTreeObject for LinkPoint {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

// ── CandidateIndex ────────────────────────────────────────────────────────────

/// For each zone, the eligible links inside it.
///
/// Stored CSR-style: zone `z`'s links are
/// `links[offsets[z] .. offsets[z + 1]]`, sorted by `LinkId`.
#[derive(Clone, Debug, Default)]
pub struct CandidateIndex {
    offsets: Vec<u32>,
    links:   Vec<LinkId>,
}

impl CandidateIndex {
    #[inline]
    pub fn candidates(&self, zone: ZoneId) -> &[LinkId] {
        let z = zone.index();
        &self.links[self.offsets[z] as usize..self.offsets[z + 1] as usize]
    }

    pub fn zone_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Total entries over all zones (a multi-assigned link counts once per zone).
    pub fn total(&self) -> usize {
        self.links.len()
    }
}

// ── ZoneIndexer ───────────────────────────────────────────────────────────────

/// Builds a [`CandidateIndex`] from eligible links and a [`ZoneSet`].
#[derive(Clone, Debug, Default)]
pub struct ZoneIndexer {
    policy: OverlapPolicy,
}

impl ZoneIndexer {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self { policy }
    }

    pub fn index(&self, net: &Network, links: &[LinkId], zones: &ZoneSet) -> ZoneResult<CandidateIndex> {
        let entries: Vec<LinkPoint> = links
            .iter()
            .map(|&link| {
                let c = net.link_to_coord(link);
                LinkPoint { point: c.to_array(), link }
            })
            .collect();
        let tree = RTree::bulk_load(entries);

        let mut offsets = Vec::with_capacity(zones.len() + 1);
        let mut flat = Vec::new();
        let mut owner: FxHashMap<LinkId, ZoneId> = FxHashMap::default();
        let mut overlaps = 0usize;

        offsets.push(0u32);
        for (zone_id, zone) in zones.iter() {
            let mut hits: Vec<LinkId> = match zone.geometry.bounding_rect() {
                Some(rect) => {
                    let (min, max) = (rect.min(), rect.max());
                    let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);
                    tree.locate_in_envelope(&envelope)
                        .filter(|e| zone.geometry.contains(&Point::new(e.point[0], e.point[1])))
                        .map(|e| e.link)
                        .collect()
                }
                None => Vec::new(),
            };
            hits.sort_unstable();
            hits.dedup();

            for &link in &hits {
                let Some(&first) = owner.get(&link) else {
                    owner.insert(link, zone_id);
                    continue;
                };
                overlaps += 1;
                log::debug!(
                    "link {} lies in zones {} and {}",
                    net.link_ext_id(link),
                    zones.get(first).name,
                    zone.name
                );
                if self.policy == OverlapPolicy::Reject {
                    return Err(ZoneError::OverlappingZones {
                        link:   net.link_ext_id(link).to_string(),
                        first:  zones.get(first).name.to_string(),
                        second: zone.name.to_string(),
                    });
                }
            }
            if self.policy == OverlapPolicy::FirstMatch {
                hits.retain(|link| owner.get(link) == Some(&zone_id));
            }

            flat.extend_from_slice(&hits);
            offsets.push(flat.len() as u32);
        }

        if overlaps > 0 {
            log::warn!("{overlaps} link(s) fall in more than one zone ({:?})", self.policy);
        }
        log::info!(
            "indexed {} candidate links across {} zones",
            flat.len(),
            zones.len()
        );
        Ok(CandidateIndex { offsets, links: flat })
    }
}
