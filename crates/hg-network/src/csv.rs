//! CSV link-table reader.
//!
//! # CSV format
//!
//! One row per directed link.  Nodes are implicit: every distinct `from` /
//! `to` id becomes one node, positioned by the coordinates of its first
//! occurrence.
//!
//! ```csv
//! id,from,to,from_x,from_y,to_x,to_y,length,modes,type
//! 1,n1,n2,4584500.0,5820900.0,4584620.0,5820900.0,120.0,"car,ride",residential
//! 2,n2,n3,4584620.0,5820900.0,4585620.0,5820900.0,1000.0,car,motorway
//! 3,n3,n4,4585620.0,5820900.0,4585700.0,5820900.0,80.0,car,
//! ```
//!
//! An empty `type` cell means the link has no road type.  A later row that
//! places an already-seen node somewhere else is a parse error.
//!
//! Files ending in `.gz` are decompressed on the fly.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use hg_core::{Coord, ModeSet, NodeId};

use crate::network::{LinkSpec, Network, NetworkBuilder};
use crate::{NetworkError, NetworkResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LinkRecord {
    id:        String,
    from:      String,
    to:        String,
    from_x:    f64,
    from_y:    f64,
    to_x:      f64,
    to_y:      f64,
    length:    f64,
    modes:     String,
    #[serde(rename = "type")]
    road_type: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a network from a CSV link table.
pub fn load_links_csv(path: &Path) -> NetworkResult<Network> {
    let net = load_links_reader(crate::input::open(path)?)?;
    log::info!(
        "read {} links, {} nodes from {}",
        net.link_count(),
        net.node_count(),
        path.display()
    );
    Ok(net)
}

/// Like [`load_links_csv`] but accepts any `Read` source.
pub fn load_links_reader<R: Read>(reader: R) -> NetworkResult<Network> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = NetworkBuilder::new();

    for result in csv_reader.deserialize::<LinkRecord>() {
        let row = result?;
        if builder.has_link(&row.id) {
            return Err(NetworkError::Parse(format!("duplicate link id {:?}", row.id)));
        }
        let from = node(&mut builder, &row.id, &row.from, Coord::new(row.from_x, row.from_y))?;
        let to = node(&mut builder, &row.id, &row.to, Coord::new(row.to_x, row.to_y))?;

        if !(row.length.is_finite() && row.length >= 0.0) {
            return Err(NetworkError::Parse(format!(
                "link {:?} has invalid length {}",
                row.id, row.length
            )));
        }

        builder.add_link(LinkSpec {
            id:        row.id,
            from,
            to,
            length_m:  row.length,
            modes:     ModeSet::parse(&row.modes),
            road_type: row.road_type.map(|t| t.trim().to_owned()),
        });
    }

    Ok(builder.build())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn node(builder: &mut NetworkBuilder, link: &str, id: &str, coord: Coord) -> NetworkResult<NodeId> {
    if !coord.is_finite() {
        return Err(NetworkError::Parse(format!(
            "link {link:?}: node {id:?} has a non-finite coordinate"
        )));
    }
    match builder.node_by_id(id) {
        Some(existing) => {
            let first = builder.node_coord(existing);
            if first != coord {
                return Err(NetworkError::Parse(format!(
                    "link {link:?}: node {id:?} at {coord} was first seen at {first}"
                )));
            }
            Ok(existing)
        }
        None => Ok(builder.add_node(id, coord)),
    }
}
