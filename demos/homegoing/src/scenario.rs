//! Built-in synthetic scenario for `homegoing demo`.
//!
//! Four districts west of the stadium, each a 6×6 street grid with 200 m
//! blocks and a motorway running along its southern edge.  Coordinates are
//! in the same projected CRS as the default venue.
//!
//! `Grunewald` is forest crossed by motorways and trunk roads only, so it
//! ends up without home candidates and shows up in the candidate report.

use anyhow::Result;
use geo::{polygon, MultiPolygon};

use hg_core::{Coord, ModeSet, NodeId, TransportMode};
use hg_network::{LinkSpec, Network, NetworkBuilder};
use hg_zones::{Zone, ZoneSet};

const GRID: usize = 6;
const BLOCK_M: f64 = 200.0;

struct District {
    name:        &'static str,
    origin:      (f64, f64),
    fans:        f64,
    residential: bool,
}

const DISTRICTS: [District; 4] = [
    District { name: "Spandau",        origin: (4_575_000.0, 5_821_000.0), fans: 1_250.0, residential: true },
    District { name: "Charlottenburg", origin: (4_586_000.0, 5_818_000.0), fans: 2_100.0, residential: true },
    District { name: "Mitte",          origin: (4_592_000.0, 5_822_000.0), fans: 1_800.0, residential: true },
    District { name: "Grunewald",      origin: (4_582_000.0, 5_812_000.0), fans:   300.0, residential: false },
];

/// Build the demo network and zones.
pub fn build_scenario() -> Result<(Network, ZoneSet)> {
    let mut b = NetworkBuilder::new();
    let car = ModeSet::single(TransportMode::Car);
    let mut zones = Vec::with_capacity(DISTRICTS.len());

    for d in &DISTRICTS {
        let (ox, oy) = d.origin;
        let mut node = |i: usize, j: usize| {
            b.add_node(
                format!("{}_{i}_{j}", d.name),
                Coord::new(ox + i as f64 * BLOCK_M, oy + j as f64 * BLOCK_M),
            )
        };
        let grid: Vec<Vec<_>> = (0..GRID).map(|i| (0..GRID).map(|j| node(i, j)).collect()).collect();

        let mut n = 0;
        let mut street = |b: &mut NetworkBuilder, from: NodeId, to: NodeId, road_type: &str| {
            b.add_link(LinkSpec {
                id:        format!("{}_{n}", d.name),
                from,
                to,
                length_m:  BLOCK_M,
                modes:     car,
                road_type: Some(road_type.to_owned()),
            });
            n += 1;
        };

        for i in 0..GRID {
            for j in 0..GRID {
                // The j = 0 row is the motorway.
                let kind = if j == 0 || !d.residential { "motorway" } else { "residential" };
                if i + 1 < GRID {
                    street(&mut b, grid[i][j], grid[i + 1][j], kind);
                    street(&mut b, grid[i + 1][j], grid[i][j], kind);
                }
                if j + 1 < GRID && j > 0 {
                    let kind = if d.residential { "residential" } else { "trunk" };
                    street(&mut b, grid[i][j], grid[i][j + 1], kind);
                    street(&mut b, grid[i][j + 1], grid[i][j], kind);
                }
            }
        }

        let (x0, y0) = (ox - BLOCK_M / 2.0, oy - BLOCK_M / 2.0);
        let side = GRID as f64 * BLOCK_M;
        let area = MultiPolygon::new(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + side, y: y0),
            (x: x0 + side, y: y0 + side),
            (x: x0, y: y0 + side),
            (x: x0, y: y0),
        ]]);
        zones.push(Zone::new(d.name, d.fans, area));
    }

    Ok((b.build(), ZoneSet::new(zones)?))
}
