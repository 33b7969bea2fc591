//! Residential mask.

use geo::{Contains, Point};

use hg_core::LinkId;
use hg_network::Network;

use crate::Area;

/// Keep the links whose representative point (terminal-node coordinate) lies
/// strictly inside `mask`.  With no mask the input is returned unchanged.
///
/// Input order is preserved.
pub fn apply_mask(net: &Network, links: Vec<LinkId>, mask: Option<&Area>) -> Vec<LinkId> {
    let Some(mask) = mask else {
        return links;
    };
    let before = links.len();
    let kept: Vec<LinkId> = links
        .into_iter()
        .filter(|&link| {
            let c = net.link_to_coord(link);
            mask.contains(&Point::new(c.x, c.y))
        })
        .collect();
    log::info!("mask kept {} of {} eligible links", kept.len(), before);
    kept
}
