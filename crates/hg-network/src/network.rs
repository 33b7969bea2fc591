//! Network representation and builder.
//!
//! # Data layout
//!
//! Links and nodes are stored as parallel arrays (structure of arrays)
//! indexed by [`LinkId`] and [`NodeId`].  The synthesizer only ever scans
//! links linearly and reads a handful of attributes per link, so there is no
//! adjacency structure: the eligibility filter and the zone indexer touch
//! `link_modes`, `link_length_m`, `link_road_type` and the to-node
//! coordinate, each a contiguous scan.
//!
//! External identifiers (the ids written in the source file) are kept beside
//! the arenas as `Arc<str>` so generated plans can reference their home link
//! without copying strings per agent.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use hg_core::{Coord, LinkId, ModeSet, NodeId};

// ── Network ───────────────────────────────────────────────────────────────────

/// Directed link graph loaded from a network source.  Read-only after
/// [`NetworkBuilder::build`].
///
/// All fields are `pub` for direct indexed access on hot paths.
pub struct Network {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Position of each node.  Indexed by `NodeId`.
    pub node_coord: Vec<Coord>,

    /// Source-file id of each node.
    pub node_ext_id: Vec<Arc<str>>,

    // ── Link data (indexed by LinkId) ─────────────────────────────────────
    /// Source-file id of each link.
    pub link_ext_id: Vec<Arc<str>>,

    pub link_from: Vec<NodeId>,

    /// Terminal node.  Its coordinate is the link's representative point.
    pub link_to: Vec<NodeId>,

    /// Length in metres.
    pub link_length_m: Vec<f64>,

    /// Modes allowed on the link.
    pub link_modes: Vec<ModeSet>,

    /// Categorical road type (`"residential"`, `"motorway"`, …), `None` when
    /// the source carried no such attribute.
    pub link_road_type: Vec<Option<String>>,
}

impl Network {
    /// A network with no nodes or links.
    pub fn empty() -> Self {
        NetworkBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_coord.len()
    }

    pub fn link_count(&self) -> usize {
        self.link_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.link_to.is_empty()
    }

    /// All link ids in arena order.
    pub fn links(&self) -> impl Iterator<Item = LinkId> + '_ {
        (0..self.link_count()).map(|i| LinkId(i as u32))
    }

    // ── Per-link accessors ────────────────────────────────────────────────

    /// Coordinate of the link's terminal node, the point used for every
    /// containment test (mask and zone).
    #[inline]
    pub fn link_to_coord(&self, link: LinkId) -> Coord {
        self.node_coord[self.link_to[link.index()].index()]
    }

    #[inline]
    pub fn link_from_coord(&self, link: LinkId) -> Coord {
        self.node_coord[self.link_from[link.index()].index()]
    }

    #[inline]
    pub fn link_ext_id(&self, link: LinkId) -> &Arc<str> {
        &self.link_ext_id[link.index()]
    }

    #[inline]
    pub fn road_type(&self, link: LinkId) -> Option<&str> {
        self.link_road_type[link.index()].as_deref()
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Attributes of one link handed to [`NetworkBuilder::add_link`].
#[derive(Clone, Debug)]
pub struct LinkSpec {
    pub id:        String,
    pub from:      NodeId,
    pub to:        NodeId,
    pub length_m:  f64,
    pub modes:     ModeSet,
    pub road_type: Option<String>,
}

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// Nodes are registered under their external id so readers can resolve link
/// endpoints with [`node_by_id`](Self::node_by_id).
///
/// # Example
///
/// ```
/// use hg_core::{Coord, ModeSet, TransportMode};
/// use hg_network::{LinkSpec, NetworkBuilder};
///
/// let mut b = NetworkBuilder::new();
/// let a = b.add_node("a", Coord::new(0.0, 0.0));
/// let c = b.add_node("c", Coord::new(120.0, 0.0));
/// b.add_link(LinkSpec {
///     id:        "a_c".into(),
///     from:      a,
///     to:        c,
///     length_m:  120.0,
///     modes:     ModeSet::single(TransportMode::Car),
///     road_type: Some("residential".into()),
/// });
/// let net = b.build();
/// assert_eq!(net.link_count(), 1);
/// assert_eq!(net.link_to_coord(hg_core::LinkId(0)).x, 120.0);
/// ```
pub struct NetworkBuilder {
    nodes:      Vec<(Arc<str>, Coord)>,
    node_index: HashMap<Arc<str>, NodeId>,
    links:      Vec<LinkSpec>,
    link_ids:   HashSet<String>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes:      Vec::new(),
            node_index: HashMap::new(),
            links:      Vec::new(),
            link_ids:   HashSet::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and links.
    pub fn with_capacity(nodes: usize, links: usize) -> Self {
        Self {
            nodes:      Vec::with_capacity(nodes),
            node_index: HashMap::with_capacity(nodes),
            links:      Vec::with_capacity(links),
            link_ids:   HashSet::with_capacity(links),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    ///
    /// Re-adding an existing id returns the first registration unchanged;
    /// readers that care about conflicting coordinates check
    /// [`node_coord`](Self::node_coord) themselves.
    pub fn add_node(&mut self, id: impl AsRef<str>, coord: Coord) -> NodeId {
        let id = id.as_ref();
        if let Some(&existing) = self.node_index.get(id) {
            return existing;
        }
        let node = NodeId(self.nodes.len() as u32);
        let key: Arc<str> = Arc::from(id);
        self.nodes.push((Arc::clone(&key), coord));
        self.node_index.insert(key, node);
        node
    }

    pub fn node_by_id(&self, id: &str) -> Option<NodeId> {
        self.node_index.get(id).copied()
    }

    pub fn has_link(&self, id: &str) -> bool {
        self.link_ids.contains(id)
    }

    pub fn node_coord(&self, node: NodeId) -> Coord {
        self.nodes[node.index()].1
    }

    /// Add a directed link and return its `LinkId` (sequential from 0).
    ///
    /// Ids are not checked for uniqueness here; readers reject duplicates
    /// through [`has_link`](Self::has_link).
    pub fn add_link(&mut self, spec: LinkSpec) -> LinkId {
        let id = LinkId(self.links.len() as u32);
        self.link_ids.insert(spec.id.clone());
        self.links.push(spec);
        id
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn link_count(&self) -> usize { self.links.len() }

    /// Consume the builder and produce a [`Network`].
    pub fn build(self) -> Network {
        let link_count = self.links.len();
        let mut net = Network {
            node_coord:     Vec::with_capacity(self.nodes.len()),
            node_ext_id:    Vec::with_capacity(self.nodes.len()),
            link_ext_id:    Vec::with_capacity(link_count),
            link_from:      Vec::with_capacity(link_count),
            link_to:        Vec::with_capacity(link_count),
            link_length_m:  Vec::with_capacity(link_count),
            link_modes:     Vec::with_capacity(link_count),
            link_road_type: Vec::with_capacity(link_count),
        };

        for (id, coord) in self.nodes {
            net.node_ext_id.push(id);
            net.node_coord.push(coord);
        }
        for spec in self.links {
            debug_assert!(spec.from.index() < net.node_coord.len());
            debug_assert!(spec.to.index() < net.node_coord.len());
            net.link_ext_id.push(Arc::from(spec.id));
            net.link_from.push(spec.from);
            net.link_to.push(spec.to);
            net.link_length_m.push(spec.length_m);
            net.link_modes.push(spec.modes);
            net.link_road_type.push(spec.road_type.filter(|t| !t.is_empty()));
        }
        net
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
