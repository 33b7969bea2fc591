//! MATSim network XML reader.
//!
//! Reads the `<nodes>` and `<links>` sections of a MATSim `network_v2` file
//! (gzipped or plain) in a single streaming pass:
//!
//! ```xml
//! <network>
//!   <nodes>
//!     <node id="1" x="4584500.0" y="5820900.0"/>
//!     <node id="2" x="4584620.0" y="5820900.0"/>
//!   </nodes>
//!   <links capperiod="01:00:00">
//!     <link id="12" from="1" to="2" length="120.0" freespeed="8.3"
//!           capacity="600" permlanes="1" modes="car,ride">
//!       <attributes>
//!         <attribute name="type" class="java.lang.String">residential</attribute>
//!       </attributes>
//!     </link>
//!   </links>
//! </network>
//! ```
//!
//! The road type comes from the link's `type` attribute element, or from a
//! legacy `type="…"` XML attribute on `<link>` when older files carry it
//! there.  A link without `modes` allows `car`, as MATSim assumes.  Nodes
//! must precede the links that reference them.

use std::io::{BufReader, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use hg_core::{Coord, ModeSet, TransportMode};

use crate::network::{LinkSpec, Network, NetworkBuilder};
use crate::{NetworkError, NetworkResult};

/// Load a MATSim network XML file (`.xml` or `.xml.gz`).
pub fn load_matsim_network(path: &Path) -> NetworkResult<Network> {
    let net = load_matsim_reader(crate::input::open(path)?)?;
    log::info!(
        "read {} links, {} nodes from {}",
        net.link_count(),
        net.node_count(),
        path.display()
    );
    Ok(net)
}

/// Like [`load_matsim_network`] but accepts any `Read` source.
pub fn load_matsim_reader<R: Read>(reader: R) -> NetworkResult<Network> {
    let mut xml = Reader::from_reader(BufReader::new(reader));
    xml.config_mut().trim_text(true);

    let mut builder = NetworkBuilder::new();
    let mut state = ParseState::default();
    let mut buf = Vec::new();

    loop {
        let event = xml.read_event_into(&mut buf).map_err(|e| NetworkError::Xml {
            position: xml.buffer_position() as u64,
            message:  e.to_string(),
        })?;
        match event {
            Event::Start(e) => state.open(&mut builder, &e, false)?,
            Event::Empty(e) => state.open(&mut builder, &e, true)?,
            Event::Text(t) if state.in_type_attribute => {
                let text = t.unescape().map_err(|e| NetworkError::Xml {
                    position: xml.buffer_position() as u64,
                    message:  e.to_string(),
                })?;
                state.text.push_str(&text);
            }
            Event::End(e) => state.close(&mut builder, e.name().as_ref()),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(builder.build())
}

// ── Parser state ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct ParseState {
    /// The `<link>` element currently open, if any.
    link: Option<LinkSpec>,
    /// Inside `<attribute name="type">` of the open link.
    in_type_attribute: bool,
    text: String,
}

impl ParseState {
    fn open(&mut self, builder: &mut NetworkBuilder, e: &BytesStart<'_>, empty: bool) -> NetworkResult<()> {
        match e.name().as_ref() {
            b"node" => {
                let attrs = Attributes::read(e)?;
                let id = attrs.require("node", "id")?;
                if builder.node_by_id(id).is_some() {
                    return Err(NetworkError::Parse(format!("duplicate node id {id:?}")));
                }
                let coord = Coord::new(attrs.number("node", "x")?, attrs.number("node", "y")?);
                builder.add_node(id, coord);
            }
            b"link" => {
                let attrs = Attributes::read(e)?;
                let id = attrs.require("link", "id")?;
                if builder.has_link(id) || self.link.as_ref().is_some_and(|open| open.id == id) {
                    return Err(NetworkError::Parse(format!("duplicate link id {id:?}")));
                }
                let length_m = attrs.number("link", "length")?;
                if length_m < 0.0 {
                    return Err(NetworkError::Parse(format!("link {id:?} has negative length {length_m}")));
                }
                let resolve = |key: &str| -> NetworkResult<_> {
                    let node = attrs.require("link", key)?;
                    builder.node_by_id(node).ok_or_else(|| NetworkError::UnknownNode {
                        link: id.to_owned(),
                        node: node.to_owned(),
                    })
                };
                let from = resolve("from")?;
                let to = resolve("to")?;
                let modes = match attrs.get("modes") {
                    Some(list) => ModeSet::parse(list),
                    None => ModeSet::single(TransportMode::Car),
                };
                let spec = LinkSpec {
                    id: id.to_owned(),
                    from,
                    to,
                    length_m,
                    modes,
                    road_type: attrs.get("type").map(str::to_owned),
                };
                if empty {
                    builder.add_link(spec);
                } else {
                    self.link = Some(spec);
                }
            }
            b"attribute" if self.link.is_some() && !empty => {
                let attrs = Attributes::read(e)?;
                if attrs.get("name") == Some("type") {
                    self.in_type_attribute = true;
                    self.text.clear();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, builder: &mut NetworkBuilder, name: &[u8]) {
        match name {
            b"attribute" if self.in_type_attribute => {
                self.in_type_attribute = false;
                if let Some(link) = self.link.as_mut() {
                    link.road_type = Some(self.text.trim().to_owned());
                }
            }
            b"link" => {
                if let Some(spec) = self.link.take() {
                    builder.add_link(spec);
                }
            }
            _ => {}
        }
    }
}

// ── Attribute helpers ─────────────────────────────────────────────────────────

struct Attributes(Vec<(String, String)>);

impl Attributes {
    fn read(e: &BytesStart<'_>) -> NetworkResult<Self> {
        let mut out = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| NetworkError::Parse(err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| NetworkError::Parse(err.to_string()))?
                .into_owned();
            out.push((key, value));
        }
        Ok(Attributes(out))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn require(&self, element: &str, key: &str) -> NetworkResult<&str> {
        self.get(key).ok_or_else(|| {
            NetworkError::Parse(format!("<{element}> without required attribute {key:?}"))
        })
    }

    fn number(&self, element: &str, key: &str) -> NetworkResult<f64> {
        let raw = self.require(element, key)?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| NetworkError::Parse(format!("<{element}> {key}={raw:?} is not a number")))
    }
}
