//! Unit tests for hg-network.
//!
//! All tests use hand-crafted networks or inline files so they run without
//! any external data.

#[cfg(test)]
mod helpers {
    use hg_core::{Coord, ModeSet};

    use crate::{LinkSpec, Network, NetworkBuilder};

    /// Build the four-link test network.
    ///
    /// ```text
    ///   n0 ──l0 (residential, 120 m, car)──▶ n1
    ///   n1 ──l1 (motorway,    200 m, car)──▶ n2
    ///   n2 ──l2 (residential, 900 m, car)──▶ n3
    ///   n3 ──l3 (residential,  80 m, pt )──▶ n0
    /// ```
    pub fn four_links() -> Network {
        let mut b = NetworkBuilder::new();
        let n0 = b.add_node("n0", Coord::new(0.0, 0.0));
        let n1 = b.add_node("n1", Coord::new(120.0, 0.0));
        let n2 = b.add_node("n2", Coord::new(320.0, 0.0));
        let n3 = b.add_node("n3", Coord::new(320.0, 900.0));
        let link = |id: &str, from, to, length_m, modes: &str, road_type: Option<&str>| LinkSpec {
            id: id.into(),
            from,
            to,
            length_m,
            modes: ModeSet::parse(modes),
            road_type: road_type.map(str::to_owned),
        };
        b.add_link(link("l0", n0, n1, 120.0, "car", Some("residential")));
        b.add_link(link("l1", n1, n2, 200.0, "car", Some("motorway")));
        b.add_link(link("l2", n2, n3, 900.0, "car", Some("residential")));
        b.add_link(link("l3", n3, n0, 80.0, "pt", Some("residential")));
        b.build()
    }
}

// ── Builder & network structure ───────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use hg_core::{Coord, LinkId, ModeSet, TransportMode};

    use crate::{LinkSpec, NetworkBuilder};

    #[test]
    fn empty_build() {
        let net = NetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.link_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn representative_point_is_to_node() {
        let net = super::helpers::four_links();
        assert_eq!(net.link_to_coord(LinkId(0)), Coord::new(120.0, 0.0));
        assert_eq!(net.link_from_coord(LinkId(0)), Coord::new(0.0, 0.0));
        assert_eq!(net.link_to_coord(LinkId(3)), Coord::new(0.0, 0.0));
    }

    #[test]
    fn readding_node_returns_first_id() {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("a", Coord::new(1.0, 1.0));
        let again = b.add_node("a", Coord::new(9.0, 9.0));
        assert_eq!(a, again);
        assert_eq!(b.node_count(), 1);
        assert_eq!(b.node_coord(a), Coord::new(1.0, 1.0));
    }

    #[test]
    fn empty_road_type_is_missing() {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("a", Coord::new(0.0, 0.0));
        let c = b.add_node("c", Coord::new(1.0, 0.0));
        b.add_link(LinkSpec {
            id:        "x".into(),
            from:      a,
            to:        c,
            length_m:  1.0,
            modes:     ModeSet::single(TransportMode::Car),
            road_type: Some(String::new()),
        });
        let net = b.build();
        assert_eq!(net.road_type(LinkId(0)), None);
        assert_eq!(&**net.link_ext_id(LinkId(0)), "x");
    }
}

// ── Eligibility filter ────────────────────────────────────────────────────────

#[cfg(test)]
mod filter {
    use hg_core::{Coord, LinkId, ModeSet, TransportMode};

    use crate::{LinkFilter, LinkSpec, MissingRoadTypePolicy, NetworkBuilder, NetworkError};

    fn car_filter() -> LinkFilter {
        LinkFilter::new(ModeSet::single(TransportMode::Car), 250.0)
            .unwrap()
            .exclude_road_types(["motorway", "motorway_link", "trunk", "trunk_link"])
    }

    #[test]
    fn applies_mode_length_and_type_rules() {
        let net = super::helpers::four_links();
        let eligible = car_filter().eligible_links(&net).unwrap();
        // l1 motorway, l2 too long, l3 pt-only.
        assert_eq!(eligible, vec![LinkId(0)]);
    }

    #[test]
    fn length_bound_is_inclusive() {
        let net = super::helpers::four_links();
        let filter = LinkFilter::new(ModeSet::single(TransportMode::Car), 120.0).unwrap();
        let eligible = filter.eligible_links(&net).unwrap();
        assert!(eligible.contains(&LinkId(0)));
    }

    #[test]
    fn any_shared_mode_suffices() {
        let net = super::helpers::four_links();
        let modes: ModeSet = [TransportMode::Bike, TransportMode::Pt].into_iter().collect();
        let filter = LinkFilter::new(modes, 250.0).unwrap();
        assert_eq!(filter.eligible_links(&net).unwrap(), vec![LinkId(3)]);
    }

    #[test]
    fn invalid_parameters_rejected() {
        let car = ModeSet::single(TransportMode::Car);
        assert!(matches!(LinkFilter::new(car, 0.0), Err(NetworkError::Config(_))));
        assert!(matches!(LinkFilter::new(car, -5.0), Err(NetworkError::Config(_))));
        assert!(matches!(LinkFilter::new(car, f64::NAN), Err(NetworkError::Config(_))));
        assert!(matches!(LinkFilter::new(ModeSet::EMPTY, 250.0), Err(NetworkError::Config(_))));
    }

    fn network_with_untyped_link(length_m: f64) -> crate::Network {
        let mut b = NetworkBuilder::new();
        let a = b.add_node("a", Coord::new(0.0, 0.0));
        let c = b.add_node("c", Coord::new(10.0, 0.0));
        for (id, road_type) in [("typed", Some("residential".to_owned())), ("untyped", None)] {
            b.add_link(LinkSpec {
                id: id.into(),
                from: a,
                to: c,
                length_m,
                modes: ModeSet::single(TransportMode::Car),
                road_type,
            });
        }
        b.build()
    }

    #[test]
    fn missing_road_type_fails_fast_by_default() {
        let net = network_with_untyped_link(10.0);
        match car_filter().eligible_links(&net) {
            Err(NetworkError::MissingRoadType { link }) => assert_eq!(link, "untyped"),
            other => panic!("expected MissingRoadType, got {other:?}"),
        }
    }

    #[test]
    fn missing_road_type_skipped_under_skip_policy() {
        let net = network_with_untyped_link(10.0);
        let eligible = car_filter()
            .missing_road_type(MissingRoadTypePolicy::Skip)
            .eligible_links(&net)
            .unwrap();
        assert_eq!(eligible, vec![LinkId(0)]);
    }

    #[test]
    fn missing_road_type_irrelevant_when_link_already_rejected() {
        // Too long to qualify, so the missing type is never consulted.
        let net = network_with_untyped_link(1_000.0);
        assert!(car_filter().eligible_links(&net).unwrap().is_empty());
    }
}

// ── CSV reader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_reader {
    use std::io::Cursor;

    use hg_core::{LinkId, TransportMode};

    use crate::{load_links_csv, load_links_reader, NetworkError};

    const LINKS_CSV: &str = "\
id,from,to,from_x,from_y,to_x,to_y,length,modes,type\n\
a,n1,n2,0.0,0.0,100.0,0.0,100.0,\"car,ride\",residential\n\
b,n2,n3,100.0,0.0,100.0,50.0,50.0,car,\n\
c,n3,n1,100.0,50.0,0.0,0.0,111.8,pt,tertiary\n\
";

    #[test]
    fn reads_links_and_dedupes_nodes() {
        let net = load_links_reader(Cursor::new(LINKS_CSV)).unwrap();
        assert_eq!(net.link_count(), 3);
        assert_eq!(net.node_count(), 3);
        assert!(net.link_modes[0].contains(TransportMode::Ride));
        assert_eq!(net.road_type(LinkId(0)), Some("residential"));
        assert_eq!(net.road_type(LinkId(1)), None);
        assert_eq!(net.link_to_coord(LinkId(1)).y, 50.0);
    }

    #[test]
    fn conflicting_node_position_rejected() {
        let csv = "\
id,from,to,from_x,from_y,to_x,to_y,length,modes,type\n\
a,n1,n2,0.0,0.0,100.0,0.0,100.0,car,residential\n\
b,n2,n3,999.0,0.0,100.0,50.0,50.0,car,residential\n\
";
        assert!(matches!(load_links_reader(Cursor::new(csv)), Err(NetworkError::Parse(_))));
    }

    #[test]
    fn malformed_number_is_csv_error() {
        let csv = "\
id,from,to,from_x,from_y,to_x,to_y,length,modes,type\n\
a,n1,n2,zero,0.0,100.0,0.0,100.0,car,residential\n\
";
        assert!(matches!(load_links_reader(Cursor::new(csv)), Err(NetworkError::Csv(_))));
    }

    #[test]
    fn duplicate_link_id_rejected() {
        let csv = "\
id,from,to,from_x,from_y,to_x,to_y,length,modes,type\n\
a,n1,n2,0.0,0.0,100.0,0.0,100.0,car,residential\n\
a,n2,n1,100.0,0.0,0.0,0.0,100.0,car,residential\n\
";
        assert!(matches!(load_links_reader(Cursor::new(csv)), Err(NetworkError::Parse(_))));
    }

    #[test]
    fn reads_gzipped_file() {
        use std::io::Write;

        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("links.csv.gz");
        let mut enc = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        enc.write_all(LINKS_CSV.as_bytes()).unwrap();
        enc.finish().unwrap();

        let net = load_links_csv(&path).unwrap();
        assert_eq!(net.link_count(), 3);
    }
}

// ── MATSim XML reader ─────────────────────────────────────────────────────────

#[cfg(test)]
mod matsim_reader {
    use std::io::Cursor;

    use hg_core::{Coord, LinkId, TransportMode};

    use crate::{load_links_reader, load_matsim_reader, NetworkError};

    const NETWORK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE network SYSTEM "http://www.matsim.org/files/dtd/network_v2.dtd">
<network>
  <attributes>
    <attribute name="coordinateReferenceSystem" class="java.lang.String">EPSG:31468</attribute>
  </attributes>
  <nodes>
    <node id="n1" x="0.0" y="0.0"/>
    <node id="n2" x="100.0" y="0.0"/>
    <node id="n3" x="100.0" y="50.0"/>
  </nodes>
  <links capperiod="01:00:00">
    <link id="a" from="n1" to="n2" length="100.0" freespeed="8.3" capacity="600" permlanes="1" modes="car,ride">
      <attributes>
        <attribute name="type" class="java.lang.String">residential</attribute>
      </attributes>
    </link>
    <link id="b" from="n2" to="n3" length="50.0" freespeed="8.3" capacity="600" permlanes="1" modes="car"/>
    <link id="c" from="n3" to="n1" length="111.8" modes="pt" type="tertiary"/>
  </links>
</network>
"#;

    #[test]
    fn reads_nodes_links_and_types() {
        let net = load_matsim_reader(Cursor::new(NETWORK_XML)).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.link_count(), 3);
        assert_eq!(net.road_type(LinkId(0)), Some("residential"));
        assert_eq!(net.road_type(LinkId(1)), None);
        assert_eq!(net.road_type(LinkId(2)), Some("tertiary"));
        assert!(net.link_modes[2].contains(TransportMode::Pt));
        assert_eq!(net.link_to_coord(LinkId(0)), Coord::new(100.0, 0.0));
    }

    #[test]
    fn network_level_attributes_ignored() {
        let net = load_matsim_reader(Cursor::new(NETWORK_XML)).unwrap();
        assert!(net.link_road_type.iter().flatten().all(|t| t != "EPSG:31468"));
    }

    #[test]
    fn agrees_with_csv_reader() {
        let csv = "\
id,from,to,from_x,from_y,to_x,to_y,length,modes,type\n\
a,n1,n2,0.0,0.0,100.0,0.0,100.0,\"car,ride\",residential\n\
b,n2,n3,100.0,0.0,100.0,50.0,50.0,car,\n\
c,n3,n1,100.0,50.0,0.0,0.0,111.8,pt,tertiary\n\
";
        let from_xml = load_matsim_reader(Cursor::new(NETWORK_XML)).unwrap();
        let from_csv = load_links_reader(Cursor::new(csv)).unwrap();
        assert_eq!(from_xml.link_length_m, from_csv.link_length_m);
        assert_eq!(from_xml.link_modes, from_csv.link_modes);
        assert_eq!(from_xml.link_road_type, from_csv.link_road_type);
        for link in from_xml.links() {
            assert_eq!(from_xml.link_to_coord(link), from_csv.link_to_coord(link));
        }
    }

    #[test]
    fn missing_modes_default_to_car() {
        let xml = r#"<network><nodes><node id="1" x="0" y="0"/><node id="2" x="1" y="0"/></nodes>
<links><link id="x" from="1" to="2" length="1.0"/></links></network>"#;
        let net = load_matsim_reader(Cursor::new(xml)).unwrap();
        assert!(net.link_modes[0].contains(TransportMode::Car));
    }

    #[test]
    fn unknown_node_rejected() {
        let xml = r#"<network><nodes><node id="1" x="0" y="0"/></nodes>
<links><link id="x" from="1" to="9" length="1.0"/></links></network>"#;
        match load_matsim_reader(Cursor::new(xml)) {
            Err(NetworkError::UnknownNode { link, node }) => {
                assert_eq!(link, "x");
                assert_eq!(node, "9");
            }
            other => panic!("expected UnknownNode, got {:?}", other.map(|n| n.link_count())),
        }
    }

    #[test]
    fn duplicate_link_id_rejected() {
        let xml = r#"<network><nodes><node id="1" x="0" y="0"/><node id="2" x="1" y="0"/></nodes>
<links><link id="x" from="1" to="2" length="1.0"/><link id="x" from="2" to="1" length="1.0"/></links></network>"#;
        match load_matsim_reader(Cursor::new(xml)) {
            Err(NetworkError::Parse(msg)) => assert!(msg.contains("duplicate link id"), "{msg}"),
            other => panic!("expected Parse, got {:?}", other.map(|n| n.link_count())),
        }
    }

    #[test]
    fn negative_length_rejected() {
        let xml = r#"<network><nodes><node id="1" x="0" y="0"/><node id="2" x="1" y="0"/></nodes>
<links><link id="x" from="1" to="2" length="-5.0"/></links></network>"#;
        assert!(matches!(load_matsim_reader(Cursor::new(xml)), Err(NetworkError::Parse(_))));
    }

    #[test]
    fn bad_coordinate_rejected() {
        let xml = r#"<network><nodes><node id="1" x="east" y="0"/></nodes></network>"#;
        assert!(matches!(load_matsim_reader(Cursor::new(xml)), Err(NetworkError::Parse(_))));
    }
}
