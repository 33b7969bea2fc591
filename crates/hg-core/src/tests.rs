//! Unit tests for hg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, LinkId, ZoneId};

    #[test]
    fn index_and_try_from() {
        let id = LinkId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(LinkId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(ZoneId::default(), ZoneId::INVALID);
        assert!(!ZoneId::default().is_valid());
        assert!(AgentId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod coord {
    use crate::Coord;

    #[test]
    fn euclidean_distance() {
        let a = Coord::new(4_584_569.8, 5_820_911.8);
        let b = Coord::new(4_584_569.8 + 3.0, 5_820_911.8 + 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn projected_precision_survives() {
        // Half-metre offsets at Berlin eastings must stay distinguishable.
        let a = Coord::new(4_584_569.5, 0.0);
        let b = Coord::new(4_584_570.0, 0.0);
        assert_ne!(a, b);
    }

    #[test]
    fn non_finite_detected() {
        assert!(!Coord::new(f64::NAN, 0.0).is_finite());
        assert!(Coord::new(1.0, 2.0).is_finite());
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn display_hms() {
        assert_eq!(SimTime(79_200).to_string(), "22:00:00");
        assert_eq!(SimTime(79_200 + 1_799).to_string(), "22:29:59");
    }

    #[test]
    fn display_past_midnight_does_not_wrap() {
        assert_eq!(SimTime::from_hms(24, 20, 0).to_string(), "24:20:00");
    }

    #[test]
    fn parse_forms() {
        assert_eq!("22:00:00".parse::<SimTime>().unwrap(), SimTime(79_200));
        assert_eq!("22:00".parse::<SimTime>().unwrap(), SimTime(79_200));
        assert_eq!("79200".parse::<SimTime>().unwrap(), SimTime(79_200));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("22:61:00".parse::<SimTime>().is_err());
        assert!("a:b".parse::<SimTime>().is_err());
        assert!("1:2:3:4".parse::<SimTime>().is_err());
        assert!("-5".parse::<SimTime>().is_err());
    }

    #[test]
    fn parse_rejects_overflowing_hours() {
        assert!("2000000:00:00".parse::<SimTime>().is_err());
        assert!("1193046:28:16".parse::<SimTime>().is_err());
        assert_eq!("1193046:28:15".parse::<SimTime>().unwrap(), SimTime(u32::MAX));
        assert_eq!(SimTime::checked_from_hms(2_000_000, 0, 0), None);
    }

    #[test]
    fn offset() {
        assert_eq!(SimTime(79_200).offset(600), SimTime(79_800));
    }
}

#[cfg(test)]
mod transport {
    use crate::{ModeSet, TransportMode};

    #[test]
    fn mode_round_trip_labels() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.as_str().parse::<TransportMode>().unwrap(), mode);
        }
        assert!("hovercraft".parse::<TransportMode>().is_err());
    }

    #[test]
    fn mode_set_parse_skips_unknown() {
        let set = ModeSet::parse("car, ride,tram,,freight");
        assert!(set.contains(TransportMode::Car));
        assert!(set.contains(TransportMode::Ride));
        assert!(set.contains(TransportMode::Freight));
        assert!(!set.contains(TransportMode::Pt));
        assert_eq!(set.to_string(), "car,ride,freight");
    }

    #[test]
    fn intersects() {
        let link = ModeSet::parse("car,ride");
        assert!(link.intersects(ModeSet::single(TransportMode::Car)));
        assert!(!link.intersects(ModeSet::single(TransportMode::Bike)));
        assert!(!ModeSet::EMPTY.intersects(link));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn sim_rng_deterministic() {
        let mut r1 = SimRng::new(1);
        let mut r2 = SimRng::new(1);
        for _ in 0..100 {
            let a: u32 = r1.gen_range(0..1_800);
            let b: u32 = r2.gen_range(0..1_800);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn agent_rngs_diverge() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.gen_range(0..u64::MAX);
        let b: u64 = r1.gen_range(0..u64::MAX);
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn agent_rng_reproducible() {
        let mut r1 = AgentRng::new(99, AgentId(5));
        let mut r2 = AgentRng::new(99, AgentId(5));
        assert_eq!(r1.gen_range(0..1_000u32), r2.gen_range(0..1_000u32));
    }

    #[test]
    fn shuffle_is_permutation() {
        let mut rng = SimRng::new(3);
        let mut v: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }
}
