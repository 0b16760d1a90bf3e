//! Unit tests for rt-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "node 7");
        assert_eq!(EdgeId(3).to_string(), "edge 3");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(4.606979, -74.073794);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(4.0, -74.0);
        let b = GeoPoint::new(5.0, -74.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn midpoint_is_arithmetic_mean() {
        let a = GeoPoint::new(4.606979, -74.073794);
        let b = GeoPoint::new(4.595600, -74.069014);
        let m = a.midpoint(b);
        assert!((m.lat - 4.6012895).abs() < 1e-5);
        assert!((m.lon - -74.071404).abs() < 1e-4);
        assert_eq!(a.midpoint(a), a);
    }

    #[test]
    fn bbox_around_contains_nearby_only() {
        let center = GeoPoint::new(4.60, -74.07);
        let bbox = center.bbox_around(1_000.0);
        assert!(bbox.contains(center));
        // ~550 m north.
        assert!(bbox.contains(GeoPoint::new(4.605, -74.07)));
        // ~2.2 km east.
        assert!(!bbox.contains(GeoPoint::new(4.60, -74.05)));
        assert!(bbox.north > bbox.south && bbox.east > bbox.west);
    }

    #[test]
    fn checked_rejects_out_of_range() {
        assert!(GeoPoint::checked(4.6, -74.0).is_ok());
        assert!(GeoPoint::checked(91.0, 0.0).is_err());
        assert!(GeoPoint::checked(0.0, f32::NAN).is_err());
    }
}

#[cfg(test)]
mod transport {
    use crate::{CoreError, NetworkType, TransitMode};

    #[test]
    fn parse_known_modes() {
        assert_eq!("walk".parse::<TransitMode>().unwrap(), TransitMode::Walk);
        assert_eq!(" Drive ".parse::<TransitMode>().unwrap(), TransitMode::Drive);
        assert_eq!("all".parse::<TransitMode>().unwrap(), TransitMode::Other);
        assert_eq!("other".parse::<TransitMode>().unwrap(), TransitMode::Other);
    }

    #[test]
    fn typo_is_an_error_not_a_fallback() {
        let err = "wlak".parse::<TransitMode>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownMode(s) if s == "wlak"));
    }

    #[test]
    fn mode_to_network_type() {
        assert_eq!(TransitMode::Walk.network_type(), NetworkType::Walk);
        assert_eq!(TransitMode::Drive.network_type(), NetworkType::Drive);
        assert_eq!(TransitMode::Other.network_type(), NetworkType::All);
    }

    #[test]
    fn highway_filters() {
        assert!(NetworkType::Drive.includes_highway("residential"));
        assert!(!NetworkType::Drive.includes_highway("footway"));
        assert!(NetworkType::Walk.includes_highway("footway"));
        assert!(!NetworkType::Walk.includes_highway("motorway"));
        assert!(NetworkType::All.includes_highway("motorway"));
    }

    #[test]
    fn only_walking_ignores_oneway() {
        assert!(NetworkType::Drive.respects_oneway());
        assert!(NetworkType::All.respects_oneway());
        assert!(!NetworkType::Walk.respects_oneway());
    }

    #[test]
    fn display_matches_parse() {
        for mode in TransitMode::ALL {
            assert_eq!(mode.to_string().parse::<TransitMode>().unwrap(), mode);
        }
    }
}
