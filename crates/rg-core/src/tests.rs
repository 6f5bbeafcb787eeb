//! Unit tests for rg-core primitives.

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
    fn too_large_for_u32() {
        assert!(NodeId::try_from(u32::MAX as usize + 1).is_err());
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(22.5726, 88.3639);
        assert!(p.distance_m(p) < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        // ~1 degree of latitude ≈ 111.2 km
        let a = GeoPoint::new(22.0, 88.0);
        let b = GeoPoint::new(23.0, 88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(22.57, 88.36);
        let b = GeoPoint::new(22.58, 88.37);
        assert!((a.distance_m(b) - b.distance_m(a)).abs() < 1e-9);
    }
}

#[cfg(test)]
mod raw {
    use crate::RawGraph;

    #[test]
    fn preserves_insertion_order() {
        let mut g = RawGraph::new();
        g.add_node("B", 1.0, 2.0);
        g.add_node("A", 3.0, 4.0);
        g.add_edge("A", "B", 10.0);
        g.add_edge("A", "B", 11.0);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.nodes[0].id, "B");
        assert_eq!(g.edges[1].length, 11.0);
    }

    #[test]
    fn empty() {
        let g: RawGraph<i64> = RawGraph::default();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }
}

#[cfg(test)]
mod config {
    use std::path::PathBuf;

    use crate::{CoreError, ExportConfig, NetworkType};

    #[test]
    fn network_type_parse() {
        assert_eq!("drive".parse::<NetworkType>().unwrap(), NetworkType::Drive);
        assert_eq!("Walk".parse::<NetworkType>().unwrap(), NetworkType::Walk);
        assert_eq!("all_private".parse::<NetworkType>().unwrap(), NetworkType::AllPrivate);
        assert!(matches!(
            "boat".parse::<NetworkType>(),
            Err(CoreError::UnknownNetworkType(s)) if s == "boat"
        ));
    }

    #[test]
    fn network_type_display_round_trips() {
        for t in NetworkType::ALL {
            assert_eq!(t.to_string().parse::<NetworkType>().unwrap(), t);
        }
    }

    #[test]
    fn defaults() {
        let c = ExportConfig::default();
        assert_eq!(c.network_type, NetworkType::Drive);
        assert!(c.simplify);
        assert!(!c.retain_all);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn blank_place_rejected() {
        let c = ExportConfig {
            places: vec!["Kolkata, West Bengal, India".into(), "  ".into()],
            ..ExportConfig::default()
        };
        assert!(matches!(c.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn empty_output_rejected() {
        let c = ExportConfig { output: PathBuf::new(), ..ExportConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn request_copies_source_fields() {
        let c = ExportConfig {
            places:       vec!["Howrah, West Bengal, India".into()],
            network_type: NetworkType::Bike,
            retain_all:   true,
            ..ExportConfig::default()
        };
        let r = c.request();
        assert_eq!(r.places, c.places);
        assert_eq!(r.network_type, NetworkType::Bike);
        assert!(r.simplify);
        assert!(r.retain_all);
    }
}
