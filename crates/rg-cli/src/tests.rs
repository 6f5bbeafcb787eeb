//! Argument handling and end-to-end runs against local Overpass files.

#[cfg(test)]
mod config {
    use std::fs;
    use std::path::PathBuf;

    use clap::Parser;
    use rg_core::NetworkType;

    use crate::args::{Args, SourceKind};

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("roadgraph").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cfg = parse(&[]).export_config().unwrap();
        assert!(cfg.places.is_empty());
        assert_eq!(cfg.output, PathBuf::from("graph.json"));
        assert_eq!(cfg.network_type, NetworkType::Drive);
        assert!(cfg.simplify);
        assert!(!cfg.retain_all);
        assert!(!cfg.pretty);
    }

    #[test]
    fn flags() {
        let cfg = parse(&[
            "--place", "Kolkata, West Bengal, India",
            "-p", "Howrah, West Bengal, India",
            "-o", "public/kolkata_graph.json",
            "--network-type", "walk",
            "--no-simplify",
            "--retain-all",
            "--pretty",
        ])
        .export_config()
        .unwrap();
        assert_eq!(cfg.places, ["Kolkata, West Bengal, India", "Howrah, West Bengal, India"]);
        assert_eq!(cfg.output, PathBuf::from("public/kolkata_graph.json"));
        assert_eq!(cfg.network_type, NetworkType::Walk);
        assert!(!cfg.simplify);
        assert!(cfg.retain_all);
        assert!(cfg.pretty);
    }

    #[test]
    fn unknown_network_type() {
        let argv = ["roadgraph", "--network-type", "boat"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roadgraph.json");
        fs::write(
            &path,
            r#"{"places": ["Kolkata, West Bengal, India"], "output": "out.json",
                "network_type": "bike", "retain_all": true}"#,
        )
        .unwrap();

        let from_file = parse(&["--config", path.to_str().unwrap()]).export_config().unwrap();
        assert_eq!(from_file.places, ["Kolkata, West Bengal, India"]);
        assert_eq!(from_file.network_type, NetworkType::Bike);
        assert!(from_file.retain_all);
        assert!(from_file.simplify);

        let overridden = parse(&["--config", path.to_str().unwrap(), "-n", "drive", "-o", "x.json"])
            .export_config()
            .unwrap();
        assert_eq!(overridden.network_type, NetworkType::Drive);
        assert_eq!(overridden.output, PathBuf::from("x.json"));
        assert_eq!(overridden.places, ["Kolkata, West Bengal, India"]);
    }

    #[test]
    fn bad_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roadgraph.json");
        fs::write(&path, r#"{"network_type": "boat"}"#).unwrap();
        let err = parse(&["--config", path.to_str().unwrap()]).export_config().unwrap_err();
        assert!(err.to_string().contains("parsing config"), "{err}");
    }

    #[test]
    fn blank_place_rejected() {
        assert!(parse(&["--place", " "]).export_config().is_err());
    }

    #[test]
    fn source_kinds() {
        assert_eq!(parse(&[]).source_kind().unwrap(), SourceKind::Overpass);
        assert_eq!(
            parse(&["--osm-file", "kolkata.json"]).source_kind().unwrap(),
            SourceKind::OverpassFile(PathBuf::from("kolkata.json"))
        );
        assert_eq!(
            parse(&["--osm-file", "west-bengal.osm.PBF"]).source_kind().unwrap(),
            SourceKind::Pbf(PathBuf::from("west-bengal.osm.PBF"))
        );
        assert!(parse(&["--osm-file", "map.osm"]).source_kind().is_err());
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn overpass_settings() {
        let s = parse(&[
            "--overpass-url", "http://localhost:12345/api",
            "--user-agent", "test-agent",
            "--timeout-secs", "30",
        ])
        .overpass_settings();
        assert_eq!(s.overpass_url, "http://localhost:12345/api");
        assert_eq!(s.user_agent, "test-agent");
        assert_eq!(s.timeout_secs, 30);
    }
}

#[cfg(test)]
mod end_to_end {
    use std::fs;

    use clap::Parser;

    use crate::args::Args;
    use crate::export;

    const OVERPASS: &str = r#"{"elements": [
        {"type": "node", "id": 9001, "lat": 22.57, "lon": 88.36},
        {"type": "node", "id": 9002, "lat": 22.575, "lon": 88.365},
        {"type": "node", "id": 9003, "lat": 22.58, "lon": 88.37},
        {"type": "node", "id": 9004, "lat": 22.59, "lon": 88.37},
        {"type": "way", "id": 1, "nodes": [9001, 9002, 9003], "tags": {"highway": "primary"}},
        {"type": "way", "id": 2, "nodes": [9003, 9004], "tags": {"highway": "residential", "oneway": "yes"}}
    ]}"#;

    #[test]
    fn osm_file_to_graph() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("kolkata.json");
        let output = dir.path().join("graph.json");
        fs::write(&input, OVERPASS).unwrap();

        let args = Args::try_parse_from([
            "roadgraph",
            "--osm-file", input.to_str().unwrap(),
            "--output", output.to_str().unwrap(),
        ])
        .unwrap();
        let summary = export(&args).unwrap();

        // 9002 is interstitial and merged away; 9001, 9003, 9004 remain.
        assert_eq!(summary.nodes, 3);
        assert_eq!(summary.edges, 3);

        let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(doc["nodes"]["0"]["lat"], 22.57);
        assert_eq!(doc["nodes"]["2"]["lat"], 22.59);
        let edges = doc["edges"].as_array().unwrap();
        let pairs: Vec<(u64, u64)> = edges
            .iter()
            .map(|e| (e["source"].as_u64().unwrap(), e["target"].as_u64().unwrap()))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (1, 0)]);
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn download_without_place_fails_before_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("graph.json");
        let args = Args::try_parse_from([
            "roadgraph",
            "--output", output.to_str().unwrap(),
            "--overpass-url", "http://127.0.0.1:9/api",
            "--nominatim-url", "http://127.0.0.1:9",
        ])
        .unwrap();

        let err = export(&args).unwrap_err();
        assert!(err.to_string().contains("--place"), "{err}");
        assert!(!output.exists());
    }

    #[test]
    fn failed_run_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.json");
        let output = dir.path().join("graph.json");
        fs::write(&input, r#"{"elements": []}"#).unwrap();
        fs::write(&output, "previous").unwrap();

        let args = Args::try_parse_from([
            "roadgraph",
            "--osm-file", input.to_str().unwrap(),
            "--output", output.to_str().unwrap(),
        ])
        .unwrap();
        assert!(export(&args).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }
}
