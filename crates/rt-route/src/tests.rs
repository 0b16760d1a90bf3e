//! Unit tests for rt-route.

#[cfg(test)]
mod helpers {
    use rt_core::GeoPoint;
    use rt_spatial::{CsvMapSource, DijkstraRouter, GraphLoader, LoaderConfig};

    use crate::RoutePlanner;

    /// Same small Bogotá map the rt-spatial tests use.
    ///
    /// ```text
    ///   residential:  1 ── 2 ── 3 ── 4 ── 8 (far north)
    ///   footway:           2 ── 5
    ///   motorway:     1 ──────────► 4      (one-way, no length)
    ///   island:       6 ── 7
    /// ```
    const NODES_CSV: &str = "\
id,lat,lon\n\
1,4.6000,-74.0700\n\
2,4.6010,-74.0700\n\
3,4.6020,-74.0700\n\
4,4.6020,-74.0690\n\
5,4.6010,-74.0690\n\
6,4.6005,-74.0710\n\
7,4.6005,-74.0712\n\
8,4.7000,-74.0690\n\
";

    const EDGES_CSV: &str = "\
from,to,length_m,highway,oneway\n\
1,2,110,residential,no\n\
2,3,110,residential,\n\
3,4,110,residential,\n\
2,5,110,footway,\n\
1,4,,motorway,yes\n\
6,7,25,residential,\n\
4,8,11000,residential,\n\
";

    pub const P1: GeoPoint = GeoPoint { lat: 4.6000, lon: -74.0700 };
    pub const P4: GeoPoint = GeoPoint { lat: 4.6020, lon: -74.0690 };
    pub const P6: GeoPoint = GeoPoint { lat: 4.6005, lon: -74.0710 };

    pub fn write_map(dir: &std::path::Path) {
        std::fs::write(dir.join("nodes.csv"), NODES_CSV).unwrap();
        std::fs::write(dir.join("edges.csv"), EDGES_CSV).unwrap();
    }

    pub fn planner(
        dir: &std::path::Path,
        config: LoaderConfig,
    ) -> RoutePlanner<CsvMapSource, DijkstraRouter> {
        RoutePlanner::new(GraphLoader::new(CsvMapSource::from_dir(dir), config), DijkstraRouter)
    }
}

// ── Single requests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod process {
    use rt_core::TransitMode;
    use rt_spatial::{LoaderConfig, SpatialError, SpeedTable};

    use super::helpers::{P1, P4, P6, planner, write_map};
    use crate::{RouteError, RouteOutcome, RouteRequest};

    #[test]
    fn walk_route_found() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path());
        let p = planner(dir.path(), LoaderConfig::default());

        let req = RouteRequest::new("1 to 4 on foot", TransitMode::Walk, P1, P4).with_buffer_km(1.0);
        let outcome = p.process_route(&req);

        let found = outcome.as_found().expect("route should be found");
        assert_eq!(found.label, "1 to 4 on foot");
        assert_eq!(found.mode, TransitMode::Walk);
        assert_eq!(found.origin, P1);
        assert_eq!(found.destination, P4);
        assert_eq!(found.route.nodes.len(), 3);
        assert_eq!(found.path.len(), 3);
        assert_eq!(found.path[0], P1);
        assert_eq!(*found.path.last().unwrap(), P4);
        assert_eq!(found.length_m, 330.0);
        assert!((found.total_minutes() - 3.96).abs() < 1e-9);
        assert!(outcome.skip_reason().is_none());
    }

    #[test]
    fn custom_speeds_change_minutes_not_path() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path());
        let p = planner(dir.path(), LoaderConfig::default())
            .speeds(SpeedTable { walk_kmh: 10.0, ..SpeedTable::default() });

        let req = RouteRequest::new("fast walker", TransitMode::Walk, P1, P4).with_buffer_km(1.0);
        let found = p.plan(&req).unwrap();
        assert_eq!(found.length_m, 330.0);
        assert!((found.total_minutes() - 1.98).abs() < 1e-9);
    }

    #[test]
    fn drive_prefers_one_way_motorway() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path());
        let p = planner(dir.path(), LoaderConfig::default());

        let there = p
            .plan(&RouteRequest::new("out", TransitMode::Drive, P1, P4).with_buffer_km(1.0))
            .unwrap();
        assert!((there.total_minutes() - 0.0015).abs() < 1e-9);

        let back = p
            .plan(&RouteRequest::new("back", TransitMode::Drive, P4, P1).with_buffer_km(1.0))
            .unwrap();
        assert!((back.total_minutes() - 0.495).abs() < 1e-9);
    }

    #[test]
    fn disconnected_endpoints_give_no_path() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path());
        let config = LoaderConfig { retain_all: true, ..LoaderConfig::default() };
        let p = planner(dir.path(), config);

        let req = RouteRequest::new("island", TransitMode::Walk, P6, P4).with_buffer_km(1.0);
        let outcome = p.process_route(&req);
        assert!(matches!(outcome, RouteOutcome::NoPath { .. }));
        assert_eq!(outcome.label(), "island");
        assert!(outcome.skip_reason().unwrap().contains("no route"));
    }

    #[test]
    fn missing_map_data_fails() {
        let dir = tempfile::tempdir().unwrap();
        let p = planner(dir.path(), LoaderConfig::default());

        let outcome = p.process_route(&RouteRequest::new("nothing", TransitMode::Walk, P1, P4));
        match outcome {
            RouteOutcome::Failed { label, error } => {
                assert_eq!(label, "nothing");
                assert!(matches!(
                    error,
                    RouteError::Spatial(SpatialError::DataUnavailable { .. })
                ));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn empty_region_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path());
        let p = planner(dir.path(), LoaderConfig::default());

        let req = RouteRequest::new("tiny", TransitMode::Walk, P1, P4).with_buffer_km(0.001);
        let outcome = p.process_route(&req);
        assert!(matches!(
            outcome,
            RouteOutcome::Failed { error: RouteError::Spatial(SpatialError::EmptyNetwork), .. }
        ));
    }

    #[test]
    fn invalid_speed_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path());
        let p = planner(dir.path(), LoaderConfig::default())
            .speeds(SpeedTable { drive_kmh: 0.0, ..SpeedTable::default() });

        let outcome = p.process_route(&RouteRequest::new("stuck", TransitMode::Drive, P1, P4));
        assert!(matches!(
            outcome,
            RouteOutcome::Failed { error: RouteError::Spatial(SpatialError::InvalidSpeed(_)), .. }
        ));
    }
}

// ── Batches ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch {
    use rt_core::TransitMode;
    use rt_spatial::LoaderConfig;

    use super::helpers::{P1, P4, P6, planner, write_map};
    use crate::{BatchSummary, NoopRenderer, PlannedRoute, RouteOutcome, RouteRenderer, RouteRequest};

    #[derive(Default)]
    struct Recorder {
        routes:  Vec<String>,
        skipped: Vec<String>,
        ended:   usize,
    }

    impl RouteRenderer for Recorder {
        fn on_route(&mut self, route: &PlannedRoute) {
            self.routes.push(route.label.clone());
        }
        fn on_skipped(&mut self, outcome: &RouteOutcome) {
            self.skipped.push(outcome.label().to_owned());
        }
        fn on_batch_end(&mut self, summary: &BatchSummary) {
            self.ended += 1;
            assert_eq!(summary.outcomes.len(), self.routes.len() + self.skipped.len());
        }
    }

    fn requests() -> Vec<RouteRequest> {
        vec![
            RouteRequest::new("walk", TransitMode::Walk, P1, P4).with_buffer_km(1.0),
            RouteRequest::new("bad buffer", TransitMode::Walk, P1, P4).with_buffer_km(-2.0),
            RouteRequest::new("island", TransitMode::Walk, P6, P4).with_buffer_km(1.0),
            RouteRequest::new("drive", TransitMode::Drive, P4, P1).with_buffer_km(1.0),
        ]
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path());
        let config = LoaderConfig { retain_all: true, ..LoaderConfig::default() };
        let p = planner(dir.path(), config);

        let mut rec = Recorder::default();
        let summary = p.run_batch(&requests(), &mut rec);

        assert_eq!(summary.found(), 2);
        assert_eq!(summary.no_path(), 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(rec.routes, vec!["walk", "drive"]);
        assert_eq!(rec.skipped, vec!["bad buffer", "island"]);
        assert_eq!(rec.ended, 1);
    }

    #[test]
    fn outcomes_keep_request_order() {
        let dir = tempfile::tempdir().unwrap();
        write_map(dir.path());
        let p = planner(dir.path(), LoaderConfig { retain_all: true, ..LoaderConfig::default() });

        let summary = p.run_batch(&requests(), &mut NoopRenderer);
        let labels: Vec<&str> = summary.outcomes.iter().map(|o| o.label()).collect();
        assert_eq!(labels, vec!["walk", "bad buffer", "island", "drive"]);
    }

    #[test]
    fn empty_batch_still_ends() {
        let dir = tempfile::tempdir().unwrap();
        let p = planner(dir.path(), LoaderConfig::default());
        let mut rec = Recorder::default();
        let summary = p.run_batch(&[], &mut rec);
        assert!(summary.outcomes.is_empty());
        assert_eq!(rec.ended, 1);
    }
}

// ── Request CSV ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod requests {
    use std::io::Cursor;

    use rt_core::{CoreError, TransitMode};
    use rt_spatial::DEFAULT_BUFFER_KM;

    use crate::{RouteError, load_requests_csv, load_requests_reader};

    const CSV: &str = "\
label,mode,start_lat,start_lon,end_lat,end_lon,buffer_km\n\
Casa -> Externado,walk,4.606979,-74.073794,4.595600,-74.069014,\n\
Externado -> Ibero,drive,4.595600,-74.069014,4.649893,-74.057384,8\n\
Bici,all,4.6,-74.07,4.61,-74.06,\n\
";

    #[test]
    fn parses_rows_in_order() {
        let reqs = load_requests_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(reqs.len(), 3);
        assert_eq!(reqs[0].label, "Casa -> Externado");
        assert_eq!(reqs[0].mode, TransitMode::Walk);
        assert_eq!(reqs[0].buffer_km, DEFAULT_BUFFER_KM);
        assert_eq!(reqs[1].mode, TransitMode::Drive);
        assert_eq!(reqs[1].buffer_km, 8.0);
        assert_eq!(reqs[2].mode, TransitMode::Other);
    }

    #[test]
    fn misspelled_mode_is_rejected() {
        let csv = "label,mode,start_lat,start_lon,end_lat,end_lon,buffer_km\n\
                   typo,wlak,4.6,-74.07,4.61,-74.06,\n";
        let err = load_requests_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, RouteError::Core(CoreError::UnknownMode(_))));
    }

    #[test]
    fn out_of_range_coordinate_is_rejected() {
        let csv = "label,mode,start_lat,start_lon,end_lat,end_lon,buffer_km\n\
                   far,walk,95.0,-74.07,4.61,-74.06,\n";
        let err = load_requests_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, RouteError::Core(CoreError::InvalidCoordinate { .. })));
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let csv = "label,mode,start_lat,start_lon,end_lat,end_lon,buffer_km\n\
                   broken,walk,north,-74.07,4.61,-74.06,\n";
        let err = load_requests_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, RouteError::Parse(_)));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.csv");
        std::fs::write(&path, CSV).unwrap();
        assert_eq!(load_requests_csv(&path).unwrap().len(), 3);

        let missing = load_requests_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(missing, RouteError::Io(_)));
    }
}
