//! Unit tests for `sv-io`.

#[cfg(test)]
mod save_tests {
    use sv_core::Position;
    use sv_spatial::{MapBuilder, MarkerType};

    use crate::save::{map_from_file, map_to_file, AgentsFile};

    #[test]
    fn round_trips_walls_targets_towers_and_markers() {
        let mut map = MapBuilder::new(5, 4)
            .target(2, 3)
            .tower(0, 0)
            .marker(MarkerType::Red, Position::new(1.0, 1.0))
            .build();
        map.set_wall(1, 1, true);
        map.set_wall(4, 3, true);
        map.set_vision(2, 2, 0.5);

        let file = map_to_file(&map);
        assert_eq!(file.map.size, [5, 4]);
        assert_eq!(file.map.walls.len(), 5);
        assert_eq!(file.map.walls[0].len(), 4);
        assert!(file.map.walls[1][1]);
        assert!(!file.map.walls[0][0]);
        assert_eq!(file.map.vision_modifier[2][2], 0.5);
        assert_eq!(file.map.targets, vec![[2.0, 3.0]]);
        assert_eq!(file.map.towers, vec![[0.0, 0.0]]);
        assert_eq!(file.map.markers.len(), 1);
        assert_eq!(file.map.markers[0].kind, MarkerType::Red);

        let rebuilt = map_from_file(&file).unwrap();
        assert_eq!(rebuilt.width(), 5);
        assert_eq!(rebuilt.height(), 4);
        assert!(rebuilt.is_wall(1, 1));
        assert!(rebuilt.is_wall(4, 3));
        assert!(!rebuilt.is_wall(0, 0));
        assert_eq!(rebuilt.vision_modifier(2, 2), 0.5);
        assert_eq!(rebuilt.targets, map.targets);
        assert_eq!(rebuilt.towers, map.towers);
        assert_eq!(rebuilt.markers.len(), 1);
    }

    #[test]
    fn mismatched_grid_dimensions_are_rejected() {
        let mut map = MapBuilder::new(3, 3).build();
        map.set_wall(0, 0, true);
        let mut file = map_to_file(&map);
        file.map.size = [4, 3];

        assert!(map_from_file(&file).is_err());
    }

    #[test]
    fn json_round_trip_of_a_map_file_via_serde_json() {
        let map = MapBuilder::new(2, 2).target(1, 1).build();
        let file = map_to_file(&map);
        let json = serde_json::to_string(&file).unwrap();
        let parsed: crate::save::MapFile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.map.size, [2, 2]);
        assert_eq!(parsed.map.targets, vec![[1.0, 1.0]]);
    }

    #[test]
    fn agents_file_round_trips_strategy_tags() {
        let file = AgentsFile {
            agents: vec!["patroller".to_string(), "camera".to_string()],
        };
        let json = serde_json::to_string(&file).unwrap();
        let parsed: AgentsFile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.agents, file.agents);
    }
}

#[cfg(test)]
mod report_tests {
    use crate::report::OutcomeReport;

    #[test]
    fn guards_won_report_has_exactly_one_winner() {
        let report = OutcomeReport::guards_won(42.5);
        assert!(report.guard_win);
        assert!(!report.intruder_win);
        assert_eq!(report.time_taken_seconds, 42.5);
    }

    #[test]
    fn intruders_won_report_has_exactly_one_winner() {
        let report = OutcomeReport::intruders_won(12.0);
        assert!(report.intruder_win);
        assert!(!report.guard_win);
    }

    #[test]
    fn undecided_report_has_no_winner() {
        let report = OutcomeReport::undecided(600.0);
        assert!(!report.intruder_win);
        assert!(!report.guard_win);
    }

    #[test]
    fn json_round_trip_matches_spec_field_names() {
        let report = OutcomeReport::guards_won(10.0);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"intruder_win\""));
        assert!(json.contains("\"guard_win\""));
        assert!(json.contains("\"time_taken_seconds\""));
        let parsed: OutcomeReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
