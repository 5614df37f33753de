//! Unit tests for sv-spatial.

#[cfg(test)]
mod map_tests {
    use crate::map::MapBuilder;

    #[test]
    fn out_of_bounds_is_wall() {
        let map = MapBuilder::new(5, 5).build();
        assert!(map.is_wall(-1, 0));
        assert!(map.is_wall(5, 0));
        assert!(!map.is_wall(2, 2));
    }

    #[test]
    fn set_wall_rectangle_fills_only_edges() {
        let mut map = MapBuilder::new(5, 5).build();
        map.set_wall_rectangle(1, 1, 3, 3, true);
        // corners and edge midpoints are walls
        assert!(map.is_wall(1, 1));
        assert!(map.is_wall(2, 1));
        assert!(map.is_wall(3, 3));
        assert!(map.is_wall(1, 3));
        // interior is not
        assert!(!map.is_wall(2, 2));
    }

    #[test]
    fn vision_modifier_defaults_to_one_and_clamps() {
        let mut map = MapBuilder::new(3, 3).build();
        assert_eq!(map.vision_modifier(1, 1), 1.0);
        map.set_vision(1, 1, 5.0);
        assert_eq!(map.vision_modifier(1, 1), 1.0);
        map.set_vision(1, 1, -5.0);
        assert_eq!(map.vision_modifier(1, 1), 0.0);
    }

    #[test]
    fn vision_area_fills_rectangle() {
        let mut map = MapBuilder::new(5, 5).build();
        map.set_vision_area(1, 1, 2, 2, 0.5);
        assert_eq!(map.vision_modifier(1, 1), 0.5);
        assert_eq!(map.vision_modifier(2, 2), 0.5);
        assert_eq!(map.vision_modifier(0, 0), 1.0);
    }

    #[test]
    fn add_and_remove_target_by_manhattan_distance() {
        let mut map = MapBuilder::new(10, 10).build();
        map.add_target(5, 5);
        assert_eq!(map.targets.len(), 1);
        map.remove_target(6, 6); // manhattan distance 2
        assert_eq!(map.targets.len(), 0);
    }

    #[test]
    fn remove_target_out_of_range_is_noop() {
        let mut map = MapBuilder::new(10, 10).build();
        map.add_target(5, 5);
        map.remove_target(8, 8);
        assert_eq!(map.targets.len(), 1);
    }
}

#[cfg(test)]
mod view_tests {
    use std::sync::Arc;

    use crate::graph::Graph;
    use crate::map::MapBuilder;
    use crate::view::MapView;

    #[test]
    fn reveal_at_origin_does_not_read_out_of_bounds() {
        let map = Arc::new(MapBuilder::new(5, 5).build());
        let mut view = MapView::new(map);
        // Should not panic despite the reveal square extending past (0,0).
        view.reveal_visible(0, 0, 3.0, 360.0, 0.0, false);
        assert!(view.is_revealed(0, 0));
    }

    #[test]
    fn revealed_is_monotone_and_out_of_bounds_true() {
        let map = Arc::new(MapBuilder::new(5, 5).build());
        let mut view = MapView::new(map);
        assert!(view.is_revealed(10, 10)); // out of bounds
        assert!(!view.is_revealed(2, 2));
        view.reveal_visible(2, 2, 1.0, 360.0, 0.0, false);
        assert!(view.is_revealed(2, 2));
        let before = view.revealed_count();
        view.reveal_visible(2, 2, 1.0, 360.0, 0.0, false);
        assert_eq!(view.revealed_count(), before);
    }

    #[test]
    fn reveal_stops_at_wall_but_wall_itself_is_revealed() {
        let mut map = MapBuilder::new(10, 10).build();
        map.set_wall(5, 5, true);
        let mut view = MapView::new(Arc::new(map));
        // looking straight along +y (heading 0) with a wide cone so the wall
        // at (5,5) and the cell behind it at (5,6) are both geometrically
        // within range and angle.
        view.reveal_visible(5, 3, 5.0, 360.0, 0.0, false);
        assert!(view.is_revealed(5, 5), "wall itself should be revealed");
        assert!(
            !view.is_revealed(5, 6),
            "cell behind the wall must stay hidden"
        );
    }

    #[test]
    fn cone_excludes_behind_agent() {
        let map = Arc::new(MapBuilder::new(10, 10).build());
        let mut view = MapView::new(map);
        // Facing +y (heading 0) with a narrow cone; a cell directly behind
        // (south) should not be revealed.
        view.reveal_visible(5, 5, 4.0, 45.0, 0.0, false);
        assert!(view.is_revealed(5, 7));
        assert!(!view.is_revealed(5, 2));
    }

    #[test]
    fn no_corner_cutting_in_neighbors() {
        let mut map = MapBuilder::new(5, 5).build();
        map.set_wall(2, 1, true);
        map.set_wall(1, 2, true);
        let map = Arc::new(map);
        let mut view = MapView::new(map);
        view.reveal_visible(1, 1, 3.0, 360.0, 0.0, false);
        view.reveal_visible(2, 2, 3.0, 360.0, 0.0, false);
        let neighbors = view.neighbors((1, 1));
        assert!(
            !neighbors.contains(&(2, 2)),
            "diagonal blocked by two orthogonal walls must not be a neighbor"
        );
    }

    #[test]
    fn unrevealed_cells_are_passable() {
        let map = Arc::new(MapBuilder::new(5, 5).build());
        let view = MapView::new(map);
        assert!(view.passable((3, 3)));
    }
}

#[cfg(test)]
mod pathfind_tests {
    use std::sync::Arc;

    use crate::map::MapBuilder;
    use crate::pathfind::find_path;
    use crate::view::MapView;
    use sv_core::Position;

    fn open_view(w: u32, h: u32) -> MapView {
        MapView::new(Arc::new(MapBuilder::new(w, h).build()))
    }

    #[test]
    fn find_path_to_self_is_singleton() {
        let view = open_view(5, 5);
        let p = Position::new(1.5, 1.5);
        let path = find_path(&view, p, p).unwrap();
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn find_path_around_a_wall_with_a_gap() {
        let mut map = MapBuilder::new(5, 5).build();
        // wall column at x=2 except a gap at y=2
        for y in 0..5 {
            if y != 2 {
                map.set_wall(2, y, true);
            }
        }
        let view = MapView::new(Arc::new(map));
        let path = find_path(&view, Position::new(0.5, 0.5), Position::new(4.5, 4.5)).unwrap();

        let cells: Vec<(i32, i32)> = path
            .iter()
            .map(|p| (p.x.floor() as i32, p.y.floor() as i32))
            .collect();
        assert!(cells.contains(&(2, 2)), "path must cross the gap at (2,2)");

        // every consecutive pair is a valid king-move step
        for w in cells.windows(2) {
            let dx = (w[1].0 - w[0].0).abs();
            let dy = (w[1].1 - w[0].1).abs();
            assert!(dx <= 1 && dy <= 1 && (dx + dy) > 0);
        }
    }

    #[test]
    fn find_path_to_wall_substitutes_nearest_passable() {
        let mut map = MapBuilder::new(5, 5).build();
        map.set_wall(3, 3, true);
        let view = MapView::new(Arc::new(map));
        let path = find_path(&view, Position::new(0.5, 0.5), Position::new(3.5, 3.5));
        assert!(path.is_some());
        let last = *path.unwrap().last().unwrap();
        assert!((last.x - 3.5, last.y - 3.5) != (0.0, 0.0));
    }

    #[test]
    fn find_path_returns_none_when_sealed_off() {
        let mut map = MapBuilder::new(5, 5).build();
        map.set_wall_rectangle(1, 1, 3, 3, true);
        let view = MapView::new(Arc::new(map));
        let path = find_path(&view, Position::new(2.5, 2.5), Position::new(0.5, 0.5));
        assert!(path.is_none());
    }
}
