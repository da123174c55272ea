use goap_nav::{GridError, NavGrid, NavPath, Navigator, Vec3};

fn walled_grid() -> NavGrid {
    // A wall along x = 2 with a single gap at z = 2.
    let wall = (0..5).filter(|&z| z != 2).map(|z| [2, z]);
    NavGrid::new(5, 5, 1.0).unwrap().with_blocked(wall)
}

/// Samples every segment of `path` and checks it never leaves walkable ground.
fn stays_on_walkable_ground(grid: &NavGrid, path: &NavPath) -> bool {
    path.points.windows(2).all(|w| {
        (0..=16).all(|i| {
            let t = i as f32 / 16.0;
            grid.is_walkable(w[0] + (w[1] - w[0]) * t)
        })
    })
}

#[test]
fn nav_grid_finds_path_around_blockers() {
    let grid = walled_grid();

    let start = Vec3::ground(0.5, 0.5);
    let goal = Vec3::ground(4.5, 4.5);
    let path = grid.find_path(start, goal).expect("path should exist");

    assert_eq!(path.points.first().copied(), Some(start));
    assert_eq!(path.points.last().copied(), Some(goal));
    assert!(stays_on_walkable_ground(&grid, &path));
    assert!(path.length() > start.distance(goal));
}

#[test]
fn open_ground_is_crossed_diagonally_in_one_segment() {
    let grid = NavGrid::new(8, 8, 1.0).unwrap();

    let start = Vec3::ground(0.5, 0.5);
    let goal = Vec3::ground(6.5, 6.5);
    let path = grid.find_path(start, goal).expect("path should exist");

    assert_eq!(path.points, vec![start, goal]);
}

#[test]
fn waypoints_mark_only_the_turns() {
    // Column x = 1 is walled except at the far end, forcing one detour.
    let wall = (0..4).map(|z| [1, z]);
    let grid = NavGrid::new(3, 5, 1.0).unwrap().with_blocked(wall);

    let path = grid
        .find_path(Vec3::ground(0.5, 0.5), Vec3::ground(2.5, 0.5))
        .expect("path should exist");

    assert!(stays_on_walkable_ground(&grid, &path));
    assert!(path.points.len() < 9, "straight runs collapse: {:?}", path.points);
    assert!(path.points.iter().any(|p| p.z > 4.0));
}

#[test]
fn sealed_off_cells_are_unreachable() {
    let mut grid = walled_grid();
    assert!(grid.can_reach(Vec3::ground(0.5, 0.5), Vec3::ground(4.5, 4.5)));

    grid.set_blocked(2, 2, true);

    assert!(!grid.can_reach(Vec3::ground(0.5, 0.5), Vec3::ground(4.5, 4.5)));
    assert!(grid.find_path(Vec3::ground(0.5, 0.5), Vec3::ground(4.5, 4.5)).is_none());
    assert!(grid.can_reach(Vec3::ground(0.5, 0.5), Vec3::ground(1.5, 4.5)));
    assert!(!grid.can_reach(Vec3::ground(0.5, 0.5), Vec3::ground(-3.0, 0.5)));

    // Reopening the gap reconnects both sides.
    grid.set_blocked(2, 2, false);
    assert!(grid.can_reach(Vec3::ground(0.5, 0.5), Vec3::ground(4.5, 4.5)));
}

#[test]
fn nearest_point_projects_onto_walkable_cells() {
    let grid = walled_grid();

    let inside = Vec3::ground(0.25, 0.75);
    assert_eq!(grid.nearest_point(inside), Some(inside));

    let on_wall = Vec3::ground(2.5, 0.5);
    let projected = grid.nearest_point(on_wall).expect("walkable cell");
    assert!(grid.is_walkable(projected));
    assert!((projected.distance(on_wall) - 1.0).abs() < 1e-5);

    // Far outside the grid, the unbounded projection still lands on it.
    assert!(grid.nearest_point(Vec3::ground(-40.0, 2.5)).is_some());
}

#[test]
fn sampling_respects_the_distance_limit() {
    let grid = walled_grid();

    let on_wall = Vec3::ground(2.5, 0.5);
    assert_eq!(grid.sample_near(on_wall, 0.5), None);
    let sampled = grid.sample_near(on_wall, 1.0).expect("neighbouring cell");
    assert!(grid.is_walkable(sampled));
    assert_eq!(grid.sample_near(Vec3::ground(-30.0, 0.5), 2.0), None);
}

#[test]
fn invalid_dimensions_are_rejected() {
    assert_eq!(
        NavGrid::new(0, 3, 1.0).unwrap_err(),
        GridError::Empty { width: 0, depth: 3 }
    );
    assert!(matches!(
        NavGrid::new(3, 3, f32::INFINITY),
        Err(GridError::InvalidCellSize(_))
    ));
}

#[test]
fn nav_grid_is_deterministic_for_same_input() {
    let wall = (0..10).filter(|&z| z != 5).map(|z| [5, z]);
    let grid = NavGrid::new(10, 10, 1.0).unwrap().with_blocked(wall);

    let start = Vec3::ground(1.5, 1.5);
    let goal = Vec3::ground(8.5, 8.5);

    let a = grid.find_path(start, goal).expect("path should exist");
    let b = grid.find_path(start, goal).expect("path should exist");

    assert_eq!(a.points, b.points);
    assert!(stays_on_walkable_ground(&grid, &a));
}
