use naval_battle::{
    fleet_profile, strike_radius, AttackOutcome, CellState, Coord, Grid, GridError, Orientation,
    SUPPORTED_SIZES,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_adjacent_placement_rejected() {
    let mut grid = Grid::new(6);
    grid.place_ship(3, 0, 0, Orientation::Horizontal).unwrap();

    assert!(!grid.can_place_ship(2, 1, 1, Orientation::Horizontal));
    assert_eq!(
        grid.place_ship(2, 1, 1, Orientation::Horizontal).unwrap_err(),
        GridError::ShipTouches
    );
    assert_eq!(grid.ships().len(), 1);
    assert_eq!(grid.cell(1, 1), Some(CellState::Empty));
}

#[test]
fn test_diagonal_contact_rejected() {
    let mut grid = Grid::new(6);
    grid.place_ship(1, 2, 2, Orientation::Horizontal).unwrap();
    assert!(!grid.can_place_ship(1, 3, 3, Orientation::Horizontal));
    assert!(!grid.can_place_ship(2, 0, 1, Orientation::Horizontal));
    assert!(grid.can_place_ship(1, 4, 4, Orientation::Horizontal));
    assert!(grid.can_place_ship(3, 0, 0, Orientation::Vertical));
}

#[test]
fn test_out_of_bounds_placement_rejected() {
    let mut grid = Grid::new(6);
    assert!(!grid.can_place_ship(3, 4, 0, Orientation::Horizontal));
    assert!(!grid.can_place_ship(3, 0, 4, Orientation::Vertical));
    assert!(!grid.can_place_ship(1, 6, 0, Orientation::Vertical));
    assert!(grid.can_place_ship(3, 3, 0, Orientation::Horizontal));
    assert_eq!(
        grid.place_ship(3, 0, 4, Orientation::Vertical).unwrap_err(),
        GridError::ShipOutOfBounds
    );
    assert_eq!(
        grid.place_ship(0, 0, 0, Orientation::Vertical).unwrap_err(),
        GridError::ZeroLengthShip
    );
    assert!(grid.ships().is_empty());
    assert!(grid.cells().iter().all(|&c| c == CellState::Empty));
}

#[test]
fn test_place_marks_cells() {
    let mut grid = Grid::new(10);
    grid.place_ship(4, 2, 3, Orientation::Vertical).unwrap();
    for y in 3..7 {
        assert_eq!(grid.cell(2, y), Some(CellState::ShipPresent));
    }
    assert_eq!(grid.cell(2, 7), Some(CellState::Empty));
    assert_eq!(
        grid.cells().iter().filter(|&&c| c == CellState::ShipPresent).count(),
        4
    );
}

#[test]
fn test_sinking_single_cell_ship_reveals_neighbors() {
    let mut grid = Grid::new(6);
    grid.place_ship(1, 0, 0, Orientation::Horizontal).unwrap();

    let outcome = grid.attack(0, 0);
    assert!(outcome.is_sunk());
    assert_eq!(outcome.ship().map(|s| s.origin()), Some(Coord::new(0, 0)));
    assert_eq!(grid.cell(0, 0), Some(CellState::Hit));

    for (x, y) in [(1, 0), (0, 1), (1, 1)] {
        assert_eq!(grid.cell(x, y), Some(CellState::Miss));
        assert!(grid.is_revealed(x, y));
    }
    assert!(!grid.is_revealed(2, 2));
    assert_eq!(grid.revealed().count_ones(), 4);
    assert!(grid.all_ships_sunk());
}

#[test]
fn test_hit_then_sink_closure() {
    let mut grid = Grid::new(10);
    grid.place_ship(3, 1, 1, Orientation::Horizontal).unwrap();

    assert!(matches!(grid.attack(1, 1), AttackOutcome::Hit(_)));
    assert!(matches!(grid.attack(2, 1), AttackOutcome::Hit(_)));
    assert!(!grid.is_revealed(0, 0));
    assert!(!grid.all_ships_sunk());

    assert!(matches!(grid.attack(3, 1), AttackOutcome::Sunk(s) if s.length() == 3));
    // The 5x3 block around the ship is fully resolved.
    for y in 0..3 {
        for x in 0..5 {
            assert!(grid.is_revealed(x, y), "({}, {}) should be revealed", x, y);
        }
    }
    assert_eq!(grid.revealed().count_ones(), 15);
    assert_eq!(grid.cell(0, 1), Some(CellState::Miss));
    assert_eq!(grid.cell(4, 2), Some(CellState::Miss));
}

#[test]
fn test_closure_keeps_earlier_results() {
    let mut grid = Grid::new(6);
    grid.place_ship(2, 2, 2, Orientation::Vertical).unwrap();
    grid.place_ship(1, 5, 5, Orientation::Vertical).unwrap();
    assert_eq!(grid.attack(1, 1), AttackOutcome::Miss);
    grid.attack(2, 2);
    grid.attack(2, 3);
    assert_eq!(grid.cell(1, 1), Some(CellState::Miss));
    assert_eq!(grid.cell(2, 2), Some(CellState::Hit));
    assert_eq!(grid.cell(5, 5), Some(CellState::ShipPresent));
    assert!(!grid.all_ships_sunk());
    assert_eq!(grid.ships_remaining(), 1);
}

#[test]
fn test_out_of_bounds_attack_is_noop() {
    let mut grid = Grid::new(6);
    grid.place_ship(1, 0, 0, Orientation::Horizontal).unwrap();
    let before = grid.clone();
    assert_eq!(grid.attack(6, 0), AttackOutcome::Miss);
    assert_eq!(grid.attack(0, 100), AttackOutcome::Miss);
    assert_eq!(grid, before);
    assert!(grid.revealed().is_empty());
}

#[test]
fn test_repeat_miss_is_noop() {
    let mut grid = Grid::new(6);
    assert_eq!(grid.attack(5, 5), AttackOutcome::Miss);
    let after_first = grid.clone();
    assert_eq!(grid.attack(5, 5), AttackOutcome::Miss);
    assert_eq!(grid, after_first);
    assert_eq!(grid.cell(5, 5), Some(CellState::Miss));
}

#[test]
fn test_all_ships_sunk() {
    let mut grid = Grid::new(6);
    assert!(grid.all_ships_sunk());
    grid.place_ship(1, 0, 0, Orientation::Horizontal).unwrap();
    grid.place_ship(1, 4, 4, Orientation::Horizontal).unwrap();
    assert!(!grid.all_ships_sunk());
    grid.attack(0, 0);
    assert!(!grid.all_ships_sunk());
    grid.attack(4, 4);
    assert!(grid.all_ships_sunk());
}

#[test]
fn test_place_ships_randomly_reports_count() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut grid = Grid::new(10);
    let profile = fleet_profile(10);
    let placed = grid.place_ships_randomly(&mut rng, &profile);
    assert_eq!(placed, grid.ships().len());
    assert!(placed <= profile.len());
}

#[test]
fn test_place_ships_randomly_skips_impossible_ship() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut grid = Grid::new(3);
    // A 4-long ship never fits on a 3x3 board; the 1-long one still lands.
    let placed = grid.place_ships_randomly(&mut rng, &[4, 1]);
    assert_eq!(placed, 1);
    assert_eq!(grid.ships()[0].length(), 1);
}

#[test]
fn test_place_fleet_for_standard_sizes() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for size in SUPPORTED_SIZES {
        let mut grid = Grid::new(size);
        grid.place_fleet(&mut rng).unwrap();
        let lengths: Vec<_> = grid.ships().iter().map(|s| s.length()).collect();
        assert_eq!(lengths, fleet_profile(size));
    }
}

#[test]
fn test_place_fleet_gives_up_cleanly() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut grid = Grid::with_profile(2, vec![2, 2]);
    assert_eq!(
        grid.place_fleet(&mut rng).unwrap_err(),
        GridError::UnableToPlaceFleet {
            placed: 1,
            required: 2
        }
    );
    assert!(grid.ships().is_empty());
    assert!(grid.cells().iter().all(|&c| c == CellState::Empty));
}

#[test]
fn test_attack_area_stops_at_revealed_cells() {
    let mut grid = Grid::new(10);
    grid.place_ship(1, 5, 5, Orientation::Horizontal).unwrap();
    let results = grid.attack_area(Coord::new(5, 5), strike_radius(10));
    // The sink at (5, 5) reveals the rest of the square, which is skipped.
    let cells: Vec<_> = results.iter().map(|(c, _)| *c).collect();
    assert_eq!(
        cells,
        vec![
            Coord::new(4, 4),
            Coord::new(5, 4),
            Coord::new(6, 4),
            Coord::new(4, 5),
            Coord::new(5, 5),
        ]
    );
    assert!(results[4].1.is_sunk());
    assert!(results[..4].iter().all(|(_, o)| *o == AttackOutcome::Miss));
}

#[test]
fn test_attack_area_clipped_at_corner() {
    let mut grid = Grid::new(6);
    let results = grid.attack_area(Coord::new(0, 0), 1);
    assert_eq!(results.len(), 4);
    assert_eq!(grid.attack_area(Coord::new(0, 0), 1).len(), 0);
    assert_eq!(grid.attack_area(Coord::new(3, 3), 0).len(), 1);
    assert_eq!(strike_radius(6), 0);
}

#[test]
fn test_attack_area_oversized_radius_covers_board_once() {
    let mut grid = Grid::new(10);
    grid.place_ship(2, 0, 0, Orientation::Horizontal).unwrap();
    let results = grid.attack_area(Coord::new(5, 5), usize::MAX);
    assert!(grid.is_revealed(5, 5));
    assert!(grid.all_ships_sunk());
    // The two ship cells plus every cell the sink did not already reveal.
    assert_eq!(results.len(), 100 - 4);
    assert!((0..10).all(|y| (0..10).all(|x| grid.is_revealed(x, y))));

    let mut grid = Grid::new(10);
    assert_eq!(grid.attack_area(Coord::new(5, 5), 20_000).len(), 100);
}

#[test]
fn test_attack_area_from_off_board_center() {
    let mut grid = Grid::new(6);
    let results = grid.attack_area(Coord::new(7, 0), 2);
    let cells: Vec<_> = results.iter().map(|(c, _)| *c).collect();
    assert_eq!(cells, vec![Coord::new(5, 0), Coord::new(5, 1), Coord::new(5, 2)]);
    assert!(grid.attack_area(Coord::new(100, 100), 3).is_empty());
}

#[test]
fn test_fleet_profiles() {
    assert_eq!(fleet_profile(6), vec![3, 2, 1, 1, 1]);
    assert_eq!(fleet_profile(10), vec![4, 3, 3, 2, 2, 2, 1, 1, 1, 1]);
    assert_eq!(
        fleet_profile(14),
        vec![5, 4, 4, 3, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1, 1]
    );
    assert_eq!(fleet_profile(8), fleet_profile(10));
    assert_eq!(Grid::new(14).profile(), &fleet_profile(14)[..]);
}

#[test]
fn test_zero_size() {
    assert_eq!(Grid::try_new(0).unwrap_err(), GridError::ZeroSize);
}

#[test]
#[should_panic]
fn test_zero_size_panics() {
    let _ = Grid::new(0);
}

#[test]
fn test_coord_neighbors_order_and_bounds() {
    let at = Coord::new(2, 2);
    let around: Vec<Coord> = at.neighbors4(5).collect();
    assert_eq!(
        around,
        vec![Coord::new(3, 2), Coord::new(2, 3), Coord::new(1, 2), Coord::new(2, 1)]
    );
    assert_eq!(Coord::new(0, 0).neighbors4(5).count(), 2);
    assert_eq!(Coord::new(0, 0).neighbors8(5).count(), 4);
    assert_eq!(at.neighbors8(5).count(), 9);
    assert_eq!(Coord::new(4, 4).offset(1, 0, 5), None);
    assert_eq!(Coord::new(0, 4).offset(-1, 0, 5), None);
    assert_eq!(at.offset(-2, 2, 5), Some(Coord::new(0, 4)));
}

#[test]
fn test_absurd_ship_length_is_rejected() {
    let mut grid = Grid::new(10);
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        assert!(!grid.can_place_ship(usize::MAX, 2, 0, orientation));
        assert!(!grid.can_place_ship(11, 0, 0, orientation));
        assert_eq!(
            grid.place_ship(usize::MAX, 2, 0, orientation).unwrap_err(),
            GridError::ShipOutOfBounds
        );
    }
    assert!(grid.can_place_ship(10, 0, 0, Orientation::Horizontal));
    assert!(grid.ships().is_empty());
}
