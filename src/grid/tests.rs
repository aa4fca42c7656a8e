// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{Cell, CellRange, Grid};
use crate::error::RoutingError;
use crate::model::CanvasRect;

#[fixture]
fn grid() -> Grid {
    Grid::new(2000.0, 2000.0, 50.0).expect("grid")
}

fn cell(grid: &Grid, row: usize, col: usize) -> Cell {
    grid.cell_at(row, col).expect("cell in bounds")
}

#[rstest]
fn dimensions_round_up_partial_cells() {
    let grid = Grid::new(1010.0, 420.0, 50.0).expect("grid");
    assert_eq!(grid.rows(), 9);
    assert_eq!(grid.cols(), 21);
    assert_eq!(grid.len(), 9 * 21);
    assert_eq!(grid.occupied_count(), 0);
}

#[rstest]
#[case(0.0)]
#[case(-5.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn rejects_unusable_cell_sizes(#[case] cell_size: f64) {
    assert!(matches!(
        Grid::new(100.0, 100.0, cell_size),
        Err(RoutingError::InvalidGeometry { .. })
    ));
}

#[rstest]
fn empty_canvas_has_no_cells() {
    let grid = Grid::new(0.0, 0.0, 10.0).expect("grid");
    assert!(grid.is_empty());
    assert!(grid.cell_at(0, 0).is_err());
}

#[rstest]
#[case(40, 0)]
#[case(0, 40)]
#[case(100, 100)]
fn cell_at_rejects_indices_past_the_lattice(grid: Grid, #[case] row: usize, #[case] col: usize) {
    let err = grid.cell_at(row, col).expect_err("out of bounds");
    assert!(
        matches!(
            err,
            RoutingError::OutOfBounds {
                rows: 40,
                cols: 40,
                ..
            }
        ),
        "{err}"
    );
}

#[rstest]
fn neighbors_of_interior_cell_are_the_four_orthogonal_cells(grid: Grid) {
    let center = cell(&grid, 20, 20);
    let neighbors = grid.neighbors(center);

    assert_eq!(
        neighbors.as_slice(),
        &[cell(&grid, 19, 20), cell(&grid, 21, 20), cell(&grid, 20, 21), cell(&grid, 20, 19)]
    );
    assert!(!neighbors.contains(&cell(&grid, 19, 19)));
    assert!(!neighbors.contains(&cell(&grid, 20, 18)));
}

#[rstest]
#[case(0, 0, 2)]
#[case(0, 20, 3)]
#[case(39, 39, 2)]
#[case(20, 39, 3)]
#[case(5, 5, 4)]
fn neighbors_never_leave_the_lattice_or_step_diagonally(
    grid: Grid,
    #[case] row: usize,
    #[case] col: usize,
    #[case] expected: usize,
) {
    let origin = cell(&grid, row, col);
    let neighbors = grid.neighbors(origin);
    assert_eq!(neighbors.len(), expected);
    for neighbor in neighbors {
        assert!(grid.contains(neighbor));
        assert_eq!(origin.manhattan(neighbor), 1, "{origin} -> {neighbor}");
    }
}

#[rstest]
fn walkable_neighbors_match_neighbors_on_clear_grid(grid: Grid) {
    let center = cell(&grid, 20, 20);
    assert_eq!(grid.walkable_neighbors(center), grid.neighbors(center));
}

#[rstest]
fn walkable_neighbors_skip_occupied_cells(mut grid: Grid) {
    let center = cell(&grid, 20, 20);
    let south = cell(&grid, 21, 20);
    grid.mark_occupied(CellRange::single(south)).expect("mark");

    let walkable = grid.walkable_neighbors(center);
    assert!(!walkable.contains(&south));
    assert!(walkable.contains(&cell(&grid, 19, 20)));
    assert!(walkable.contains(&cell(&grid, 20, 21)));
    assert!(walkable.contains(&cell(&grid, 20, 19)));
}

#[rstest]
fn marking_twice_matches_marking_once_and_clear_restores(mut grid: Grid) {
    let region = CellRange::new(3..7, 10..12);

    grid.mark_occupied(region).expect("mark");
    let once = grid.clone();
    grid.mark_occupied(region).expect("mark again");
    assert_eq!(grid, once);
    assert_eq!(grid.occupied_count(), 8);

    grid.clear_occupied(region).expect("clear");
    assert_eq!(grid, Grid::new(2000.0, 2000.0, 50.0).expect("fresh grid"));

    grid.clear_occupied(region).expect("clear again");
    assert_eq!(grid.occupied_count(), 0);
}

#[rstest]
fn marking_past_the_lattice_is_rejected_without_side_effects(mut grid: Grid) {
    let err = grid.mark_occupied(CellRange::new(38..41, 0..2)).expect_err("out of bounds");
    assert!(matches!(err, RoutingError::OutOfBounds { row: 40, .. }), "{err}");
    assert_eq!(grid.occupied_count(), 0);
}

#[rstest]
fn reset_clears_every_cell(mut grid: Grid) {
    grid.mark_occupied(CellRange::new(0..40, 0..40)).expect("mark");
    assert_eq!(grid.occupied_count(), 1600);
    grid.reset();
    assert_eq!(grid.occupied_count(), 0);
}

#[rstest]
fn canvas_and_cell_coordinates_round_trip(grid: Grid) {
    let c = grid.canvas_to_cell(1049.0, 75.0).expect("cell");
    assert_eq!((c.row(), c.col()), (1, 20));

    let center = grid.cell_to_canvas(c);
    assert_eq!((center.x, center.y), (1025.0, 75.0));
    assert_eq!(grid.canvas_to_cell(center.x, center.y).expect("cell"), c);

    let origin = grid.cell_origin(c);
    assert_eq!((origin.x, origin.y), (1000.0, 50.0));
}

#[rstest]
#[case(-0.5, 10.0)]
#[case(10.0, 2000.0)]
#[case(2500.0, 0.0)]
fn canvas_points_off_the_lattice_are_out_of_bounds(grid: Grid, #[case] x: f64, #[case] y: f64) {
    assert!(matches!(grid.canvas_to_cell(x, y), Err(RoutingError::OutOfBounds { .. })));
}

#[rstest]
#[case(f64::NAN, 10.0)]
#[case(10.0, f64::NAN)]
#[case(f64::NEG_INFINITY, 10.0)]
fn non_finite_canvas_points_are_invalid_geometry(grid: Grid, #[case] x: f64, #[case] y: f64) {
    let err = grid.canvas_to_cell(x, y).expect_err("non-finite point");
    assert!(matches!(err, RoutingError::InvalidGeometry { .. }), "{err}");
}

#[rstest]
fn footprint_covers_overlapped_cells_only(grid: Grid) {
    let rect = CanvasRect::new(100.0, 60.0, 100.0, 90.0).expect("rect");
    let range = grid.footprint(&rect).expect("footprint");
    assert_eq!(range.rows(), 1..3);
    assert_eq!(range.cols(), 2..4);
}

#[rstest]
fn footprint_is_clipped_to_the_canvas(grid: Grid) {
    let rect = CanvasRect::new(-75.0, 1950.0, 150.0, 300.0).expect("rect");
    let range = grid.footprint(&rect).expect("footprint");
    assert_eq!(range.rows(), 39..40);
    assert_eq!(range.cols(), 0..2);

    let offscreen = CanvasRect::new(5000.0, 5000.0, 10.0, 10.0).expect("rect");
    assert_eq!(grid.footprint(&offscreen), None);
}

#[rstest]
fn zero_sized_rect_claims_its_origin_cell(grid: Grid) {
    let rect = CanvasRect::new(120.0, 120.0, 0.0, 0.0).expect("rect");
    assert_eq!(grid.footprint(&rect), Some(CellRange::new(2..3, 2..3)));
}

#[test]
fn cell_range_intersection_and_iteration() {
    let a = CellRange::new(0..4, 0..4);
    let b = CellRange::new(2..6, 3..8);
    let overlap = a.intersection(&b).expect("overlap");
    assert_eq!(overlap, CellRange::new(2..4, 3..4));
    assert_eq!(overlap.cells().count(), 2);
    assert!(a.intersection(&CellRange::new(4..5, 0..4)).is_none());
}

#[test]
fn ascii_dump_marks_obstacles_and_highlight() {
    let mut grid = Grid::new(40.0, 20.0, 10.0).expect("grid");
    grid.mark_occupied(CellRange::new(0..1, 1..3)).expect("mark");
    let path = [Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2), Cell::new(1, 3)];
    assert_eq!(grid.render_ascii(&path), ".##.\nS**E\n");
}
