// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Anchor selection: where a relationship line leaves a class box.
//!
//! An anchor is the first cell outside a node's footprint, centred on the side that faces the
//! other endpoint. Sides that would fall off the lattice are skipped in a fixed order.

use crate::grid::{Cell, CellRange, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    North,
    South,
    East,
    West,
}

const FALLBACK_ORDER: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

/// Side of `from` facing `to`, judged by the offset between footprint centres.
///
/// Horizontal wins ties so boxes laid out on a row connect side to side.
pub(crate) fn facing_side(from: &CellRange, to: &CellRange) -> Side {
    // Doubled centres keep the comparison in integers.
    let center2 = |range: &CellRange| {
        let rows = range.rows();
        let cols = range.cols();
        ((rows.start + rows.end) as i64, (cols.start + cols.end) as i64)
    };
    let (from_row, from_col) = center2(from);
    let (to_row, to_col) = center2(to);
    let dy = to_row - from_row;
    let dx = to_col - from_col;

    if dx.abs() >= dy.abs() {
        if dx >= 0 {
            Side::East
        } else {
            Side::West
        }
    } else if dy > 0 {
        Side::South
    } else {
        Side::North
    }
}

fn anchor_on(grid: &Grid, footprint: &CellRange, side: Side) -> Option<Cell> {
    let rows = footprint.rows();
    let cols = footprint.cols();
    let mid_row = (rows.start + rows.end - 1) / 2;
    let mid_col = (cols.start + cols.end - 1) / 2;

    let (row, col) = match side {
        Side::North => (rows.start.checked_sub(1)?, mid_col),
        Side::South => (rows.end, mid_col),
        Side::East => (mid_row, cols.end),
        Side::West => (mid_row, cols.start.checked_sub(1)?),
    };
    grid.cell_at(row, col).ok()
}

/// Anchor on `preferred` if it is on the lattice, otherwise on the first usable fallback side.
pub(crate) fn select_anchor(grid: &Grid, footprint: &CellRange, preferred: Side) -> Option<Cell> {
    std::iter::once(preferred)
        .chain(FALLBACK_ORDER.into_iter().filter(|side| *side != preferred))
        .find_map(|side| anchor_on(grid, footprint, side))
}

/// Start and end anchors for a relationship between two placed footprints.
///
/// A self-relationship leaves east and comes back in from the south so the loop has
/// distinct anchors.
pub(crate) fn anchor_pair(
    grid: &Grid,
    source: &CellRange,
    target: &CellRange,
    self_loop: bool,
) -> Option<(Cell, Cell)> {
    if self_loop {
        let start = select_anchor(grid, source, Side::East)?;
        let end = select_anchor(grid, source, Side::South)?;
        return Some((start, end));
    }
    let start = select_anchor(grid, source, facing_side(source, target))?;
    let end = select_anchor(grid, target, facing_side(target, source))?;
    Some((start, end))
}
