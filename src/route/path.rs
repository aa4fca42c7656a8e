// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use serde::Serialize;

use crate::grid::{Cell, Grid};
use crate::model::CanvasPoint;

/// Ordered, cycle-free run of orthogonally adjacent cells from a start anchor to an end anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// Callers guarantee `cells` is non-empty.
    pub(crate) fn from_cells(cells: Vec<Cell>) -> Self {
        debug_assert!(!cells.is_empty(), "path must contain at least one cell");
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    pub fn end(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of moves, i.e. cell count minus one.
    pub fn len_steps(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Cell centres in canvas pixels, one waypoint per cell.
    pub fn waypoints(&self, grid: &Grid) -> Vec<CanvasPoint> {
        self.cells.iter().map(|cell| grid.cell_to_canvas(*cell)).collect()
    }

    /// Checks adjacency, uniqueness and that no interior cell is occupied on `grid`.
    pub fn is_well_formed(&self, grid: &Grid) -> bool {
        if self.cells.is_empty() || !self.cells.iter().all(|cell| grid.contains(*cell)) {
            return false;
        }
        if !self.cells.windows(2).all(|pair| pair[0].manhattan(pair[1]) == 1) {
            return false;
        }
        let mut seen = HashSet::with_capacity(self.cells.len());
        if !self.cells.iter().all(|cell| seen.insert(*cell)) {
            return false;
        }
        let interior = self.cells.len().saturating_sub(2);
        self.cells.iter().skip(1).take(interior).all(|cell| !grid.is_occupied(*cell))
    }
}
