// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Spatial index for relationship routing.
//!
//! The canvas is discretized into square cells of a fixed edge length. Occupancy lives in a
//! private row-major arena, so the only way to change it is through [`Grid`]'s methods.

use std::fmt;
use std::ops::Range;

use serde::Serialize;
use smallvec::SmallVec;

use crate::error::{Result, RoutingError};
use crate::model::{CanvasPoint, CanvasRect};

/// Address of one lattice cell. Equality is by `(row, col)` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    row: usize,
    col: usize,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn manhattan(&self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rectangular block of cells: half-open row range × half-open col range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    row_start: usize,
    row_end: usize,
    col_start: usize,
    col_end: usize,
}

impl CellRange {
    pub fn new(rows: Range<usize>, cols: Range<usize>) -> Self {
        Self {
            row_start: rows.start,
            row_end: rows.end.max(rows.start),
            col_start: cols.start,
            col_end: cols.end.max(cols.start),
        }
    }

    pub fn single(cell: Cell) -> Self {
        Self::new(cell.row..cell.row + 1, cell.col..cell.col + 1)
    }

    pub fn rows(&self) -> Range<usize> {
        self.row_start..self.row_end
    }

    pub fn cols(&self) -> Range<usize> {
        self.col_start..self.col_end
    }

    pub fn is_empty(&self) -> bool {
        self.row_start == self.row_end || self.col_start == self.col_end
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.rows().contains(&cell.row) && self.cols().contains(&cell.col)
    }

    pub fn intersection(&self, other: &CellRange) -> Option<CellRange> {
        let range = CellRange::new(
            self.row_start.max(other.row_start)..self.row_end.min(other.row_end),
            self.col_start.max(other.col_start)..self.col_end.min(other.col_end),
        );
        (!range.is_empty()).then_some(range)
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows()
            .flat_map(move |row| self.cols().map(move |col| Cell::new(row, col)))
    }
}

/// Fixed-resolution occupancy lattice covering one diagram canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cell_size: f64,
    width: f64,
    height: f64,
    rows: usize,
    cols: usize,
    occupied: Vec<bool>,
}

impl Grid {
    /// Builds an all-clear grid with `ceil(height / cell_size)` rows and
    /// `ceil(width / cell_size)` columns.
    pub fn new(width: f64, height: f64, cell_size: f64) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(RoutingError::geometry(format!(
                "cell size must be a positive finite number (got {cell_size})"
            )));
        }
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(RoutingError::geometry(format!(
                "canvas size must be finite and non-negative (width={width}, height={height})"
            )));
        }

        let rows = (height / cell_size).ceil() as usize;
        let cols = (width / cell_size).ceil() as usize;
        let len = rows.checked_mul(cols).ok_or_else(|| {
            RoutingError::geometry(format!("routing grid area overflow ({rows}x{cols})"))
        })?;

        Ok(Self {
            cell_size,
            width,
            height,
            rows,
            cols,
            occupied: vec![false; len],
        })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell> {
        if row >= self.rows || col >= self.cols {
            return Err(self.out_of_bounds(row as i64, col as i64));
        }
        Ok(Cell::new(row, col))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Occupancy of `cell`; cells outside the lattice read as occupied.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.index_of(cell).map_or(true, |idx| self.occupied[idx])
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|occupied| **occupied).count()
    }

    pub fn mark_occupied(&mut self, range: CellRange) -> Result<()> {
        self.set_range(range, true)
    }

    pub fn clear_occupied(&mut self, range: CellRange) -> Result<()> {
        self.set_range(range, false)
    }

    pub fn reset(&mut self) {
        self.occupied.fill(false);
    }

    /// Orthogonal in-bounds neighbours in north, south, east, west order.
    pub fn neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        let mut out = SmallVec::new();
        if !self.contains(cell) {
            return out;
        }
        if cell.row > 0 {
            out.push(Cell::new(cell.row - 1, cell.col));
        }
        if cell.row + 1 < self.rows {
            out.push(Cell::new(cell.row + 1, cell.col));
        }
        if cell.col + 1 < self.cols {
            out.push(Cell::new(cell.row, cell.col + 1));
        }
        if cell.col > 0 {
            out.push(Cell::new(cell.row, cell.col - 1));
        }
        out
    }

    pub fn walkable_neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        let mut out = self.neighbors(cell);
        out.retain(|neighbor| !self.is_occupied(*neighbor));
        out
    }

    pub fn canvas_to_cell(&self, x: f64, y: f64) -> Result<Cell> {
        if !x.is_finite() || !y.is_finite() {
            return Err(RoutingError::geometry(format!(
                "canvas point must be finite (x={x}, y={y})"
            )));
        }
        let row = (y / self.cell_size).floor() as i64;
        let col = (x / self.cell_size).floor() as i64;
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return Err(self.out_of_bounds(row, col));
        }
        Ok(Cell::new(row as usize, col as usize))
    }

    /// Centre of `cell` in canvas pixels.
    pub fn cell_to_canvas(&self, cell: Cell) -> CanvasPoint {
        let origin = self.cell_origin(cell);
        CanvasPoint::new(
            origin.x + self.cell_size / 2.0,
            origin.y + self.cell_size / 2.0,
        )
    }

    /// Top-left corner of `cell` in canvas pixels.
    pub fn cell_origin(&self, cell: Cell) -> CanvasPoint {
        CanvasPoint::new(
            cell.col as f64 * self.cell_size,
            cell.row as f64 * self.cell_size,
        )
    }

    /// Cells overlapped by `rect`, clipped to the lattice.
    ///
    /// Edges that land exactly on a cell boundary do not claim the next cell. A zero-sized
    /// rectangle still claims the cell containing its origin.
    pub fn footprint(&self, rect: &CanvasRect) -> Option<CellRange> {
        let cs = self.cell_size;
        let span = |start: f64, end: f64, limit: usize| -> Range<usize> {
            let first = (start / cs).floor();
            let last = (end / cs).ceil().max(first + 1.0);
            let clamp = |v: f64| v.clamp(0.0, limit as f64) as usize;
            clamp(first)..clamp(last)
        };

        let range = CellRange::new(
            span(rect.y(), rect.bottom(), self.rows),
            span(rect.x(), rect.right(), self.cols),
        );
        (!range.is_empty()).then_some(range)
    }

    /// Text dump of the lattice: `#` occupied, `.` free, `*` highlighted, `S`/`E` for the first
    /// and last highlighted cell.
    pub fn render_ascii(&self, highlight: &[Cell]) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(row, col);
                let ch = if highlight.first() == Some(&cell) {
                    'S'
                } else if highlight.last() == Some(&cell) {
                    'E'
                } else if highlight.contains(&cell) {
                    '*'
                } else if self.is_occupied(cell) {
                    '#'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }

    pub(crate) fn index_of(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.cols + cell.col)
    }

    pub(crate) fn checked_index(&self, cell: Cell) -> Result<usize> {
        self.index_of(cell)
            .ok_or_else(|| self.out_of_bounds(cell.row as i64, cell.col as i64))
    }

    pub(crate) fn cell_of(&self, idx: usize) -> Cell {
        Cell::new(idx / self.cols, idx % self.cols)
    }

    fn set_range(&mut self, range: CellRange, occupied: bool) -> Result<()> {
        if range.is_empty() {
            return Ok(());
        }
        if range.row_end > self.rows || range.col_end > self.cols {
            return Err(self.out_of_bounds(
                range.row_end as i64 - 1,
                range.col_end as i64 - 1,
            ));
        }
        for row in range.rows() {
            let base = row * self.cols;
            self.occupied[base + range.col_start..base + range.col_end].fill(occupied);
        }
        Ok(())
    }

    fn out_of_bounds(&self, row: i64, col: i64) -> RoutingError {
        RoutingError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

#[cfg(test)]
mod tests;
