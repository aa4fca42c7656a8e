// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::error::{Result, RoutingError};
use crate::grid::{Cell, Grid};

use super::path::Path;

/// Shortest-path search between two cells of a [`Grid`].
///
/// Implementations must not mutate the grid and must return
/// [`RoutingError::NoPathFound`] when the end cell is unreachable.
pub trait Pathfinder {
    fn find_path(&mut self, grid: &Grid, start: Cell, end: Cell) -> Result<Path>;
}

impl<P: Pathfinder + ?Sized> Pathfinder for &mut P {
    fn find_path(&mut self, grid: &Grid, start: Cell, end: Cell) -> Result<Path> {
        (**self).find_path(grid, start, end)
    }
}

/// A* over 4-connected walkable cells with unit step cost and a Manhattan heuristic.
///
/// Results depend only on the grid and the two anchors: ties on `f` go to the entry that was
/// discovered first, and neighbours are expanded in the grid's north/south/east/west order.
/// The struct only holds reusable scratch buffers.
#[derive(Debug, Default)]
pub struct AStar {
    scratch: SearchScratch,
}

impl AStar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Pathfinder for AStar {
    fn find_path(&mut self, grid: &Grid, start: Cell, end: Cell) -> Result<Path> {
        let start_idx = grid.checked_index(start)?;
        let end_idx = grid.checked_index(end)?;

        if start == end {
            return Ok(Path::from_cells(vec![start]));
        }

        let scratch = &mut self.scratch;
        let gen = scratch.begin(grid.len());
        scratch.set_cost(start_idx, gen, 0, NO_PARENT);
        scratch.heap.push(Reverse((start.manhattan(end), 0, start_idx)));

        let mut seq = 1u64;
        let mut expanded = 0usize;

        while let Some(Reverse((_f_cost, _seq, idx))) = scratch.heap.pop() {
            if !scratch.close(idx, gen) {
                continue;
            }
            expanded += 1;

            if idx == end_idx {
                tracing::trace!(%start, %end, expanded, "a* reached goal");
                return Ok(scratch.reconstruct(grid, start_idx, end_idx));
            }

            let current = grid.cell_of(idx);
            let next_cost = scratch.cost(idx, gen) + 1;
            for next in grid.neighbors(current) {
                if next != end && grid.is_occupied(next) {
                    continue;
                }
                let Some(next_idx) = grid.index_of(next) else {
                    continue;
                };
                if scratch.is_closed(next_idx, gen) || next_cost >= scratch.cost(next_idx, gen) {
                    continue;
                }
                scratch.set_cost(next_idx, gen, next_cost, idx);
                scratch.heap.push(Reverse((next_cost + next.manhattan(end), seq, next_idx)));
                seq += 1;
            }
        }

        tracing::trace!(%start, %end, expanded, "a* exhausted search space");
        Err(RoutingError::NoPathFound { start, end })
    }
}

const NO_PARENT: usize = usize::MAX;

/// Per-search bookkeeping, reused across calls.
///
/// Slots are stamped with a generation number so a new search does not have to clear the
/// arrays; a slot whose stamp differs from the current generation reads as unvisited.
#[derive(Debug, Default)]
struct SearchScratch {
    gen: u32,
    cost_gen: Vec<u32>,
    cost: Vec<usize>,
    closed_gen: Vec<u32>,
    came_from: Vec<usize>,
    heap: BinaryHeap<Reverse<(usize, u64, usize)>>,
}

impl SearchScratch {
    fn begin(&mut self, len: usize) -> u32 {
        if self.cost_gen.len() != len {
            self.cost_gen = vec![0; len];
            self.cost = vec![0; len];
            self.closed_gen = vec![0; len];
            self.came_from = vec![NO_PARENT; len];
            self.gen = 0;
        }

        self.gen = self.gen.wrapping_add(1);
        if self.gen == 0 {
            self.cost_gen.fill(0);
            self.closed_gen.fill(0);
            self.gen = 1;
        }
        self.heap.clear();
        self.gen
    }

    fn cost(&self, idx: usize, gen: u32) -> usize {
        if self.cost_gen[idx] == gen {
            self.cost[idx]
        } else {
            usize::MAX
        }
    }

    fn set_cost(&mut self, idx: usize, gen: u32, cost: usize, came_from: usize) {
        self.cost_gen[idx] = gen;
        self.cost[idx] = cost;
        self.came_from[idx] = came_from;
    }

    fn is_closed(&self, idx: usize, gen: u32) -> bool {
        self.closed_gen[idx] == gen
    }

    /// Returns `false` when `idx` was already expanded in this search.
    fn close(&mut self, idx: usize, gen: u32) -> bool {
        if self.closed_gen[idx] == gen {
            return false;
        }
        self.closed_gen[idx] = gen;
        true
    }

    fn reconstruct(&self, grid: &Grid, start_idx: usize, end_idx: usize) -> Path {
        let mut cells = vec![grid.cell_of(end_idx)];
        let mut cursor = end_idx;
        while cursor != start_idx {
            cursor = self.came_from[cursor];
            debug_assert_ne!(cursor, NO_PARENT, "goal reached without a parent chain");
            cells.push(grid.cell_of(cursor));
        }
        cells.reverse();
        Path::from_cells(cells)
    }
}
