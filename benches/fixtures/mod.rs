// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use classroute::model::{CanvasPoint, RelationshipKey};
use classroute::RouteOutcome;

fn mix(acc: u64, value: u64) -> u64 {
    acc.wrapping_mul(131).wrapping_add(value)
}

fn checksum_point(acc: u64, point: &CanvasPoint) -> u64 {
    mix(mix(acc, point.x.to_bits()), point.y.to_bits())
}

pub fn checksum_outcomes(drawn: &[(RelationshipKey, RouteOutcome)]) -> u64 {
    let mut acc = 0u64;
    for (key, outcome) in drawn {
        acc = mix(acc, key.source().as_str().len() as u64);
        acc = mix(acc, key.target().as_str().len() as u64);
        acc = match outcome {
            RouteOutcome::Routed { waypoints } => {
                let acc = mix(acc, waypoints.len() as u64);
                waypoints.iter().fold(acc, checksum_point)
            }
            RouteOutcome::Unrouted { from, to } => {
                checksum_point(checksum_point(mix(acc, 1), from), to)
            }
        };
    }
    acc
}

pub mod grid {
    use classroute::{Cell, CellRange, Grid};

    pub const CANVAS: f64 = 4000.0;
    pub const CELL_SIZE: f64 = 25.0;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Open,
        Blocks,
        Serpentine,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Open => "open_160",
                Self::Blocks => "blocks_160",
                Self::Serpentine => "serpentine_160",
            }
        }
    }

    /// A 160x160 lattice with a case-specific obstacle pattern.
    ///
    /// Corner cells `(0, 0)` and `(159, 159)` are always free so they can serve as endpoints.
    pub fn fixture(case: Case) -> Grid {
        let mut grid = Grid::new(CANVAS, CANVAS, CELL_SIZE).expect("bench grid");
        let rows = grid.rows();
        let cols = grid.cols();

        match case {
            Case::Open => {}
            Case::Blocks => {
                // 8x8 class boxes on a 12-cell pitch leave 4-cell corridors.
                for row in (2..rows.saturating_sub(10)).step_by(12) {
                    for col in (2..cols.saturating_sub(10)).step_by(12) {
                        grid.mark_occupied(CellRange::new(row..row + 8, col..col + 8))
                            .expect("block in bounds");
                    }
                }
            }
            Case::Serpentine => {
                // Full-height walls every 8 columns, gaps alternating bottom and top.
                for (wall, col) in (4..cols).step_by(8).enumerate() {
                    let rows_range = if wall % 2 == 0 { 0..rows - 1 } else { 1..rows };
                    grid.mark_occupied(CellRange::new(rows_range, col..col + 1))
                        .expect("wall in bounds");
                }
            }
        }
        grid
    }

    pub fn corners(grid: &Grid) -> (Cell, Cell) {
        let start = grid.cell_at(0, 0).expect("start corner");
        let end = grid.cell_at(grid.rows() - 1, grid.cols() - 1).expect("end corner");
        (start, end)
    }
}

pub mod board {
    use classroute::model::{CanvasRect, NodeId, RelationshipKey, RelationshipKind};
    use classroute::{DiagramOp, RoutingConfig};

    const BOX_WIDTH: f64 = 150.0;
    const BOX_HEIGHT: f64 = 100.0;
    const PITCH_X: f64 = 300.0;
    const PITCH_Y: f64 = 250.0;
    const MARGIN: f64 = 50.0;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LayoutParams {
        pub cols: usize,
        pub rows: usize,
        pub diagonals: bool,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        Medium,
        LargeDense,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::Medium => "medium",
                Self::LargeDense => "large_dense",
            }
        }

        pub const fn params(self) -> LayoutParams {
            match self {
                Self::Small => LayoutParams {
                    cols: 4,
                    rows: 3,
                    diagonals: false,
                },
                Self::Medium => LayoutParams {
                    cols: 8,
                    rows: 6,
                    diagonals: false,
                },
                Self::LargeDense => LayoutParams {
                    cols: 14,
                    rows: 10,
                    diagonals: true,
                },
            }
        }
    }

    pub struct Layout {
        pub config: RoutingConfig,
        pub ops: Vec<DiagramOp>,
        pub first_node: NodeId,
    }

    pub fn node_id(row: usize, col: usize) -> NodeId {
        NodeId::new(format!("c{row:02}_{col:02}")).expect("node id")
    }

    fn link(
        ops: &mut Vec<DiagramOp>,
        from: (usize, usize),
        to: (usize, usize),
        kind: RelationshipKind,
    ) {
        let key = RelationshipKey::new(node_id(from.0, from.1), node_id(to.0, to.1), kind);
        ops.push(DiagramOp::AddRelationship { key });
    }

    /// Class boxes on a regular lattice linked to their east and south neighbours (and the
    /// south-east one for dense cases).
    pub fn fixture(case: Case) -> Layout {
        let params = case.params();
        let config = RoutingConfig {
            canvas_width: MARGIN * 2.0 + params.cols as f64 * PITCH_X,
            canvas_height: MARGIN * 2.0 + params.rows as f64 * PITCH_Y,
            cell_size: 25.0,
        };

        let mut ops = Vec::new();
        for row in 0..params.rows {
            for col in 0..params.cols {
                let rect = CanvasRect::new(
                    MARGIN + col as f64 * PITCH_X,
                    MARGIN + row as f64 * PITCH_Y,
                    BOX_WIDTH,
                    BOX_HEIGHT,
                )
                .expect("box rect");
                ops.push(DiagramOp::PlaceNode {
                    node_id: node_id(row, col),
                    rect,
                });
            }
        }
        for row in 0..params.rows {
            for col in 0..params.cols {
                if col + 1 < params.cols {
                    link(&mut ops, (row, col), (row, col + 1), RelationshipKind::Aggregation);
                }
                if row + 1 < params.rows {
                    link(&mut ops, (row, col), (row + 1, col), RelationshipKind::Inheritance);
                }
                if params.diagonals && row + 1 < params.rows && col + 1 < params.cols {
                    link(&mut ops, (row, col), (row + 1, col + 1), RelationshipKind::Composition);
                }
            }
        }

        Layout {
            config,
            ops,
            first_node: node_id(0, 0),
        }
    }
}
