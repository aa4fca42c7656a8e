// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::config::RoutingConfig;
use crate::error::{Result, RoutingError};
use crate::grid::Grid;

#[derive(Debug, Default)]
enum SessionState {
    #[default]
    Closed,
    Open(Grid),
}

/// Holder of the one routing grid bound to an open diagram view.
///
/// `Closed -> open -> Open -> close -> Closed`. The editor owns a single session and passes
/// it by reference to whatever needs the grid.
#[derive(Debug, Default)]
pub struct GridSession {
    state: SessionState,
    generation: u64,
}

impl GridSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, width: f64, height: f64, cell_size: f64) -> Result<&mut Grid> {
        if self.is_open() {
            return Err(RoutingError::SessionAlreadyOpen);
        }

        let grid = Grid::new(width, height, cell_size)?;
        self.generation += 1;
        tracing::debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            cell_size,
            generation = self.generation,
            "grid session opened"
        );
        self.state = SessionState::Open(grid);
        self.active_mut()
    }

    pub fn open_with(&mut self, config: &RoutingConfig) -> Result<&mut Grid> {
        self.open(config.canvas_width, config.canvas_height, config.cell_size)
    }

    pub fn active(&self) -> Result<&Grid> {
        match &self.state {
            SessionState::Open(grid) => Ok(grid),
            SessionState::Closed => Err(RoutingError::NoActiveSession),
        }
    }

    pub fn active_mut(&mut self) -> Result<&mut Grid> {
        match &mut self.state {
            SessionState::Open(grid) => Ok(grid),
            SessionState::Closed => Err(RoutingError::NoActiveSession),
        }
    }

    /// Drops the active grid together with all of its occupancy.
    pub fn close(&mut self) -> Result<()> {
        match std::mem::take(&mut self.state) {
            SessionState::Open(_) => {
                tracing::debug!(generation = self.generation, "grid session closed");
                Ok(())
            }
            SessionState::Closed => Err(RoutingError::NoActiveSession),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open(_))
    }

    /// Increases on every successful [`GridSession::open`]; components mirroring grid state
    /// compare it to detect a replaced grid.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
