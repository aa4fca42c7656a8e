// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::grid::Cell;
use crate::model::{NodeId, RelationshipKey};

#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} routing grid")]
    OutOfBounds {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },
    #[error("no walkable path from {start} to {end}")]
    NoPathFound { start: Cell, end: Cell },
    #[error("a grid session is already open")]
    SessionAlreadyOpen,
    #[error("no grid session is open")]
    NoActiveSession,
    #[error("invalid grid geometry: {reason}")]
    InvalidGeometry { reason: String },
    #[error("node not placed on the board (id={node_id})")]
    UnknownNode { node_id: NodeId },
    #[error("node already placed on the board (id={node_id})")]
    DuplicateNode { node_id: NodeId },
    #[error("relationship not registered ({key})")]
    UnknownRelationship { key: RelationshipKey },
    #[error("relationship already registered ({key})")]
    DuplicateRelationship { key: RelationshipKey },
    #[error("invalid routing config: {0}")]
    Config(#[from] serde_json::Error),
}

impl RoutingError {
    /// `true` for the one outcome callers are expected to render around instead of surfacing.
    pub fn is_no_path(&self) -> bool {
        matches!(self, Self::NoPathFound { .. })
    }

    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RoutingError>;
