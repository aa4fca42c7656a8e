// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Classroute: grid-based relationship routing for a UML class-diagram editor.
//!
//! The canvas is discretized into a [`grid::Grid`] owned by a [`session::GridSession`].
//! Relationship lines are searched with [`route::AStar`] and memoized per relationship in a
//! [`route::PathCache`]. [`board::RouteBoard`] ties these together for the editor.

pub mod board;
pub mod config;
pub mod error;
pub mod grid;
pub mod model;
pub mod route;
pub mod session;

pub use board::{Delta, DiagramOp, RedrawStats, RouteBoard, RouteConsumer, RouteOutcome};
pub use config::RoutingConfig;
pub use error::{Result, RoutingError};
pub use grid::{Cell, CellRange, Grid};
pub use route::{AStar, Path, PathCache, Pathfinder};
pub use session::GridSession;
