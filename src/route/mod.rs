// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Path search and per-relationship path caching.

pub mod astar;
pub mod cache;
pub mod path;

pub use astar::{AStar, Pathfinder};
pub use cache::{CacheStats, PathCache};
pub use path::Path;
