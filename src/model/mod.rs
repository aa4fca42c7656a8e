// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Inbound vocabulary from the UML model: node ids, relationship identities and canvas geometry.

pub mod geometry;
pub mod ids;
pub mod relationship;

pub use geometry::{CanvasPoint, CanvasRect};
pub use ids::{Id, IdError, NodeId};
pub use relationship::{RelationshipKey, RelationshipKind};
