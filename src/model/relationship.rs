// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::Serialize;

use super::ids::NodeId;

/// UML relationship kinds the editor can draw between two classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Aggregation,
    Composition,
    Inheritance,
    Realization,
}

impl RelationshipKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aggregation => "aggregation",
            Self::Composition => "composition",
            Self::Inheritance => "inheritance",
            Self::Realization => "realization",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a relationship as supplied by the UML model.
///
/// Two relationships between the same pair of classes are distinct only when their kinds differ,
/// which mirrors the model's own uniqueness rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RelationshipKey {
    source: NodeId,
    target: NodeId,
    kind: RelationshipKind,
}

impl RelationshipKey {
    pub fn new(source: NodeId, target: NodeId, kind: RelationshipKind) -> Self {
        Self {
            source,
            target,
            kind,
        }
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for RelationshipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -{}-> {}", self.source, self.kind, self.target)
    }
}
