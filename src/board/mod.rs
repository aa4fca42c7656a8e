// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor-facing routing surface.
//!
//! The editor reports diagram changes as [`DiagramOp`]s. The board keeps grid occupancy and
//! the path cache in step with them, and hands routes to a [`RouteConsumer`] on redraw.

mod anchor;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{Result, RoutingError};
use crate::grid::{Cell, CellRange, Grid};
use crate::model::{CanvasPoint, CanvasRect, NodeId, RelationshipKey};
use crate::route::{AStar, PathCache, Pathfinder};
use crate::session::GridSession;

#[derive(Debug, Clone, PartialEq)]
pub enum DiagramOp {
    PlaceNode { node_id: NodeId, rect: CanvasRect },
    MoveNode { node_id: NodeId, x: f64, y: f64 },
    ResizeNode {
        node_id: NodeId,
        width: f64,
        height: f64,
    },
    RemoveNode { node_id: NodeId },
    AddRelationship { key: RelationshipKey },
    RemoveRelationship { key: RelationshipKey },
}

/// Relationship-level effect of one [`RouteBoard::apply`] batch.
///
/// `invalidated` lists relationships whose cached path is stale and will be recomputed on the
/// next redraw; relationships added or removed in the same batch are reported only once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<RelationshipKey>,
    pub removed: Vec<RelationshipKey>,
    pub invalidated: Vec<RelationshipKey>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.invalidated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: BTreeSet<RelationshipKey>,
    removed: BTreeSet<RelationshipKey>,
    invalidated: BTreeSet<RelationshipKey>,
}

impl DeltaBuilder {
    /// Re-adding a key removed earlier in the batch reports it as invalidated, not added.
    fn record_added(&mut self, key: RelationshipKey) {
        if self.removed.remove(&key) {
            self.invalidated.insert(key);
            return;
        }
        self.added.insert(key);
    }

    /// Removing a key added earlier in the batch cancels it out.
    fn record_removed(&mut self, key: RelationshipKey) {
        self.invalidated.remove(&key);
        if self.added.remove(&key) {
            return;
        }
        self.removed.insert(key);
    }

    fn record_invalidated(&mut self, key: RelationshipKey) {
        if self.added.contains(&key) || self.removed.contains(&key) {
            return;
        }
        self.invalidated.insert(key);
    }

    fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            invalidated: self.invalidated.into_iter().collect(),
        }
    }
}

/// What the renderer draws for one relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// One waypoint per path cell (cell centres, canvas pixels), start anchor first.
    Routed { waypoints: Vec<CanvasPoint> },
    /// No walkable corridor exists, or an endpoint has no usable anchor on the canvas.
    Unrouted { from: CanvasPoint, to: CanvasPoint },
}

impl RouteOutcome {
    pub fn is_routed(&self) -> bool {
        matches!(self, Self::Routed { .. })
    }

    /// Points to draw: the routed waypoints, or a straight segment between the endpoints.
    pub fn fallback_polyline(&self) -> Vec<CanvasPoint> {
        match self {
            Self::Routed { waypoints } => waypoints.clone(),
            Self::Unrouted { from, to } => vec![*from, *to],
        }
    }
}

/// Receives one outcome per relationship during [`RouteBoard::redraw`].
pub trait RouteConsumer {
    fn consume(&mut self, key: &RelationshipKey, outcome: &RouteOutcome);
}

impl RouteConsumer for Vec<(RelationshipKey, RouteOutcome)> {
    fn consume(&mut self, key: &RelationshipKey, outcome: &RouteOutcome) {
        self.push((key.clone(), outcome.clone()));
    }
}

impl RouteConsumer for BTreeMap<RelationshipKey, RouteOutcome> {
    fn consume(&mut self, key: &RelationshipKey, outcome: &RouteOutcome) {
        self.insert(key.clone(), outcome.clone());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedrawStats {
    pub routed: usize,
    pub unrouted: usize,
    /// Relationships whose path had to be searched again in this pass.
    pub recomputed: usize,
}

/// Placed nodes, registered relationships and their cached routes for one diagram.
///
/// The board outlives grid sessions: when it sees a session generation it has not synced
/// with, it re-marks every node on the new grid and invalidates all cached paths.
#[derive(Debug)]
pub struct RouteBoard<P = AStar> {
    nodes: BTreeMap<NodeId, CanvasRect>,
    relationships: BTreeSet<RelationshipKey>,
    cache: PathCache,
    pathfinder: P,
    synced_generation: Option<u64>,
}

impl Default for RouteBoard<AStar> {
    fn default() -> Self {
        Self::with_pathfinder(AStar::new())
    }
}

impl RouteBoard<AStar> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: Pathfinder> RouteBoard<P> {
    pub fn with_pathfinder(pathfinder: P) -> Self {
        Self {
            nodes: BTreeMap::new(),
            relationships: BTreeSet::new(),
            cache: PathCache::new(),
            pathfinder,
            synced_generation: None,
        }
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, CanvasRect> {
        &self.nodes
    }

    pub fn node(&self, node_id: &NodeId) -> Option<&CanvasRect> {
        self.nodes.get(node_id)
    }

    pub fn relationships(&self) -> &BTreeSet<RelationshipKey> {
        &self.relationships
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    pub fn pathfinder(&self) -> &P {
        &self.pathfinder
    }

    /// Applies `ops` as one batch.
    ///
    /// Every op is validated against a working copy first; on error nothing (grid, cache or
    /// board) is modified.
    pub fn apply(&mut self, session: &mut GridSession, ops: &[DiagramOp]) -> Result<Delta> {
        let grid = self.synced_grid(session)?;
        if ops.is_empty() {
            return Ok(Delta::default());
        }

        let mut nodes = self.nodes.clone();
        let mut relationships = self.relationships.clone();
        let mut delta = DeltaBuilder::default();
        let mut reshaped = BTreeSet::<NodeId>::new();

        for op in ops {
            apply_op(&mut nodes, &mut relationships, op, &mut delta, &mut reshaped)?;
        }

        // Old footprints are cleared before any new footprint is marked. Nodes that shared
        // cells with a cleared footprint are re-marked so overlaps stay occupied.
        let cleared = reshaped
            .iter()
            .filter_map(|node_id| self.nodes.get(node_id))
            .filter_map(|rect| grid.footprint(rect))
            .collect::<Vec<_>>();
        for range in &cleared {
            grid.clear_occupied(*range)?;
        }

        let mut marked = Vec::<CellRange>::new();
        for (node_id, rect) in &nodes {
            let Some(footprint) = grid.footprint(rect) else {
                continue;
            };
            let is_reshaped = reshaped.contains(node_id);
            if is_reshaped
                || cleared
                    .iter()
                    .any(|range| range.intersection(&footprint).is_some())
            {
                grid.mark_occupied(footprint)?;
            }
            if is_reshaped {
                marked.push(footprint);
            }
        }

        for key in &delta.removed {
            self.cache.remove(key);
        }
        for key in &delta.invalidated {
            self.cache.invalidate(key);
        }
        for node_id in &reshaped {
            for key in relationships.iter().filter(|key| key.touches(node_id)) {
                self.cache.invalidate(key);
                delta.record_invalidated(key.clone());
            }
        }
        for footprint in marked {
            for key in self.cache.invalidate_crossing(footprint) {
                delta.record_invalidated(key);
            }
        }
        if !cleared.is_empty() {
            for key in self.cache.invalidate_unreachable() {
                delta.record_invalidated(key);
            }
        }

        self.nodes = nodes;
        self.relationships = relationships;

        let delta = delta.finish();
        tracing::debug!(
            ops = ops.len(),
            added = delta.added.len(),
            removed = delta.removed.len(),
            invalidated = delta.invalidated.len(),
            "applied diagram ops"
        );
        Ok(delta)
    }

    /// Routes a registered relationship between anchors chosen from its nodes' footprints.
    pub fn route(
        &mut self,
        session: &mut GridSession,
        key: &RelationshipKey,
    ) -> Result<RouteOutcome> {
        let (source, target) = self.endpoints(key)?;
        let grid = self.synced_grid(session)?;

        let footprints = (grid.footprint(&source), grid.footprint(&target));
        let anchors = match footprints {
            (Some(source_fp), Some(target_fp)) => {
                anchor::anchor_pair(grid, &source_fp, &target_fp, key.is_self_loop())
            }
            _ => None,
        };
        let Some((start, end)) = anchors else {
            tracing::warn!(%key, "relationship has no anchor on the canvas");
            return Ok(RouteOutcome::Unrouted {
                from: source.center(),
                to: target.center(),
            });
        };

        route_cached(&mut self.cache, &mut self.pathfinder, grid, key, start, end)
    }

    /// Routes a registered relationship between explicit canvas anchor points.
    pub fn route_between(
        &mut self,
        session: &mut GridSession,
        key: &RelationshipKey,
        from: CanvasPoint,
        to: CanvasPoint,
    ) -> Result<RouteOutcome> {
        if !self.relationships.contains(key) {
            return Err(RoutingError::UnknownRelationship { key: key.clone() });
        }
        let grid = self.synced_grid(session)?;
        let start = grid.canvas_to_cell(from.x, from.y)?;
        let end = grid.canvas_to_cell(to.x, to.y)?;
        route_cached(&mut self.cache, &mut self.pathfinder, grid, key, start, end)
    }

    /// Routes every registered relationship in key order and feeds the results to `consumer`.
    ///
    /// Only relationships without a valid cached path are searched again.
    pub fn redraw<C>(&mut self, session: &mut GridSession, consumer: &mut C) -> Result<RedrawStats>
    where
        C: RouteConsumer + ?Sized,
    {
        let misses_before = self.cache.stats().misses;
        let keys = self.relationships.iter().cloned().collect::<Vec<_>>();

        let mut stats = RedrawStats::default();
        for key in &keys {
            let outcome = self.route(session, key)?;
            if outcome.is_routed() {
                stats.routed += 1;
            } else {
                stats.unrouted += 1;
            }
            consumer.consume(key, &outcome);
        }
        stats.recomputed = (self.cache.stats().misses - misses_before) as usize;
        Ok(stats)
    }

    fn endpoints(&self, key: &RelationshipKey) -> Result<(CanvasRect, CanvasRect)> {
        if !self.relationships.contains(key) {
            return Err(RoutingError::UnknownRelationship { key: key.clone() });
        }
        let lookup = |node_id: &NodeId| {
            self.nodes
                .get(node_id)
                .copied()
                .ok_or_else(|| RoutingError::UnknownNode {
                    node_id: node_id.clone(),
                })
        };
        Ok((lookup(key.source())?, lookup(key.target())?))
    }

    fn synced_grid<'s>(&mut self, session: &'s mut GridSession) -> Result<&'s mut Grid> {
        let generation = session.generation();
        let grid = session.active_mut()?;
        if self.synced_generation != Some(generation) {
            tracing::debug!(generation, nodes = self.nodes.len(), "syncing board onto grid");
            for rect in self.nodes.values() {
                if let Some(footprint) = grid.footprint(rect) {
                    grid.mark_occupied(footprint)?;
                }
            }
            self.cache.invalidate_all();
            self.synced_generation = Some(generation);
        }
        Ok(grid)
    }
}

fn route_cached<P: Pathfinder>(
    cache: &mut PathCache,
    pathfinder: &mut P,
    grid: &Grid,
    key: &RelationshipKey,
    start: Cell,
    end: Cell,
) -> Result<RouteOutcome> {
    match cache.get(key, start, end, grid, pathfinder) {
        Ok(path) => Ok(RouteOutcome::Routed {
            waypoints: path.waypoints(grid),
        }),
        Err(err) if err.is_no_path() => {
            tracing::warn!(%key, %start, %end, "relationship left unrouted");
            Ok(RouteOutcome::Unrouted {
                from: grid.cell_to_canvas(start),
                to: grid.cell_to_canvas(end),
            })
        }
        Err(err) => Err(err),
    }
}

fn apply_op(
    nodes: &mut BTreeMap<NodeId, CanvasRect>,
    relationships: &mut BTreeSet<RelationshipKey>,
    op: &DiagramOp,
    delta: &mut DeltaBuilder,
    reshaped: &mut BTreeSet<NodeId>,
) -> Result<()> {
    let unknown = |node_id: &NodeId| RoutingError::UnknownNode {
        node_id: node_id.clone(),
    };

    match op {
        DiagramOp::PlaceNode { node_id, rect } => {
            if nodes.contains_key(node_id) {
                return Err(RoutingError::DuplicateNode {
                    node_id: node_id.clone(),
                });
            }
            nodes.insert(node_id.clone(), *rect);
            reshaped.insert(node_id.clone());
        }
        DiagramOp::MoveNode { node_id, x, y } => {
            let rect = nodes.get_mut(node_id).ok_or_else(|| unknown(node_id))?;
            *rect = rect.moved_to(*x, *y)?;
            reshaped.insert(node_id.clone());
        }
        DiagramOp::ResizeNode {
            node_id,
            width,
            height,
        } => {
            let rect = nodes.get_mut(node_id).ok_or_else(|| unknown(node_id))?;
            *rect = rect.resized(*width, *height)?;
            reshaped.insert(node_id.clone());
        }
        DiagramOp::RemoveNode { node_id } => {
            if nodes.remove(node_id).is_none() {
                return Err(unknown(node_id));
            }
            let dropped = relationships
                .iter()
                .filter(|key| key.touches(node_id))
                .cloned()
                .collect::<Vec<_>>();
            for key in dropped {
                relationships.remove(&key);
                delta.record_removed(key);
            }
            reshaped.insert(node_id.clone());
        }
        DiagramOp::AddRelationship { key } => {
            for node_id in [key.source(), key.target()] {
                if !nodes.contains_key(node_id) {
                    return Err(unknown(node_id));
                }
            }
            if !relationships.insert(key.clone()) {
                return Err(RoutingError::DuplicateRelationship { key: key.clone() });
            }
            delta.record_added(key.clone());
        }
        DiagramOp::RemoveRelationship { key } => {
            if !relationships.remove(key) {
                return Err(RoutingError::UnknownRelationship { key: key.clone() });
            }
            delta.record_removed(key.clone());
        }
    }
    Ok(())
}
