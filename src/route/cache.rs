// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Classroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::error::{Result, RoutingError};
use crate::grid::{Cell, CellRange, Grid};
use crate::model::{NodeId, RelationshipKey};

use super::astar::Pathfinder;
use super::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
enum CachedOutcome {
    Routed(Path),
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheEntry {
    start: Cell,
    end: Cell,
    outcome: CachedOutcome,
    valid: bool,
}

impl CacheEntry {
    fn is_fresh_for(&self, start: Cell, end: Cell) -> bool {
        self.valid && self.start == start && self.end == end
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Last computed path per relationship.
///
/// Entries survive invalidation so callers can still enumerate stale relationships; only
/// [`PathCache::remove`] forgets one. An entry is reused only while it is valid and was computed
/// for the same anchor pair.
#[derive(Debug, Default)]
pub struct PathCache {
    entries: BTreeMap<RelationshipKey, CacheEntry>,
    stats: CacheStats,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<P>(
        &mut self,
        key: &RelationshipKey,
        start: Cell,
        end: Cell,
        grid: &Grid,
        pathfinder: &mut P,
    ) -> Result<&Path>
    where
        P: Pathfinder + ?Sized,
    {
        let entry = match self.entries.entry(key.clone()) {
            Entry::Occupied(occupied) if occupied.get().is_fresh_for(start, end) => {
                self.stats.hits += 1;
                occupied.into_mut()
            }
            entry => {
                self.stats.misses += 1;
                tracing::debug!(%key, %start, %end, "path cache miss, recomputing");
                let outcome = match pathfinder.find_path(grid, start, end) {
                    Ok(path) => CachedOutcome::Routed(path),
                    Err(RoutingError::NoPathFound { .. }) => CachedOutcome::Unreachable,
                    Err(err) => return Err(err),
                };
                let fresh = CacheEntry {
                    start,
                    end,
                    outcome,
                    valid: true,
                };
                match entry {
                    Entry::Occupied(mut occupied) => {
                        occupied.insert(fresh);
                        occupied.into_mut()
                    }
                    Entry::Vacant(vacant) => vacant.insert(fresh),
                }
            }
        };

        match &entry.outcome {
            CachedOutcome::Routed(path) => Ok(path),
            CachedOutcome::Unreachable => Err(RoutingError::NoPathFound {
                start: entry.start,
                end: entry.end,
            }),
        }
    }

    /// Returns `true` if an entry existed.
    pub fn invalidate(&mut self, key: &RelationshipKey) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.valid = false;
                true
            }
            None => false,
        }
    }

    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.valid = false;
        }
    }

    /// Invalidates every relationship with `node_id` as source or target and returns their keys.
    pub fn invalidate_touching(&mut self, node_id: &NodeId) -> Vec<RelationshipKey> {
        let mut touched = Vec::new();
        for (key, entry) in self.entries.iter_mut() {
            if key.touches(node_id) {
                entry.valid = false;
                touched.push(key.clone());
            }
        }
        touched
    }

    /// Invalidates valid routed entries with any cell inside `range`, i.e. paths a newly placed
    /// obstacle now blocks.
    pub fn invalidate_crossing(&mut self, range: CellRange) -> Vec<RelationshipKey> {
        let mut crossed = Vec::new();
        for (key, entry) in self.entries.iter_mut() {
            let CachedOutcome::Routed(path) = &entry.outcome else {
                continue;
            };
            if entry.valid && path.cells().iter().any(|cell| range.contains(*cell)) {
                entry.valid = false;
                crossed.push(key.clone());
            }
        }
        crossed
    }

    /// Invalidates valid entries that recorded no path; freed cells may have opened a corridor.
    pub fn invalidate_unreachable(&mut self) -> Vec<RelationshipKey> {
        let mut reopened = Vec::new();
        for (key, entry) in self.entries.iter_mut() {
            if entry.valid && entry.outcome == CachedOutcome::Unreachable {
                entry.valid = false;
                reopened.push(key.clone());
            }
        }
        reopened
    }

    /// Returns `true` if an entry existed.
    pub fn remove(&mut self, key: &RelationshipKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_valid(&self, key: &RelationshipKey) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.valid)
    }

    pub fn contains(&self, key: &RelationshipKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn stale_keys(&self) -> Vec<RelationshipKey> {
        self.entries
            .iter()
            .filter_map(|(key, entry)| (!entry.valid).then(|| key.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
