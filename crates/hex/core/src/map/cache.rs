//! Change notifications for renderer-owned per-tile caches.
//!
//! Display lists, texture selections and generated models live outside the
//! tile. Mutations on [`Gamemap`](super::Gamemap) queue an [`Invalidation`]
//! naming the affected tile and what changed; the renderer drains the queue
//! between frames and evicts matching entries from its [`TileCache`]s.

use std::collections::HashMap;

use bitflags::bitflags;

use super::TileId;
use crate::coords::Location;

bitflags! {
    /// Which renderer-side data became invalid for a tile.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CacheFlags: u8 {
        /// Corner positions or normals changed (display lists, meshes).
        const GEOMETRY = 1 << 0;
        /// Texture selection or edge blending may differ.
        const TEXTURE  = 1 << 1;
        /// The feature model must be regenerated.
        const MODEL    = 1 << 2;
    }
}

/// A single queued cache notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Invalidation {
    pub tile: TileId,
    pub location: Location,
    pub flags: CacheFlags,
}

/// Renderer-side cache of per-tile values keyed by [`TileId`].
///
/// `watch` selects which invalidations evict entries: a texture cache watches
/// `TEXTURE | GEOMETRY`, a model cache only `MODEL`, and so on.
#[derive(Clone, Debug)]
pub struct TileCache<V> {
    watch: CacheFlags,
    entries: HashMap<TileId, V>,
}

impl<V> TileCache<V> {
    pub fn new(watch: CacheFlags) -> Self {
        Self {
            watch,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, tile: TileId) -> Option<&V> {
        self.entries.get(&tile)
    }

    pub fn get_or_insert_with(&mut self, tile: TileId, build: impl FnOnce() -> V) -> &V {
        self.entries.entry(tile).or_insert_with(build)
    }

    pub fn insert(&mut self, tile: TileId, value: V) -> Option<V> {
        self.entries.insert(tile, value)
    }

    /// Evicts every entry whose invalidation intersects the watched flags.
    /// Returns the number of evicted entries.
    pub fn apply(&mut self, invalidations: &[Invalidation]) -> usize {
        invalidations
            .iter()
            .filter(|inv| inv.flags.intersects(self.watch))
            .filter(|inv| self.entries.remove(&inv.tile).is_some())
            .count()
    }

    /// Drops everything, e.g. when the map itself is replaced.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
