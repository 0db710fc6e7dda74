//! Persistent block-edit overlay, independent of chunk lifetime.
#![forbid(unsafe_code)]

mod snapshot;

pub use snapshot::{OverlaySnapshot, SnapshotError};

use std::collections::HashMap;

use tessel_blocks::BlockId;
use tessel_chunk::{Chunk, ChunkCoord, ChunkDims};

pub type BlockPos = (i32, i32, i32);

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStats {
    pub chunk_entries: usize,
    pub block_edits: usize,
}

/// Chunk-bucketed map from world block coordinate to overriding block id.
///
/// Entries never expire. An `AIR` entry is an explicit removal.
pub struct BlockOverlay {
    dims: ChunkDims,
    inner: HashMap<ChunkCoord, HashMap<BlockPos, BlockId>>,
}

impl BlockOverlay {
    pub fn new(dims: ChunkDims) -> Self {
        Self {
            dims,
            inner: HashMap::new(),
        }
    }

    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    pub fn stats(&self) -> OverlayStats {
        OverlayStats {
            chunk_entries: self.inner.len(),
            block_edits: self.inner.values().map(|m| m.len()).sum(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    fn bucket(&self, wx: i32, wy: i32, wz: i32) -> ChunkCoord {
        ChunkCoord::containing_block(wx, wy, wz, self.dims)
    }

    pub fn get(&self, wx: i32, wy: i32, wz: i32) -> Option<BlockId> {
        self.inner
            .get(&self.bucket(wx, wy, wz))
            .and_then(|m| m.get(&(wx, wy, wz)).copied())
    }

    /// Records an override, returning the previous one.
    pub fn set(&mut self, wx: i32, wy: i32, wz: i32, id: BlockId) -> Option<BlockId> {
        let k = self.bucket(wx, wy, wz);
        self.inner.entry(k).or_default().insert((wx, wy, wz), id)
    }

    /// Edits inside chunk `coord`, sorted by position.
    pub fn snapshot_for_chunk(&self, coord: ChunkCoord) -> Vec<(BlockPos, BlockId)> {
        let mut out: Vec<(BlockPos, BlockId)> = self
            .inner
            .get(&coord)
            .map(|m| m.iter().map(|(k, v)| (*k, *v)).collect())
            .unwrap_or_default();
        out.sort_unstable_by_key(|(p, _)| *p);
        out
    }

    /// Writes every edit that falls inside `chunk`. Returns how many were applied.
    pub fn apply_to_chunk(&self, chunk: &mut Chunk) -> usize {
        let Some(m) = self.inner.get(&chunk.coord()) else {
            return 0;
        };
        let mut n = 0;
        for (&(wx, wy, wz), &id) in m {
            if chunk.set_world(wx, wy, wz, id) {
                n += 1;
            }
        }
        n
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, BlockId)> + '_ {
        self.inner
            .values()
            .flat_map(|m| m.iter().map(|(k, v)| (*k, *v)))
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
