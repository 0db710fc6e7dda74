//! Chunk storage, chunk coordinates, and world/chunk conversions.
#![forbid(unsafe_code)]

mod chunk;
mod coord;

pub use chunk::{Chunk, ChunkError};
pub use coord::{ChunkCoord, ChunkKey, ParseKeyError};

/// Horizontal chunk extent (x and z), in blocks.
pub const CHUNK_SIZE: usize = 16;
/// Vertical chunk extent, in blocks.
pub const CHUNK_HEIGHT: usize = 128;

/// Chunk extents. Chunks are square horizontally; height differs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ChunkDims {
    pub size: usize,
    pub height: usize,
}

impl ChunkDims {
    #[inline]
    pub const fn new(size: usize, height: usize) -> Self {
        Self { size, height }
    }

    /// Number of cells in one chunk.
    #[inline]
    pub const fn volume(self) -> usize {
        self.size * self.size * self.height
    }

    /// Per-axis extents `(x, y, z)`.
    #[inline]
    pub const fn extents(self) -> (usize, usize, usize) {
        (self.size, self.height, self.size)
    }
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self::new(CHUNK_SIZE, CHUNK_HEIGHT)
    }
}
