use tessel_chunk::{Chunk, ChunkCoord, ChunkDims};

use crate::error::ProviderError;

/// Source of chunk contents. Called from worker threads.
pub trait ChunkProvider: Send + Sync {
    /// Grid dimensions of every chunk this provider returns.
    fn dims(&self) -> ChunkDims;

    /// Produces the chunk at `coord`, sampled at `lod` (0 = full detail).
    fn generate_chunk(&self, coord: ChunkCoord, lod: u8) -> Result<Chunk, ProviderError>;
}
