//! Reference terrain providers for the chunk streamer.
#![forbid(unsafe_code)]

mod heightmap;
pub mod worldgen;

pub use heightmap::{FlatProvider, HeightmapProvider, Palette};
pub use worldgen::{WorldGenConfig, WorldGenError};

use std::sync::Arc;

use tessel_blocks::BlockRegistry;
use tessel_chunk::ChunkDims;
use tessel_runtime::ChunkProvider;
use worldgen::Mode;

/// Builds the provider selected by `cfg.mode`.
pub fn provider_from_config(
    cfg: &WorldGenConfig,
    reg: &BlockRegistry,
    dims: ChunkDims,
) -> Result<Arc<dyn ChunkProvider>, WorldGenError> {
    let provider: Arc<dyn ChunkProvider> = match cfg.mode {
        Mode::Flat => Arc::new(FlatProvider::new(cfg, reg, dims)?),
        Mode::Heightmap => Arc::new(HeightmapProvider::new(cfg, reg, dims)?),
    };
    Ok(provider)
}
