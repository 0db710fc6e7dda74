//! Chunk streaming runtime: providers, LOD selection, and the chunk manager.
#![forbid(unsafe_code)]

mod config;
mod error;
mod lod;
mod manager;
mod provider;

pub use config::StreamConfig;
pub use error::{ProviderError, StreamError};
pub use lod::{LodLevel, LodTable};
pub use manager::{ChunkManager, StreamEvent, StreamStats, StreamUpdate};
pub use provider::ChunkProvider;
