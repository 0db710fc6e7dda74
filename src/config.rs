use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tessel_chunk::ChunkDims;
use tessel_runtime::StreamConfig;
use tessel_world::WorldGenConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level `tessel.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TesselConfig {
    /// Block catalogue; the built-in catalogue is used when absent.
    #[serde(default)]
    pub blocks: Option<PathBuf>,
    #[serde(default)]
    pub chunk: ChunkSection,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub worldgen: WorldGenConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSection {
    #[serde(default = "default_chunk_size")]
    pub size: usize,
    #[serde(default = "default_chunk_height")]
    pub height: usize,
}

fn default_chunk_size() -> usize {
    tessel_chunk::CHUNK_SIZE
}
fn default_chunk_height() -> usize {
    tessel_chunk::CHUNK_HEIGHT
}

impl Default for ChunkSection {
    fn default() -> Self {
        Self {
            size: default_chunk_size(),
            height: default_chunk_height(),
        }
    }
}

impl ChunkSection {
    pub fn dims(self) -> ChunkDims {
        ChunkDims::new(self.size, self.height)
    }
}

impl TesselConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: Self = toml::from_str(&s).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects values that would make the chunk grid degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk.size == 0 || self.chunk.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "chunk size and height must be non-zero, got size {} height {}",
                self.chunk.size, self.chunk.height
            )));
        }
        Ok(())
    }
}
