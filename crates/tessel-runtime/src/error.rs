use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("provider panicked: {0}")]
    Panicked(String),
    #[error("malformed chunk: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("unload distance {unload} must be greater than load distance {load}")]
    InvalidDistances { load: u32, unload: u32 },
    #[error("chunk dimensions must be non-zero, got size {size} height {height}")]
    EmptyChunkDims { size: usize, height: usize },
    #[error("LOD table is empty")]
    EmptyLodTable,
    #[error("worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
