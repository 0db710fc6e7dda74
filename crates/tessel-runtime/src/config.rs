use serde::{Deserialize, Serialize};

use crate::lod::{LodLevel, default_levels};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Horizontal load radius in chunks.
    #[serde(default = "default_load_distance")]
    pub load_distance: u32,
    /// Loaded chunks farther than this from the center are dropped.
    #[serde(default = "default_unload_distance")]
    pub unload_distance: u32,
    #[serde(default = "default_vertical_radius")]
    pub vertical_radius: u32,
    /// Generation threads; 0 uses available parallelism.
    #[serde(default)]
    pub workers: usize,
    #[serde(default = "default_levels")]
    pub lod: Vec<LodLevel>,
}

fn default_load_distance() -> u32 {
    6
}
fn default_unload_distance() -> u32 {
    8
}
fn default_vertical_radius() -> u32 {
    1
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            load_distance: default_load_distance(),
            unload_distance: default_unload_distance(),
            vertical_radius: default_vertical_radius(),
            workers: 0,
            lod: default_levels(),
        }
    }
}
