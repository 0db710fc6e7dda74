use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldGenError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown block '{0}' in worldgen config")]
    UnknownBlock(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default)]
    pub flat: Flat,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub water: Water,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            seed: default_seed(),
            flat: Flat::default(),
            height: Height::default(),
            surface: Surface::default(),
            water: Water::default(),
        }
    }
}

impl WorldGenConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, WorldGenError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, WorldGenError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Heightmap,
    Flat,
}

fn default_mode() -> Mode {
    Mode::Heightmap
}
fn default_seed() -> i32 {
    1337
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flat {
    /// Ground thickness in blocks, starting at world y = 0.
    #[serde(default = "default_flat_thickness")]
    pub thickness: i32,
}
fn default_flat_thickness() -> i32 {
    4
}
impl Default for Flat {
    fn default() -> Self {
        Self {
            thickness: default_flat_thickness(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Height {
    #[serde(default = "default_base")]
    pub base: f32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_detail_amplitude")]
    pub detail_amplitude: f32,
    #[serde(default = "default_detail_frequency")]
    pub detail_frequency: f32,
}
fn default_base() -> f32 {
    48.0
}
fn default_amplitude() -> f32 {
    18.0
}
fn default_frequency() -> f32 {
    0.0125
}
fn default_detail_amplitude() -> f32 {
    6.0
}
fn default_detail_frequency() -> f32 {
    0.045
}
impl Default for Height {
    fn default() -> Self {
        Self {
            base: default_base(),
            amplitude: default_amplitude(),
            frequency: default_frequency(),
            detail_amplitude: default_detail_amplitude(),
            detail_frequency: default_detail_frequency(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    #[serde(default = "default_top")]
    pub top: String,
    /// Top block for columns at or below the shore line.
    #[serde(default = "default_shore")]
    pub shore: String,
    #[serde(default = "default_sub_near")]
    pub sub_near: String,
    #[serde(default = "default_sub_deep")]
    pub sub_deep: String,
    #[serde(default = "default_topsoil_thickness")]
    pub topsoil_thickness: i32,
}
fn default_top() -> String {
    "grass".into()
}
fn default_shore() -> String {
    "sand".into()
}
fn default_sub_near() -> String {
    "dirt".into()
}
fn default_sub_deep() -> String {
    "stone".into()
}
fn default_topsoil_thickness() -> i32 {
    3
}
impl Default for Surface {
    fn default() -> Self {
        Self {
            top: default_top(),
            shore: default_shore(),
            sub_near: default_sub_near(),
            sub_deep: default_sub_deep(),
            topsoil_thickness: default_topsoil_thickness(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Water {
    #[serde(default = "default_water_enable")]
    pub enable: bool,
    #[serde(default = "default_water_level")]
    pub level: i32,
    #[serde(default = "default_water_block")]
    pub block: String,
}
fn default_water_enable() -> bool {
    true
}
fn default_water_level() -> i32 {
    44
}
fn default_water_block() -> String {
    "water".into()
}
impl Default for Water {
    fn default() -> Self {
        Self {
            enable: default_water_enable(),
            level: default_water_level(),
            block: default_water_block(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = WorldGenConfig::from_toml_str(
            r#"
            mode = "flat"
            seed = 7
            [height]
            amplitude = 30.0
            [water]
            enable = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.mode, Mode::Flat);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.height.amplitude, 30.0);
        assert_eq!(cfg.height.base, 48.0);
        assert!(!cfg.water.enable);
        assert_eq!(cfg.water.level, 44);
        assert_eq!(cfg.surface.top, "grass");
    }

    #[test]
    fn empty_is_default() {
        assert_eq!(WorldGenConfig::from_toml_str("").unwrap(), WorldGenConfig::default());
    }
}
