use serde::Deserialize;

use super::material::SurfaceRef;
use super::types::BlockId;

// Top-level blocks config file
#[derive(Deserialize, Debug, Default)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub id: BlockId,
    pub name: String,
    // Falls back to `name` when absent
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default = "default_true")]
    pub opaque: bool,
    #[serde(default = "default_true")]
    pub solid: bool,
    #[serde(default)]
    pub light_emission: Option<u8>,
    pub material: MaterialDef,
}

fn default_true() -> bool {
    true
}

// Material table: either an explicit `default` surface or a `texture_prefix`
// from which the conventional texture set is derived; faces override it.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct MaterialDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub texture_prefix: Option<String>,
    #[serde(default)]
    pub default: Option<SurfaceRef>,
    #[serde(default)]
    pub px: Option<SurfaceRef>,
    #[serde(default)]
    pub nx: Option<SurfaceRef>,
    #[serde(default)]
    pub py: Option<SurfaceRef>,
    #[serde(default)]
    pub ny: Option<SurfaceRef>,
    #[serde(default)]
    pub pz: Option<SurfaceRef>,
    #[serde(default)]
    pub nz: Option<SurfaceRef>,
    #[serde(default)]
    pub translucent: bool,
    #[serde(default)]
    pub emissive_strength: Option<f32>,
}
