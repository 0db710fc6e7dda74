use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::config::{BlockDef, BlocksConfig, MaterialDef};
use super::material::{BlockMaterial, FaceMaterials, SurfaceRef};
use super::types::{AIR, BlockId, Face};

const BUILTIN_BLOCKS_TOML: &str = include_str!("../../../assets/voxels/blocks.toml");

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("block id {id} already registered (as `{existing}`)")]
    DuplicateId { id: BlockId, existing: String },
    #[error("block name `{0}` already registered")]
    DuplicateName(String),
    #[error("block `{0}` has neither a default surface nor a texture_prefix")]
    MissingDefaultSurface(String),
    #[error("failed to read blocks config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse blocks config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockDefinition {
    pub id: BlockId,
    pub name: String,
    pub display_name: String,
    pub material: BlockMaterial,
    pub opaque: bool,
    pub solid: bool,
    pub light_emission: Option<u8>,
}

impl BlockDefinition {
    #[inline]
    pub fn emits_light(&self) -> bool {
        matches!(self.light_emission, Some(e) if e > 0)
    }

    /// Whether faces of this block participate in meshing.
    #[inline]
    pub fn is_renderable(&self) -> bool {
        self.solid || !self.opaque || self.emits_light()
    }
}

/// Catalogue of block kinds, unique by id and by name.
#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    blocks: Vec<Option<BlockDefinition>>,
    by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: BlockDefinition) -> Result<(), RegistryError> {
        if let Some(existing) = self.get_by_id(def.id) {
            return Err(RegistryError::DuplicateId {
                id: def.id,
                existing: existing.name.clone(),
            });
        }
        if self.by_name.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }
        let ix = def.id as usize;
        if self.blocks.len() <= ix {
            self.blocks.resize(ix + 1, None);
        }
        self.by_name.insert(def.name.clone(), def.id);
        self.blocks[ix] = Some(def);
        Ok(())
    }

    #[inline]
    pub fn get_by_id(&self, id: BlockId) -> Option<&BlockDefinition> {
        self.blocks.get(id as usize).and_then(|b| b.as_ref())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&BlockDefinition> {
        self.by_name.get(name).and_then(|&id| self.get_by_id(id))
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    /// Resolves an optional type name to an id; unknown names and `None` map to air.
    pub fn id_or_air(&self, name: Option<&str>) -> BlockId {
        name.and_then(|n| self.id_by_name(n)).unwrap_or(AIR)
    }

    /// All registered definitions (ascending id).
    pub fn get_all(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.blocks.iter().filter_map(|b| b.as_ref())
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Meshing rule: air never renders; unknown ids render as generic solids.
    #[inline]
    pub fn is_renderable(&self, id: BlockId) -> bool {
        if id == AIR {
            return false;
        }
        self.get_by_id(id).map_or(true, |d| d.is_renderable())
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = BlockRegistry::new();
        for def in cfg.blocks {
            reg.register(compile_block(def)?)?;
        }
        Ok(reg)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Registry built from the catalogue shipped in `assets/voxels/blocks.toml`.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_toml_str(BUILTIN_BLOCKS_TOML)
    }
}

fn compile_block(def: BlockDef) -> Result<BlockDefinition, RegistryError> {
    let material = compile_material(&def.name, def.material)?;
    Ok(BlockDefinition {
        id: def.id,
        display_name: def.display_name.unwrap_or_else(|| def.name.clone()),
        name: def.name,
        material,
        opaque: def.opaque,
        solid: def.solid,
        light_emission: def.light_emission,
    })
}

fn compile_material(block: &str, m: MaterialDef) -> Result<BlockMaterial, RegistryError> {
    let default = match (m.default, m.texture_prefix.as_deref()) {
        (Some(d), _) => d,
        (None, Some(prefix)) => SurfaceRef::from_prefix(prefix),
        (None, None) => return Err(RegistryError::MissingDefaultSurface(block.to_string())),
    };
    let mut faces = FaceMaterials::uniform(default);
    let overrides = [
        (Face::Px, m.px),
        (Face::Nx, m.nx),
        (Face::Py, m.py),
        (Face::Ny, m.ny),
        (Face::Pz, m.pz),
        (Face::Nz, m.nz),
    ];
    for (face, surf) in overrides {
        if let Some(s) = surf {
            faces = faces.with_face(face, s);
        }
    }
    Ok(BlockMaterial {
        name: m.name.unwrap_or_else(|| block.to_string()),
        faces,
        translucent: m.translucent,
        emissive_strength: m.emissive_strength,
    })
}
