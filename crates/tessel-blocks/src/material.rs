use serde::{Deserialize, Serialize};

use super::types::Face;

/// Surface description handed to the renderer for one face of a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceRef {
    pub albedo: String,
    pub normal: String,
    pub roughness: String,
    pub metallic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissive: Option<String>,
}

impl SurfaceRef {
    /// Conventional texture set `<prefix>_albedo.png`, `<prefix>_normal.png`, ... with AO.
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            albedo: format!("{prefix}_albedo.png"),
            normal: format!("{prefix}_normal.png"),
            roughness: format!("{prefix}_roughness.png"),
            metallic: format!("{prefix}_metallic.png"),
            ao: Some(format!("{prefix}_ao.png")),
            emissive: None,
        }
    }
}

/// Per-face surface overrides with a mandatory fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaceMaterials {
    pub default: SurfaceRef,
    overrides: [Option<SurfaceRef>; 6],
}

impl FaceMaterials {
    pub fn uniform(default: SurfaceRef) -> Self {
        Self {
            default,
            overrides: Default::default(),
        }
    }

    pub fn with_face(mut self, face: Face, surface: SurfaceRef) -> Self {
        self.overrides[face.index()] = Some(surface);
        self
    }

    /// Surface for `face`, falling back to `default` when no override exists.
    #[inline]
    pub fn for_face(&self, face: Face) -> &SurfaceRef {
        self.overrides[face.index()]
            .as_ref()
            .unwrap_or(&self.default)
    }

    #[inline]
    pub fn has_override(&self, face: Face) -> bool {
        self.overrides[face.index()].is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockMaterial {
    pub name: String,
    pub faces: FaceMaterials,
    pub translucent: bool,
    pub emissive_strength: Option<f32>,
}

impl BlockMaterial {
    pub fn new(name: impl Into<String>, faces: FaceMaterials) -> Self {
        Self {
            name: name.into(),
            faces,
            translucent: false,
            emissive_strength: None,
        }
    }

    #[inline]
    pub fn surface(&self, face: Face) -> &SurfaceRef {
        self.faces.for_face(face)
    }
}
