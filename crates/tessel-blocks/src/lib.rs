//! Block, material, and registry crate.
#![forbid(unsafe_code)]

pub mod config;
pub mod material;
pub mod registry;
pub mod types;

pub use material::{BlockMaterial, FaceMaterials, SurfaceRef};
pub use registry::{BlockDefinition, BlockRegistry, RegistryError};
pub use types::{AIR, BlockId, Face};
