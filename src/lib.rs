//! Voxel chunk streaming and greedy meshing.
#![forbid(unsafe_code)]

pub mod config;
pub mod edit_arg;
pub mod render;
pub mod voxel_world;

pub use config::{ConfigError, TesselConfig};
pub use edit_arg::EditCommand;
pub use render::{RecordingSink, RenderSink};
pub use voxel_world::{VoxelWorld, WorldError, WorldTickStats};

pub use tessel_blocks as blocks;
pub use tessel_chunk as chunk;
pub use tessel_edit as edit;
pub use tessel_geom as geom;
pub use tessel_mesh_cpu as mesh;
pub use tessel_runtime as runtime;
pub use tessel_world as world;
