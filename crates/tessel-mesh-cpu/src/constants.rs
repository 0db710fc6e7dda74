//! Shared constants for tessel-mesh-cpu.

pub const VERTICES_PER_QUAD: usize = 4;
pub const INDICES_PER_QUAD: usize = 6;
