//! Boundary between the world and whatever draws its meshes.

use hashbrown::HashMap;
use tessel_chunk::ChunkKey;
use tessel_geom::Aabb;
use tessel_mesh_cpu::{ChunkMesh, DrawBatch};

/// Receives finished chunk meshes. Implementations own GPU resources.
pub trait RenderSink {
    /// Creates or replaces the render mesh for `key`.
    fn upload(&mut self, key: ChunkKey, mesh: &ChunkMesh, batches: &[DrawBatch]);
    /// Releases the render mesh for `key`.
    fn dispose(&mut self, key: ChunkKey);
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedMesh {
    pub quads: usize,
    pub batches: Vec<DrawBatch>,
    pub bounds: Option<Aabb>,
}

/// In-memory sink for headless runs and tests.
#[derive(Default, Debug)]
pub struct RecordingSink {
    pub live: HashMap<ChunkKey, RecordedMesh>,
    pub uploads: usize,
    pub disposals: usize,
}

impl RecordingSink {
    pub fn live_quads(&self) -> usize {
        self.live.values().map(|m| m.quads).sum()
    }
}

impl RenderSink for RecordingSink {
    fn upload(&mut self, key: ChunkKey, mesh: &ChunkMesh, batches: &[DrawBatch]) {
        self.uploads += 1;
        self.live.insert(
            key,
            RecordedMesh {
                quads: mesh.quad_count(),
                batches: batches.to_vec(),
                bounds: mesh.bounds(),
            },
        );
    }

    fn dispose(&mut self, key: ChunkKey) {
        if self.live.remove(&key).is_some() {
            self.disposals += 1;
        }
    }
}
