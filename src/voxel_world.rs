use std::sync::Arc;

use hashbrown::HashMap;
use tessel_blocks::{AIR, BlockDefinition, BlockId, BlockRegistry};
use tessel_chunk::{Chunk, ChunkCoord, ChunkKey};
use tessel_edit::{BlockOverlay, OverlaySnapshot};
use tessel_geom::Vec3;
use tessel_mesh_cpu::{ChunkMesh, build_chunk_greedy, build_meshes_par, group_draw_batches};
use tessel_runtime::{ChunkManager, ChunkProvider, StreamConfig, StreamError, StreamEvent, StreamStats};
use thiserror::Error;

use crate::render::RenderSink;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Stream(#[from] StreamError),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldTickStats {
    pub stream: StreamStats,
    /// Chunks that produced a non-empty mesh.
    pub meshed: usize,
    /// Chunks whose mesh came out empty.
    pub empty: usize,
    /// Overlay entries written into freshly loaded chunks.
    pub overlay_applied: usize,
}

enum Install {
    Uploaded,
    Empty,
}

/// Stores `mesh` under `key` and hands it to the sink, or drops any stale mesh
/// when the new one has no geometry.
fn install_mesh<S: RenderSink>(
    meshes: &mut HashMap<ChunkKey, ChunkMesh>,
    sink: &mut S,
    key: ChunkKey,
    mesh: ChunkMesh,
) -> Install {
    if meshes.remove(&key).is_some() {
        sink.dispose(key);
    }
    if mesh.is_empty() {
        return Install::Empty;
    }
    let batches = group_draw_batches(&mesh.faces);
    sink.upload(key, &mesh, &batches);
    meshes.insert(key, mesh);
    Install::Uploaded
}

/// Streams chunks around a viewpoint, keeps their meshes current, and hosts the
/// block-edit overlay.
pub struct VoxelWorld<S: RenderSink> {
    registry: Arc<BlockRegistry>,
    manager: ChunkManager,
    overlay: BlockOverlay,
    meshes: HashMap<ChunkKey, ChunkMesh>,
    sink: S,
}

impl<S: RenderSink> VoxelWorld<S> {
    pub fn new(
        registry: Arc<BlockRegistry>,
        stream: &StreamConfig,
        provider: Arc<dyn ChunkProvider>,
        sink: S,
    ) -> Result<Self, WorldError> {
        let manager = ChunkManager::new(stream, provider)?;
        let overlay = BlockOverlay::new(manager.dims());
        Ok(Self {
            registry,
            manager,
            overlay,
            meshes: HashMap::new(),
            sink,
        })
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn overlay(&self) -> &BlockOverlay {
        &self.overlay
    }

    pub fn manager(&self) -> &ChunkManager {
        &self.manager
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn mesh(&self, key: ChunkKey) -> Option<&ChunkMesh> {
        self.meshes.get(&key)
    }

    /// Runs one streaming tick around `position` and meshes every chunk it
    /// loaded. Returns once loads, meshing, and unloads are done.
    pub fn update(&mut self, position: Vec3) -> WorldTickStats {
        let up = self.manager.update(position);
        let mut stats = WorldTickStats {
            stream: up.stats,
            ..Default::default()
        };
        let mut loaded = Vec::new();
        for ev in &up.events {
            match *ev {
                StreamEvent::Loaded { key, lod } => {
                    stats.overlay_applied += self.prepare_loaded(key);
                    log::trace!(target: "world", "chunk {key} loaded at lod {lod}");
                    loaded.push(key);
                }
                StreamEvent::Unloaded { key } => self.on_chunk_unloaded(key),
            }
        }
        let (meshed, empty) = self.mesh_chunks(&loaded);
        stats.meshed = meshed;
        stats.empty = empty;
        stats
    }

    /// Writes pending overlay edits into a freshly loaded chunk.
    fn prepare_loaded(&mut self, key: ChunkKey) -> usize {
        match self.manager.chunk_mut(key) {
            Some(chunk) => self.overlay.apply_to_chunk(chunk),
            None => 0,
        }
    }

    /// Handles a chunk entering the loaded set: applies overlay edits, then
    /// rebuilds its mesh.
    pub fn on_chunk_loaded(&mut self, key: ChunkKey) {
        self.prepare_loaded(key);
        self.build_chunk(key);
    }

    /// Drops the mesh of an unloaded chunk. Overlay entries are kept.
    pub fn on_chunk_unloaded(&mut self, key: ChunkKey) {
        if self.meshes.remove(&key).is_some() {
            self.sink.dispose(key);
            log::trace!(target: "world", "chunk {key} mesh disposed");
        }
    }

    /// Meshes `keys` in parallel and installs the results. Returns
    /// `(non_empty, empty)` counts.
    fn mesh_chunks(&mut self, keys: &[ChunkKey]) -> (usize, usize) {
        let chunks: Vec<&Chunk> = keys.iter().filter_map(|k| self.manager.chunk(*k)).collect();
        let built = build_meshes_par(&chunks, &self.registry);
        let done: Vec<ChunkKey> = chunks.iter().map(|c| c.key()).collect();
        let (mut meshed, mut empty) = (0, 0);
        for (key, mesh) in done.into_iter().zip(built) {
            match install_mesh(&mut self.meshes, &mut self.sink, key, mesh) {
                Install::Uploaded => meshed += 1,
                Install::Empty => empty += 1,
            }
            if let Some(c) = self.manager.chunk_mut(key) {
                c.clear_remesh();
            }
        }
        (meshed, empty)
    }

    /// Rebuilds the mesh of one loaded chunk on the calling thread.
    fn build_chunk(&mut self, key: ChunkKey) {
        let Some(chunk) = self.manager.chunk(key) else {
            return;
        };
        let mesh = build_chunk_greedy(chunk, &self.registry);
        install_mesh(&mut self.meshes, &mut self.sink, key, mesh);
        if let Some(c) = self.manager.chunk_mut(key) {
            c.clear_remesh();
        }
    }

    /// Remeshes every loaded chunk flagged dirty. Returns how many were rebuilt.
    pub fn rebuild_dirty(&mut self) -> usize {
        let dirty: Vec<ChunkKey> = self
            .manager
            .loaded_chunks()
            .filter(|c| c.needs_remesh())
            .map(Chunk::key)
            .collect();
        let (meshed, empty) = self.mesh_chunks(&dirty);
        meshed + empty
    }

    /// Sets the block at `position` (rounded to the nearest block) to the named
    /// type, or to air when the name is `None` or unknown.
    ///
    /// The edit is recorded in the overlay whether or not its chunk is loaded.
    /// A loaded chunk is updated and remeshed before this returns.
    pub fn apply_block_change(&mut self, position: Vec3, block: Option<&str>) -> Option<BlockId> {
        let Some((wx, wy, wz)) = position.round_to_block() else {
            log::debug!(target: "world", "ignoring edit at non-finite position {position:?}");
            return None;
        };
        let id = self.registry.id_or_air(block);
        if block.is_some() && id == AIR {
            log::debug!(target: "world", "unknown block {block:?}, treating as air");
        }
        self.overlay.set(wx, wy, wz, id);
        let key = ChunkCoord::containing_block(wx, wy, wz, self.manager.dims()).key();
        if let Some(chunk) = self.manager.chunk_mut(key) {
            chunk.set_world(wx, wy, wz, id);
            self.build_chunk(key);
        }
        log::debug!(target: "world", "block ({wx}, {wy}, {wz}) set to {id}");
        Some(id)
    }

    /// Block id at `position`: the overlay wins, then the loaded chunk.
    pub fn block_id_at(&self, position: Vec3) -> Option<BlockId> {
        let (wx, wy, wz) = position.round_to_block()?;
        if let Some(id) = self.overlay.get(wx, wy, wz) {
            return Some(id);
        }
        self.manager.chunk_containing_block(wx, wy, wz)?.get_world(wx, wy, wz)
    }

    /// Definition of the block at `position`, or `None` for air, unknown ids,
    /// and unloaded chunks without an overlay entry.
    pub fn get_block_definition_at(&self, position: Vec3) -> Option<&BlockDefinition> {
        match self.block_id_at(position)? {
            AIR => None,
            id => self.registry.get_by_id(id),
        }
    }

    pub fn export_overlay(&self) -> OverlaySnapshot {
        OverlaySnapshot::from_overlay(&self.overlay)
    }

    /// Merges `snapshot` into the overlay, writes it into loaded chunks, and
    /// remeshes those that changed. Returns the number of entries imported.
    pub fn import_overlay(&mut self, snapshot: &OverlaySnapshot) -> usize {
        let n = snapshot.apply_to(&mut self.overlay);
        let keys: Vec<ChunkKey> = self.manager.loaded_keys().collect();
        for key in keys {
            if let Some(chunk) = self.manager.chunk_mut(key) {
                self.overlay.apply_to_chunk(chunk);
            }
        }
        self.rebuild_dirty();
        n
    }

    /// Releases every live mesh.
    pub fn dispose(&mut self) {
        for (key, _) in self.meshes.drain() {
            self.sink.dispose(key);
        }
    }
}
