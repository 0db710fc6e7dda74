use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender, unbounded};
use hashbrown::{HashMap, HashSet};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tessel_chunk::{Chunk, ChunkCoord, ChunkDims, ChunkKey};
use tessel_geom::Vec3;

use crate::config::StreamConfig;
use crate::error::{ProviderError, StreamError};
use crate::lod::LodTable;
use crate::provider::ChunkProvider;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StreamEvent {
    Loaded { key: ChunkKey, lod: u8 },
    Unloaded { key: ChunkKey },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub requested: usize,
    pub loaded: usize,
    pub failed: usize,
    pub unloaded: usize,
}

/// Result of one `ChunkManager::update`: load events (in request order)
/// followed by unload events.
#[derive(Clone, Debug, Default)]
pub struct StreamUpdate {
    pub events: Vec<StreamEvent>,
    pub stats: StreamStats,
}

struct GenOut {
    seq: usize,
    coord: ChunkCoord,
    lod: u8,
    result: Result<Chunk, ProviderError>,
}

/// Keeps the set of loaded chunks around a moving viewpoint.
///
/// Generation runs on a worker pool; `update` blocks until every request it
/// issued has settled, then runs the unload pass.
pub struct ChunkManager {
    load_distance: u32,
    unload_distance: u32,
    vertical_radius: u32,
    lod: LodTable,
    dims: ChunkDims,
    provider: Arc<dyn ChunkProvider>,
    loaded: HashMap<ChunkKey, Chunk>,
    pending: HashSet<ChunkKey>,
    pool: ThreadPool,
    res_tx: Sender<GenOut>,
    res_rx: Receiver<GenOut>,
    center: Option<ChunkCoord>,
}

impl ChunkManager {
    pub fn new(cfg: &StreamConfig, provider: Arc<dyn ChunkProvider>) -> Result<Self, StreamError> {
        let dims = provider.dims();
        if dims.size == 0 || dims.height == 0 {
            return Err(StreamError::EmptyChunkDims {
                size: dims.size,
                height: dims.height,
            });
        }
        if cfg.unload_distance <= cfg.load_distance {
            return Err(StreamError::InvalidDistances {
                load: cfg.load_distance,
                unload: cfg.unload_distance,
            });
        }
        let lod = LodTable::new(cfg.lod.clone())?;
        let workers = if cfg.workers > 0 {
            cfg.workers
        } else {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("tessel-gen-{i}"))
            .build()?;
        let (res_tx, res_rx) = unbounded();
        log::info!(
            target: "stream",
            "chunk manager: load {} unload {} vertical {} workers {}",
            cfg.load_distance,
            cfg.unload_distance,
            cfg.vertical_radius,
            workers
        );
        Ok(Self {
            load_distance: cfg.load_distance,
            unload_distance: cfg.unload_distance,
            vertical_radius: cfg.vertical_radius,
            lod,
            dims,
            provider,
            loaded: HashMap::new(),
            pending: HashSet::new(),
            pool,
            res_tx,
            res_rx,
            center: None,
        })
    }

    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    pub fn lod_table(&self) -> &LodTable {
        &self.lod
    }

    /// Center chunk of the most recent update.
    pub fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    pub fn loaded_len(&self) -> usize {
        self.loaded.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_loaded(&self, key: ChunkKey) -> bool {
        self.loaded.contains_key(&key)
    }

    pub fn loaded_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.loaded.values()
    }

    pub fn loaded_keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.loaded.keys().copied()
    }

    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk> {
        self.loaded.get(&key)
    }

    pub fn chunk_mut(&mut self, key: ChunkKey) -> Option<&mut Chunk> {
        self.loaded.get_mut(&key)
    }

    /// Loaded chunk covering a continuous world position.
    pub fn get_chunk_containing(&self, x: f32, y: f32, z: f32) -> Option<&Chunk> {
        self.chunk(ChunkCoord::containing(x, y, z, self.dims).key())
    }

    /// Loaded chunk covering integer world block `(wx, wy, wz)`.
    pub fn chunk_containing_block(&self, wx: i32, wy: i32, wz: i32) -> Option<&Chunk> {
        self.chunk(ChunkCoord::containing_block(wx, wy, wz, self.dims).key())
    }

    pub fn chunk_containing_block_mut(&mut self, wx: i32, wy: i32, wz: i32) -> Option<&mut Chunk> {
        let key = ChunkCoord::containing_block(wx, wy, wz, self.dims).key();
        self.chunk_mut(key)
    }

    /// Coordinates in load range of `center` that are neither loaded nor pending,
    /// nearest first.
    fn wanted(&self, center: ChunkCoord) -> Vec<(ChunkCoord, f32)> {
        let r = i32::try_from(self.load_distance).unwrap_or(i32::MAX);
        let vr = i32::try_from(self.vertical_radius).unwrap_or(i32::MAX);
        let r_sq = i64::from(r) * i64::from(r);
        let mut out = Vec::new();
        for dx in -r..=r {
            for dz in -r..=r {
                if i64::from(dx) * i64::from(dx) + i64::from(dz) * i64::from(dz) > r_sq {
                    continue;
                }
                for dy in -vr..=vr {
                    // Chunks past the i32 block range are never requested.
                    let Some(c) = center
                        .checked_offset(dx, dy, dz)
                        .filter(|c| c.checked_world_origin(self.dims).is_some())
                    else {
                        continue;
                    };
                    let key = c.key();
                    if self.loaded.contains_key(&key) || self.pending.contains(&key) {
                        continue;
                    }
                    out.push((c, c.distance(center)));
                }
            }
        }
        out.sort_by(|a, b| a.1.total_cmp(&b.1));
        out
    }

    fn check_chunk(&self, coord: ChunkCoord, chunk: &Chunk) -> Result<(), ProviderError> {
        if chunk.coord() != coord {
            return Err(ProviderError::Malformed(format!(
                "expected chunk {}, got {}",
                coord.key(),
                chunk.key()
            )));
        }
        if chunk.dims() != self.dims || chunk.blocks().len() != self.dims.volume() {
            return Err(ProviderError::Malformed(format!(
                "expected {:?}, got {:?}",
                self.dims,
                chunk.dims()
            )));
        }
        Ok(())
    }

    /// Streams chunks around `position`.
    ///
    /// Requests every missing chunk within range, waits for all of them, then
    /// unloads chunks beyond the unload distance. Chunks loaded during this call
    /// are never unloaded by the same call.
    pub fn update(&mut self, position: Vec3) -> StreamUpdate {
        let center = ChunkCoord::containing(position.x, position.y, position.z, self.dims);
        self.center = Some(center);
        let mut out = StreamUpdate::default();

        let wanted = self.wanted(center);
        for (seq, (coord, dist)) in wanted.into_iter().enumerate() {
            let lod = self.lod.resolve(dist);
            self.pending.insert(coord.key());
            let provider = Arc::clone(&self.provider);
            let tx = self.res_tx.clone();
            self.pool.spawn(move || {
                let result = catch_unwind(AssertUnwindSafe(|| provider.generate_chunk(coord, lod)))
                    .unwrap_or_else(|p| Err(ProviderError::Panicked(panic_message(p.as_ref()))));
                let _ = tx.send(GenOut {
                    seq,
                    coord,
                    lod,
                    result,
                });
            });
            out.stats.requested += 1;
        }

        let mut results = Vec::with_capacity(out.stats.requested);
        while results.len() < out.stats.requested {
            match self.res_rx.recv() {
                Ok(r) => results.push(r),
                Err(_) => break,
            }
        }
        results.sort_by_key(|r| r.seq);

        let mut fresh = HashSet::new();
        for GenOut {
            coord, lod, result, ..
        } in results
        {
            let key = coord.key();
            self.pending.remove(&key);
            match result.and_then(|c| self.check_chunk(coord, &c).map(|_| c)) {
                Ok(chunk) => {
                    self.loaded.insert(key, chunk);
                    fresh.insert(key);
                    out.events.push(StreamEvent::Loaded { key, lod });
                    out.stats.loaded += 1;
                }
                Err(e) => {
                    log::warn!(target: "stream", "chunk {key} failed to generate: {e}");
                    out.stats.failed += 1;
                }
            }
        }
        // Requests lost to a closed channel still leave the pending set.
        self.pending.clear();

        let limit = self.unload_distance as f32;
        let mut far: Vec<ChunkKey> = self
            .loaded
            .iter()
            .filter(|(k, c)| !fresh.contains(*k) && c.coord().distance(center) > limit)
            .map(|(k, _)| *k)
            .collect();
        far.sort();
        for key in far {
            self.loaded.remove(&key);
            out.events.push(StreamEvent::Unloaded { key });
            out.stats.unloaded += 1;
        }

        if out.stats != StreamStats::default() {
            log::debug!(
                target: "stream",
                "center {} requested {} loaded {} failed {} unloaded {} (resident {})",
                center.key(),
                out.stats.requested,
                out.stats.loaded,
                out.stats.failed,
                out.stats.unloaded,
                self.loaded.len()
            );
        }
        out
    }
}

fn panic_message(p: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = p.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = p.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
