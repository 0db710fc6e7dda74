use fastnoise_lite::{FastNoiseLite, NoiseType};
use tessel_blocks::{AIR, BlockId, BlockRegistry};
use tessel_chunk::{Chunk, ChunkCoord, ChunkDims};
use tessel_runtime::{ChunkProvider, ProviderError};

use crate::worldgen::{WorldGenConfig, WorldGenError};

/// Block ids for each terrain layer, resolved from config names.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub top: BlockId,
    pub shore: BlockId,
    pub sub_near: BlockId,
    pub sub_deep: BlockId,
    pub water: BlockId,
}

impl Palette {
    pub fn resolve(cfg: &WorldGenConfig, reg: &BlockRegistry) -> Result<Self, WorldGenError> {
        let id = |name: &str| {
            reg.id_by_name(name)
                .ok_or_else(|| WorldGenError::UnknownBlock(name.to_string()))
        };
        Ok(Self {
            top: id(&cfg.surface.top)?,
            shore: id(&cfg.surface.shore)?,
            sub_near: id(&cfg.surface.sub_near)?,
            sub_deep: id(&cfg.surface.sub_deep)?,
            water: if cfg.water.enable { id(&cfg.water.block)? } else { AIR },
        })
    }
}

/// Column layering shared by both providers. `height` is the world y of the
/// surface block.
#[derive(Clone, Debug)]
struct Layers {
    palette: Palette,
    topsoil: i32,
    water_level: Option<i32>,
}

impl Layers {
    fn block_at(&self, y: i32, height: i32) -> BlockId {
        if y > height {
            return match self.water_level {
                Some(level) if y <= level => self.palette.water,
                _ => AIR,
            };
        }
        if y == height {
            match self.water_level {
                Some(level) if height <= level + 1 => self.palette.shore,
                _ => self.palette.top,
            }
        } else if y + self.topsoil >= height {
            self.palette.sub_near
        } else {
            self.palette.sub_deep
        }
    }

    /// Fills `chunk` from a per-column height function sampled every
    /// `1 << lod` columns; each sample covers a `step x step` footprint.
    fn fill(&self, chunk: &mut Chunk, mut height_at: impl FnMut(i32, i32) -> i32) {
        let dims = chunk.dims();
        let (ox, oy, oz) = chunk.world_origin();
        let step = 1usize << chunk.lod().min(4);
        for lx in (0..dims.size).step_by(step) {
            for lz in (0..dims.size).step_by(step) {
                let h = height_at(ox + lx as i32, oz + lz as i32);
                for sx in lx..(lx + step).min(dims.size) {
                    for sz in lz..(lz + step).min(dims.size) {
                        for ly in 0..dims.height {
                            let id = self.block_at(oy + ly as i32, h);
                            if id != AIR {
                                chunk.set_block(sx, ly, sz, id);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Flat ground: `thickness` blocks starting at world y = 0.
pub struct FlatProvider {
    dims: ChunkDims,
    thickness: i32,
    layers: Layers,
}

impl FlatProvider {
    pub fn new(cfg: &WorldGenConfig, reg: &BlockRegistry, dims: ChunkDims) -> Result<Self, WorldGenError> {
        Ok(Self {
            dims,
            thickness: cfg.flat.thickness,
            layers: Layers {
                palette: Palette::resolve(cfg, reg)?,
                topsoil: cfg.surface.topsoil_thickness,
                water_level: None,
            },
        })
    }
}

impl ChunkProvider for FlatProvider {
    fn dims(&self) -> ChunkDims {
        self.dims
    }

    fn generate_chunk(&self, coord: ChunkCoord, lod: u8) -> Result<Chunk, ProviderError> {
        let mut chunk = Chunk::new(coord, lod, self.dims);
        if self.thickness > 0 {
            let top = self.thickness - 1;
            self.layers.fill(&mut chunk, |_, _| top);
        }
        Ok(chunk)
    }
}

/// Noise heightmap terrain with soil, stone, and water layers.
pub struct HeightmapProvider {
    dims: ChunkDims,
    base: f32,
    amplitude: f32,
    detail_amplitude: f32,
    terrain: FastNoiseLite,
    detail: FastNoiseLite,
    layers: Layers,
}

impl HeightmapProvider {
    pub fn new(cfg: &WorldGenConfig, reg: &BlockRegistry, dims: ChunkDims) -> Result<Self, WorldGenError> {
        let mut terrain = FastNoiseLite::with_seed(cfg.seed);
        terrain.set_noise_type(Some(NoiseType::OpenSimplex2));
        terrain.set_frequency(Some(cfg.height.frequency));
        let mut detail = FastNoiseLite::with_seed(cfg.seed ^ 0x5eed);
        detail.set_noise_type(Some(NoiseType::OpenSimplex2));
        detail.set_frequency(Some(cfg.height.detail_frequency));
        Ok(Self {
            dims,
            base: cfg.height.base,
            amplitude: cfg.height.amplitude,
            detail_amplitude: cfg.height.detail_amplitude,
            terrain,
            detail,
            layers: Layers {
                palette: Palette::resolve(cfg, reg)?,
                topsoil: cfg.surface.topsoil_thickness,
                water_level: cfg.water.enable.then_some(cfg.water.level),
            },
        })
    }

    /// World y of the surface block at column `(wx, wz)`.
    pub fn height_at(&self, wx: i32, wz: i32) -> i32 {
        let (x, z) = (wx as f32, wz as f32);
        let n = self.terrain.get_noise_2d(x, z);
        let d = self.detail.get_noise_2d(x, z);
        (self.base + n * self.amplitude + d * self.detail_amplitude).floor() as i32
    }
}

impl ChunkProvider for HeightmapProvider {
    fn dims(&self) -> ChunkDims {
        self.dims
    }

    fn generate_chunk(&self, coord: ChunkCoord, lod: u8) -> Result<Chunk, ProviderError> {
        let mut chunk = Chunk::new(coord, lod, self.dims);
        self.layers.fill(&mut chunk, |wx, wz| self.height_at(wx, wz));
        Ok(chunk)
    }
}
