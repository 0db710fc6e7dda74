use tessel_blocks::types::{AIR, BlockId};
use thiserror::Error;

use crate::{ChunkCoord, ChunkDims, ChunkKey};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("block array has {got} cells, chunk needs {expected}")]
    LengthMismatch { expected: usize, got: usize },
}

/// Fixed-size block grid located at a chunk coordinate.
///
/// Local coordinates must lie inside the chunk: `get_block` and `set_block`
/// panic on out-of-range input. Use `try_get_block` for a checked read.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    coord: ChunkCoord,
    lod: u8,
    dims: ChunkDims,
    blocks: Vec<BlockId>,
    needs_remesh: bool,
}

impl Chunk {
    /// Air-filled chunk, flagged for meshing.
    pub fn new(coord: ChunkCoord, lod: u8, dims: ChunkDims) -> Self {
        Self {
            coord,
            lod,
            dims,
            blocks: vec![AIR; dims.volume()],
            needs_remesh: true,
        }
    }

    pub fn from_blocks(
        coord: ChunkCoord,
        lod: u8,
        dims: ChunkDims,
        blocks: Vec<BlockId>,
    ) -> Result<Self, ChunkError> {
        if blocks.len() != dims.volume() {
            return Err(ChunkError::LengthMismatch {
                expected: dims.volume(),
                got: blocks.len(),
            });
        }
        Ok(Self {
            coord,
            lod,
            dims,
            blocks,
            needs_remesh: true,
        })
    }

    /// Linear index of local `(x, y, z)`: x varies fastest, then z, then y.
    #[inline]
    pub fn index(dims: ChunkDims, x: usize, y: usize, z: usize) -> usize {
        x + dims.size * (z + dims.size * y)
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn key(&self) -> ChunkKey {
        self.coord.key()
    }

    #[inline]
    pub fn lod(&self) -> u8 {
        self.lod
    }

    #[inline]
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    #[inline]
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    #[inline]
    pub fn needs_remesh(&self) -> bool {
        self.needs_remesh
    }

    #[inline]
    pub fn clear_remesh(&mut self) {
        self.needs_remesh = false;
    }

    #[inline]
    pub fn contains_local(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.dims.size && y < self.dims.height && z < self.dims.size
    }

    #[inline]
    fn checked_index(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(
            self.contains_local(x, y, z),
            "local block ({x}, {y}, {z}) outside chunk {} of {}x{}x{}",
            self.key(),
            self.dims.size,
            self.dims.height,
            self.dims.size,
        );
        Self::index(self.dims, x, y, z)
    }

    #[inline]
    pub fn get_block(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks[self.checked_index(x, y, z)]
    }

    #[inline]
    pub fn try_get_block(&self, x: usize, y: usize, z: usize) -> Option<BlockId> {
        if self.contains_local(x, y, z) {
            Some(self.blocks[Self::index(self.dims, x, y, z)])
        } else {
            None
        }
    }

    /// Writes one cell and marks the chunk for remeshing.
    #[inline]
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, id: BlockId) {
        let i = self.checked_index(x, y, z);
        self.blocks[i] = id;
        self.needs_remesh = true;
    }

    pub fn fill(&mut self, id: BlockId) {
        self.blocks.fill(id);
        self.needs_remesh = true;
    }

    #[inline]
    pub fn world_origin(&self) -> (i32, i32, i32) {
        self.coord.world_origin(self.dims)
    }

    /// Local coordinate of world block `(wx, wy, wz)` if this chunk covers it.
    #[inline]
    pub fn world_to_local(&self, wx: i32, wy: i32, wz: i32) -> Option<(usize, usize, usize)> {
        let (bx, by, bz) = self.world_origin();
        let (lx, ly, lz) = (
            i64::from(wx) - i64::from(bx),
            i64::from(wy) - i64::from(by),
            i64::from(wz) - i64::from(bz),
        );
        if lx < 0 || ly < 0 || lz < 0 {
            return None;
        }
        let (lx, ly, lz) = (lx as usize, ly as usize, lz as usize);
        self.contains_local(lx, ly, lz).then_some((lx, ly, lz))
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self.world_to_local(wx, wy, wz).is_some()
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<BlockId> {
        let (lx, ly, lz) = self.world_to_local(wx, wy, wz)?;
        Some(self.get_block(lx, ly, lz))
    }

    /// Writes a world-addressed block; returns false when outside this chunk.
    pub fn set_world(&mut self, wx: i32, wy: i32, wz: i32, id: BlockId) -> bool {
        match self.world_to_local(wx, wy, wz) {
            Some((lx, ly, lz)) => {
                self.set_block(lx, ly, lz, id);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|&b| b == AIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk() -> Chunk {
        Chunk::new(ChunkCoord::new(0, 0, 0), 0, ChunkDims::new(4, 6))
    }

    #[test]
    fn new_chunk_is_air_and_dirty() {
        let c = chunk();
        assert_eq!(c.blocks().len(), 4 * 4 * 6);
        assert!(c.is_all_air());
        assert!(c.needs_remesh());
    }

    #[test]
    fn set_then_get_marks_dirty() {
        let mut c = chunk();
        c.clear_remesh();
        c.set_block(3, 5, 2, 9);
        assert_eq!(c.get_block(3, 5, 2), 9);
        assert!(c.needs_remesh());
    }

    #[test]
    fn fill_sets_every_cell() {
        let mut c = chunk();
        c.clear_remesh();
        c.fill(2);
        assert!(c.blocks().iter().all(|&b| b == 2));
        assert!(c.needs_remesh());
    }

    #[test]
    #[should_panic(expected = "outside chunk")]
    fn get_block_out_of_bounds_panics() {
        chunk().get_block(4, 0, 0);
    }

    #[test]
    #[should_panic(expected = "outside chunk")]
    fn set_block_above_height_panics() {
        chunk().set_block(0, 6, 0, 1);
    }

    #[test]
    fn try_get_block_is_checked() {
        let c = chunk();
        assert_eq!(c.try_get_block(0, 0, 4), None);
        assert_eq!(c.try_get_block(0, 0, 3), Some(AIR));
    }

    #[test]
    fn from_blocks_rejects_wrong_length() {
        let dims = ChunkDims::new(2, 3);
        let err = Chunk::from_blocks(ChunkCoord::default(), 0, dims, vec![0; 5]).unwrap_err();
        assert_eq!(err, ChunkError::LengthMismatch { expected: 12, got: 5 });
    }

    #[test]
    fn world_addressing_respects_origin() {
        let dims = ChunkDims::new(4, 6);
        let mut c = Chunk::new(ChunkCoord::new(-1, 1, 2), 0, dims);
        assert_eq!(c.world_origin(), (-4, 6, 8));
        assert!(c.set_world(-1, 11, 8, 5));
        assert_eq!(c.get_block(3, 5, 0), 5);
        assert_eq!(c.get_world(-1, 11, 8), Some(5));
        assert!(!c.set_world(0, 11, 8, 5));
        assert_eq!(c.get_world(-5, 6, 8), None);
    }
}
