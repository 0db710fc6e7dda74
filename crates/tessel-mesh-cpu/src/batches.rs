use std::ops::Range;

use tessel_blocks::types::BlockId;

use crate::constants::{INDICES_PER_QUAD, VERTICES_PER_QUAD};
use crate::face::Face;
use crate::mesh_build::FaceDescriptor;

/// A run of consecutive quads sharing one block id and direction, and so one
/// face material.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DrawBatch {
    pub block_id: BlockId,
    pub face: Face,
    pub first_quad: usize,
    pub quad_count: usize,
}

impl DrawBatch {
    #[inline]
    pub fn vertex_range(&self) -> Range<usize> {
        self.first_quad * VERTICES_PER_QUAD..(self.first_quad + self.quad_count) * VERTICES_PER_QUAD
    }

    #[inline]
    pub fn index_range(&self) -> Range<usize> {
        self.first_quad * INDICES_PER_QUAD..(self.first_quad + self.quad_count) * INDICES_PER_QUAD
    }
}

/// Splits the face list into runs of equal `(block_id, face)`.
pub fn group_draw_batches(faces: &[FaceDescriptor]) -> Vec<DrawBatch> {
    let mut out: Vec<DrawBatch> = Vec::new();
    for (i, f) in faces.iter().enumerate() {
        match out.last_mut() {
            Some(b) if b.block_id == f.block_id && b.face == f.face => b.quad_count += 1,
            _ => out.push(DrawBatch {
                block_id: f.block_id,
                face: f.face,
                first_quad: i,
                quad_count: 1,
            }),
        }
    }
    out
}
