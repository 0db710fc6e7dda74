//! CPU greedy mesher: chunk block grids to quad buffers.
#![forbid(unsafe_code)]

pub mod batches;
pub mod constants;
pub mod face;
pub mod greedy;
pub mod mesh_build;

pub use batches::{DrawBatch, group_draw_batches};
pub use face::{Face, FaceAxes, face_axes};
pub use greedy::greedy_rects;
pub use mesh_build::{ChunkMesh, FaceDescriptor};

use rayon::prelude::*;
use tessel_blocks::{AIR, BlockId, BlockRegistry};
use tessel_chunk::Chunk;

/// Whether the face of `cell` toward `neighbor` is drawn. `None` means the
/// neighbor lies outside the chunk.
#[inline]
pub fn face_visible(reg: &BlockRegistry, cell: BlockId, neighbor: Option<BlockId>) -> bool {
    if !reg.is_renderable(cell) {
        return false;
    }
    match neighbor {
        None => true,
        Some(n) => !reg.is_renderable(n) || n != cell,
    }
}

/// Builds the merged quad mesh for all six directions of `chunk`.
///
/// Positions are local to the chunk; `ChunkMesh::origin` carries the chunk's
/// world block origin.
pub fn build_chunk_greedy(chunk: &Chunk, reg: &BlockRegistry) -> ChunkMesh {
    let (ox, oy, oz) = chunk.world_origin();
    let mut mesh = ChunkMesh::new([ox, oy, oz]);
    if chunk.is_all_air() {
        return mesh;
    }
    let dims = chunk.dims();
    let (sx, sy, sz) = dims.extents();
    let size = [sx, sy, sz];
    let blocks = chunk.blocks();
    let at = |p: [usize; 3]| blocks[Chunk::index(dims, p[0], p[1], p[2])];

    let mut mask: Vec<Option<BlockId>> = Vec::new();
    for face in Face::ALL {
        let ax = face_axes(face);
        let (w, h) = (size[ax.u], size[ax.v]);
        let depth = size[ax.axis];
        mask.clear();
        mask.resize(w * h, None);
        for plane in 0..=depth {
            // Cell whose face lies on this plane, and the neighbor across it.
            let (cell_s, nb_s) = if face.is_positive() {
                (plane.checked_sub(1), Some(plane).filter(|&p| p < depth))
            } else {
                (Some(plane).filter(|&p| p < depth), plane.checked_sub(1))
            };
            let Some(cell_s) = cell_s else { continue };
            let mut any = false;
            for v in 0..h {
                for u in 0..w {
                    let mut p = [0usize; 3];
                    p[ax.axis] = cell_s;
                    p[ax.u] = u;
                    p[ax.v] = v;
                    let cell = at(p);
                    if cell == AIR {
                        continue;
                    }
                    let neighbor = nb_s.map(|s| {
                        p[ax.axis] = s;
                        at(p)
                    });
                    if face_visible(reg, cell, neighbor) {
                        mask[v * w + u] = Some(cell);
                        any = true;
                    }
                }
            }
            if !any {
                continue;
            }
            greedy_rects(w, h, &mut mask, |u, v, rw, rh, id| {
                mesh.add_face_rect(face, plane, u, v, rw, rh, id);
            });
        }
    }
    log::trace!(
        target: "mesh",
        "chunk {} lod {}: {} quads",
        chunk.key(),
        chunk.lod(),
        mesh.quad_count()
    );
    mesh
}

/// Meshes many chunks on the rayon pool. Output order matches `chunks`.
pub fn build_meshes_par(chunks: &[&Chunk], reg: &BlockRegistry) -> Vec<ChunkMesh> {
    chunks
        .par_iter()
        .map(|c| build_chunk_greedy(c, reg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_blocks::{BlockDefinition, BlockMaterial, FaceMaterials, SurfaceRef};
    use tessel_chunk::{ChunkCoord, ChunkDims};

    fn def(id: BlockId, name: &str, opaque: bool, solid: bool) -> BlockDefinition {
        BlockDefinition {
            id,
            name: name.into(),
            display_name: name.into(),
            material: BlockMaterial::new(name, FaceMaterials::uniform(SurfaceRef::from_prefix(name))),
            opaque,
            solid,
            light_emission: None,
        }
    }

    fn reg() -> BlockRegistry {
        let mut r = BlockRegistry::new();
        r.register(def(1, "stone", true, true)).unwrap();
        r.register(def(2, "glass", false, true)).unwrap();
        r.register(def(3, "ghost", true, false)).unwrap();
        r
    }

    #[test]
    fn visibility_rule() {
        let r = reg();
        assert!(!face_visible(&r, AIR, None));
        assert!(face_visible(&r, 1, None));
        assert!(face_visible(&r, 1, Some(AIR)));
        assert!(face_visible(&r, 1, Some(2)));
        assert!(!face_visible(&r, 1, Some(1)));
        // opaque and not solid is not renderable
        assert!(!face_visible(&r, 3, None));
        assert!(face_visible(&r, 1, Some(3)));
        // unknown ids count as solid
        assert!(face_visible(&r, 42, None));
        assert!(!face_visible(&r, 42, Some(42)));
    }

    #[test]
    fn single_block_has_six_unit_quads() {
        let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 0, ChunkDims::new(4, 4));
        c.set_block(1, 2, 3, 1);
        let m = build_chunk_greedy(&c, &reg());
        assert_eq!(m.quad_count(), 6);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.indices.len(), 36);
        let faces: Vec<Face> = m.faces.iter().map(|f| f.face).collect();
        assert_eq!(faces, Face::ALL.to_vec());
    }

    #[test]
    fn glass_next_to_stone_keeps_both_faces() {
        let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 0, ChunkDims::new(4, 4));
        c.set_block(1, 1, 1, 1);
        c.set_block(2, 1, 1, 2);
        let m = build_chunk_greedy(&c, &reg());
        // Two cubes, shared face drawn from both sides.
        assert_eq!(m.quad_count(), 12);
    }

    #[test]
    fn origin_follows_chunk_coord() {
        let mut c = Chunk::new(ChunkCoord::new(-1, 2, 3), 0, ChunkDims::new(8, 16));
        c.set_block(0, 0, 0, 1);
        let m = build_chunk_greedy(&c, &reg());
        assert_eq!(m.origin, [-8, 32, 24]);
        let b = m.bounds().unwrap();
        assert_eq!(b.min.x, -8.0);
        assert_eq!(b.max.y, 33.0);
    }
}
