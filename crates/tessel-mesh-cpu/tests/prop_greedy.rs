use proptest::prelude::*;
use tessel_blocks::{AIR, BlockId, BlockRegistry, Face};
use tessel_chunk::{Chunk, ChunkCoord, ChunkDims};
use tessel_mesh_cpu::{ChunkMesh, build_chunk_greedy, build_meshes_par, face_axes, face_visible};

fn reg() -> BlockRegistry {
    BlockRegistry::builtin().unwrap()
}

fn filled(dims: ChunkDims, id: BlockId) -> Chunk {
    let mut c = Chunk::new(ChunkCoord::new(0, 0, 0), 0, dims);
    c.fill(id);
    c
}

/// Min and max corner of quad `q` in local coordinates.
fn quad_box(m: &ChunkMesh, q: usize) -> ([f32; 3], [f32; 3]) {
    let mut lo = [f32::MAX; 3];
    let mut hi = [f32::MIN; 3];
    for i in 0..4 {
        let p = m.vertex(q * 4 + i);
        for (a, c) in [p.x, p.y, p.z].into_iter().enumerate() {
            lo[a] = lo[a].min(c);
            hi[a] = hi[a].max(c);
        }
    }
    (lo, hi)
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[test]
fn air_chunk_has_no_quads() {
    let c = Chunk::new(ChunkCoord::new(3, 0, -2), 0, ChunkDims::default());
    let m = build_chunk_greedy(&c, &reg());
    assert_eq!(m.quad_count(), 0);
    assert!(m.is_empty());
    assert!(m.positions.is_empty() && m.indices.is_empty());
    assert!(m.bounds().is_none());
}

#[test]
fn uniform_fill_is_six_full_quads_at_any_size() {
    let r = reg();
    for dims in [ChunkDims::new(1, 1), ChunkDims::new(4, 9), ChunkDims::new(16, 128), ChunkDims::new(32, 8)] {
        let m = build_chunk_greedy(&filled(dims, 3), &r);
        assert_eq!(m.quad_count(), 6, "{dims:?}");
        let (sx, sy, sz) = dims.extents();
        let size = [sx as f32, sy as f32, sz as f32];
        for (q, f) in m.faces.iter().enumerate() {
            assert_eq!(f.block_id, 3);
            let ax = face_axes(f.face);
            let (lo, hi) = quad_box(&m, q);
            assert_eq!(hi[ax.u] - lo[ax.u], size[ax.u]);
            assert_eq!(hi[ax.v] - lo[ax.v], size[ax.v]);
            let plane = if f.face.is_positive() { size[ax.axis] } else { 0.0 };
            assert_eq!(lo[ax.axis], plane);
            assert_eq!(hi[ax.axis], plane);
        }
    }
}

#[test]
fn column_with_air_top_layer() {
    let dims = ChunkDims::new(16, 128);
    let mut c = filled(dims, 1);
    for z in 0..16 {
        for x in 0..16 {
            c.set_block(x, 127, z, AIR);
        }
    }
    let m = build_chunk_greedy(&c, &reg());
    assert_eq!(m.quad_count(), 6);
    for (q, f) in m.faces.iter().enumerate() {
        let (lo, hi) = quad_box(&m, q);
        match f.face {
            Face::Py => {
                assert_eq!((lo[1], hi[1]), (127.0, 127.0));
                assert_eq!((hi[0] - lo[0], hi[2] - lo[2]), (16.0, 16.0));
            }
            Face::Ny => assert_eq!((lo[1], hi[1]), (0.0, 0.0)),
            _ => assert_eq!((lo[1], hi[1]), (0.0, 127.0), "{:?}", f.face),
        }
    }
}

#[test]
fn winding_points_along_normal() {
    let mut c = filled(ChunkDims::new(4, 4), AIR);
    c.set_block(1, 1, 1, 1);
    c.set_block(2, 1, 1, 1);
    let m = build_chunk_greedy(&c, &reg());
    for tri in m.indices.chunks(3) {
        let [a, b, cc] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (pa, pb, pc) = (m.vertex(a), m.vertex(b), m.vertex(cc));
        let e1 = pb - pa;
        let e2 = pc - pa;
        let n = cross([e1.x, e1.y, e1.z], [e2.x, e2.y, e2.z]);
        let nn = &m.normals[a * 3..a * 3 + 3];
        let d = n[0] * nn[0] + n[1] * nn[1] + n[2] * nn[2];
        assert!(d > 0.0, "triangle {tri:?} faces inward");
    }
}

#[test]
fn uvs_scale_with_merged_rect() {
    let mut c = filled(ChunkDims::new(8, 8), AIR);
    // 3 wide along x, 2 deep along z, one block tall.
    for x in 0..3 {
        for z in 0..2 {
            c.set_block(x, 0, z, 1);
        }
    }
    let m = build_chunk_greedy(&c, &reg());
    let q = m.faces.iter().position(|f| f.face == Face::Py).unwrap();
    let uv = &m.uvs[q * 8..q * 8 + 8];
    // +Y spans u = z, v = x.
    let max_u = uv.iter().step_by(2).cloned().fold(0.0, f32::max);
    let max_v = uv.iter().skip(1).step_by(2).cloned().fold(0.0, f32::max);
    assert_eq!((max_u, max_v), (2.0, 3.0));
}

#[test]
fn parallel_matches_serial() {
    let r = reg();
    let a = filled(ChunkDims::new(8, 8), 2);
    let mut b = filled(ChunkDims::new(8, 8), AIR);
    b.set_block(4, 4, 4, 5);
    let out = build_meshes_par(&[&a, &b], &r);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0], build_chunk_greedy(&a, &r));
    assert_eq!(out[1], build_chunk_greedy(&b, &r));
}

fn cell_strategy() -> impl Strategy<Value = Vec<BlockId>> {
    // Ids 0..=5 include air and water (not renderable-solid but renderable).
    prop::collection::vec(prop_oneof![3 => Just(AIR), 1 => 1u16..=5], 6 * 5 * 6)
}

proptest! {
    #[test]
    fn quads_cover_exactly_the_visible_faces(cells in cell_strategy()) {
        let r = reg();
        let dims = ChunkDims::new(6, 5);
        let c = Chunk::from_blocks(ChunkCoord::new(0, 0, 0), 0, dims, cells).unwrap();
        let m = build_chunk_greedy(&c, &r);
        let (sx, sy, sz) = dims.extents();
        let size = [sx, sy, sz];
        let get = |p: [i64; 3]| -> Option<BlockId> {
            if (0..3).all(|a| p[a] >= 0 && (p[a] as usize) < size[a]) {
                Some(c.get_block(p[0] as usize, p[1] as usize, p[2] as usize))
            } else {
                None
            }
        };

        let mut covered = 0usize;
        for (q, f) in m.faces.iter().enumerate() {
            let ax = face_axes(f.face);
            let (lo, hi) = quad_box(&m, q);
            let plane = lo[ax.axis] as i64;
            let (cell_s, nb_s) = if f.face.is_positive() { (plane - 1, plane) } else { (plane, plane - 1) };
            for u in lo[ax.u] as i64..hi[ax.u] as i64 {
                for v in lo[ax.v] as i64..hi[ax.v] as i64 {
                    let mut p = [0i64; 3];
                    p[ax.u] = u;
                    p[ax.v] = v;
                    p[ax.axis] = cell_s;
                    prop_assert_eq!(get(p), Some(f.block_id));
                    p[ax.axis] = nb_s;
                    let nb = get(p);
                    prop_assert!(face_visible(&r, f.block_id, nb));
                    if let Some(n) = nb {
                        prop_assert!(n != f.block_id, "internal seam at {:?}", p);
                    }
                    covered += 1;
                }
            }
        }

        let mut expected = 0usize;
        for y in 0..sy as i64 {
            for z in 0..sz as i64 {
                for x in 0..sx as i64 {
                    let Some(id) = get([x, y, z]) else { continue };
                    for face in Face::ALL {
                        let (dx, dy, dz) = face.delta();
                        if face_visible(&r, id, get([x + dx as i64, y + dy as i64, z + dz as i64])) {
                            expected += 1;
                        }
                    }
                }
            }
        }
        prop_assert_eq!(covered, expected);
    }
}
