use tessel_blocks::types::BlockId;
use tessel_geom::{Aabb, Vec3};

use crate::constants::VERTICES_PER_QUAD;
use crate::face::{Face, FaceAxes, face_axes};

/// Block and direction of one emitted quad, in emission order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaceDescriptor {
    pub block_id: BlockId,
    pub face: Face,
}

/// Renderable buffers for one chunk. Positions are chunk-local; `origin` is the
/// world block coordinate of the chunk's local `(0, 0, 0)`.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    pub origin: [i32; 3],
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
    pub faces: Vec<FaceDescriptor>,
}

impl ChunkMesh {
    pub fn new(origin: [i32; 3]) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Local position of vertex `i`.
    #[inline]
    pub fn vertex(&self, i: usize) -> Vec3 {
        Vec3::new(
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        )
    }

    /// World-space bounds of all emitted geometry.
    pub fn bounds(&self) -> Option<Aabb> {
        let o = Vec3::new(
            self.origin[0] as f32,
            self.origin[1] as f32,
            self.origin[2] as f32,
        );
        Aabb::from_points((0..self.vertex_count()).map(|i| self.vertex(i) + o))
    }

    /// Emits the quad for a merged `w x h` rectangle whose cell corner sits at
    /// `(u, v)` in the plane `plane` of `face`'s sweep axis.
    ///
    /// Vertices wind counter-clockwise seen from outside; UVs span `w x h` so
    /// tiling textures repeat once per block.
    pub fn add_face_rect(
        &mut self,
        face: Face,
        plane: usize,
        u: usize,
        v: usize,
        w: usize,
        h: usize,
        block_id: BlockId,
    ) {
        let FaceAxes { axis, u: ua, v: va } = face_axes(face);
        let mut origin = [0.0f32; 3];
        origin[axis] = plane as f32;
        origin[ua] = u as f32;
        origin[va] = v as f32;
        let mut du = [0.0f32; 3];
        du[ua] = w as f32;
        let mut dv = [0.0f32; 3];
        dv[va] = h as f32;
        let at = |a: f32, b: f32| -> [f32; 3] {
            [
                origin[0] + du[0] * a + dv[0] * b,
                origin[1] + du[1] * a + dv[1] * b,
                origin[2] + du[2] * a + dv[2] * b,
            ]
        };
        let (wf, hf) = (w as f32, h as f32);
        let (verts, uvs) = if face.is_positive() {
            (
                [at(0.0, 0.0), at(1.0, 0.0), at(1.0, 1.0), at(0.0, 1.0)],
                [[0.0, 0.0], [wf, 0.0], [wf, hf], [0.0, hf]],
            )
        } else {
            (
                [at(0.0, 0.0), at(0.0, 1.0), at(1.0, 1.0), at(1.0, 0.0)],
                [[0.0, 0.0], [0.0, hf], [wf, hf], [wf, 0.0]],
            )
        };
        let n = face.normal();
        let base = self.vertex_count() as u32;
        for i in 0..VERTICES_PER_QUAD {
            self.positions.extend_from_slice(&verts[i]);
            self.normals.extend_from_slice(&n);
            self.uvs.extend_from_slice(&uvs[i]);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        self.faces.push(FaceDescriptor { block_id, face });
    }
}
