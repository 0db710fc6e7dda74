use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ChunkDims;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    /// Neighbor at `(dx, dy, dz)`, or `None` if a component overflows.
    #[inline]
    pub fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self {
            cx: self.cx.checked_add(dx)?,
            cy: self.cy.checked_add(dy)?,
            cz: self.cz.checked_add(dz)?,
        })
    }

    /// Chunk holding integer world block `(wx, wy, wz)`.
    #[inline]
    pub fn containing_block(wx: i32, wy: i32, wz: i32, dims: ChunkDims) -> Self {
        let (sx, sy, sz) = dims.extents();
        Self {
            cx: wx.div_euclid(sx as i32),
            cy: wy.div_euclid(sy as i32),
            cz: wz.div_euclid(sz as i32),
        }
    }

    /// Chunk holding a continuous world position (floor of position / extent per axis).
    #[inline]
    pub fn containing(x: f32, y: f32, z: f32, dims: ChunkDims) -> Self {
        let (sx, sy, sz) = dims.extents();
        Self {
            cx: (x / sx as f32).floor() as i32,
            cy: (y / sy as f32).floor() as i32,
            cz: (z / sz as f32).floor() as i32,
        }
    }

    /// World block coordinate of this chunk's local `(0, 0, 0)`.
    #[inline]
    pub fn world_origin(self, dims: ChunkDims) -> (i32, i32, i32) {
        let (sx, sy, sz) = dims.extents();
        (
            self.cx * sx as i32,
            self.cy * sy as i32,
            self.cz * sz as i32,
        )
    }

    /// Like `world_origin`, but `None` unless every block of the chunk has an
    /// `i32` world coordinate.
    pub fn checked_world_origin(self, dims: ChunkDims) -> Option<(i32, i32, i32)> {
        let (sx, sy, sz) = dims.extents();
        let axis = |c: i32, s: usize| -> Option<i32> {
            let s = i32::try_from(s).ok()?;
            let o = c.checked_mul(s)?;
            o.checked_add(s - 1)?;
            Some(o)
        };
        Some((axis(self.cx, sx)?, axis(self.cy, sy)?, axis(self.cz, sz)?))
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i128 {
        let dx = i128::from(self.cx) - i128::from(other.cx);
        let dy = i128::from(self.cy) - i128::from(other.cy);
        let dz = i128::from(self.cz) - i128::from(other.cz);
        dx * dx + dy * dy + dz * dz
    }

    /// Euclidean distance in chunk-grid units.
    #[inline]
    pub fn distance(self, other: ChunkCoord) -> f32 {
        (self.distance_sq(other) as f64).sqrt() as f32
    }

    #[inline]
    pub fn key(self) -> ChunkKey {
        ChunkKey::from(self)
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}

/// Packed identity of a chunk coordinate; displays as `x|y|z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey(u128);

impl ChunkKey {
    #[inline]
    pub fn coord(self) -> ChunkCoord {
        ChunkCoord {
            cx: (self.0 >> 64) as u32 as i32,
            cy: (self.0 >> 32) as u32 as i32,
            cz: self.0 as u32 as i32,
        }
    }
}

impl From<ChunkCoord> for ChunkKey {
    #[inline]
    fn from(c: ChunkCoord) -> Self {
        ChunkKey(
            (u128::from(c.cx as u32) << 64)
                | (u128::from(c.cy as u32) << 32)
                | u128::from(c.cz as u32),
        )
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.coord();
        write!(f, "{}|{}|{}", c.cx, c.cy, c.cz)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed chunk key `{0}`")]
pub struct ParseKeyError(pub String);

impl FromStr for ChunkKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('|').map(|p| p.trim().parse::<i32>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) => Ok(ChunkCoord::new(x, y, z).key()),
            _ => Err(ParseKeyError(s.to_string())),
        }
    }
}
