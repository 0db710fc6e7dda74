use serde::{Deserialize, Serialize};

pub type BlockId = u16;

/// Reserved identifier for empty space.
pub const AIR: BlockId = 0;

/// The six axis-aligned face directions, in emission order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Px = 0,
    Nx = 1,
    Py = 2,
    Ny = 3,
    Pz = 4,
    Nz = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::Px, Face::Nx, Face::Py, Face::Ny, Face::Pz, Face::Nz];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a face index `[0..6)` back into a `Face`.
    #[inline]
    pub fn from_index(i: usize) -> Option<Face> {
        Face::ALL.get(i).copied()
    }

    /// Short key used in config files and logs (`px`, `nx`, ...).
    #[inline]
    pub fn key(self) -> &'static str {
        match self {
            Face::Px => "px",
            Face::Nx => "nx",
            Face::Py => "py",
            Face::Ny => "ny",
            Face::Pz => "pz",
            Face::Nz => "nz",
        }
    }

    /// Integer grid delta when stepping out through this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::Px => (1, 0, 0),
            Face::Nx => (-1, 0, 0),
            Face::Py => (0, 1, 0),
            Face::Ny => (0, -1, 0),
            Face::Pz => (0, 0, 1),
            Face::Nz => (0, 0, -1),
        }
    }

    #[inline]
    pub fn normal(self) -> [f32; 3] {
        let (dx, dy, dz) = self.delta();
        [dx as f32, dy as f32, dz as f32]
    }

    /// Axis the face is perpendicular to: 0 = x, 1 = y, 2 = z.
    #[inline]
    pub fn axis(self) -> usize {
        self.index() / 2
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.index() % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip_and_axes() {
        for f in Face::ALL {
            assert_eq!(Face::from_index(f.index()), Some(f));
            let sign = if f.is_positive() { 1.0 } else { -1.0 };
            assert_eq!(f.normal()[f.axis()], sign);
        }
        assert_eq!(Face::from_index(6), None);
        assert_eq!(Face::Py.normal(), [0.0, 1.0, 0.0]);
        assert_eq!(Face::Nz.key(), "nz");
    }
}
