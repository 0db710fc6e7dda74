pub use tessel_blocks::types::Face;

/// Plane layout used when sweeping one face direction.
///
/// `axis` is the sweep axis; `u` and `v` span the slice plane and are chosen so
/// that `u x v` points along the positive axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FaceAxes {
    pub axis: usize,
    pub u: usize,
    pub v: usize,
}

#[inline]
pub fn face_axes(face: Face) -> FaceAxes {
    match face.axis() {
        0 => FaceAxes { axis: 0, u: 1, v: 2 },
        1 => FaceAxes { axis: 1, u: 2, v: 0 },
        _ => FaceAxes { axis: 2, u: 0, v: 1 },
    }
}
