//! Rectangle merging over a single slice mask.

/// Covers every `Some` cell of a row-major `width x height` mask with maximal
/// rectangles of equal value and calls `emit(u, v, w, h, value)` per rectangle.
///
/// Scans rows in order, grows each rectangle along `u` first and then along
/// `v` while the whole next row matches. Covered cells are set to `None`, so the
/// mask is empty on return.
pub fn greedy_rects<K: Copy + Eq>(
    width: usize,
    height: usize,
    mask: &mut [Option<K>],
    mut emit: impl FnMut(usize, usize, usize, usize, K),
) {
    debug_assert_eq!(mask.len(), width * height);
    for v in 0..height {
        let mut u = 0;
        while u < width {
            let Some(code) = mask[v * width + u] else {
                u += 1;
                continue;
            };
            let mut w = 1;
            while u + w < width && mask[v * width + u + w] == Some(code) {
                w += 1;
            }
            let mut h = 1;
            'expand: while v + h < height {
                let row = (v + h) * width;
                for i in 0..w {
                    if mask[row + u + i] != Some(code) {
                        break 'expand;
                    }
                }
                h += 1;
            }
            emit(u, v, w, h, code);
            for vv in 0..h {
                let row = (v + vv) * width;
                mask[row + u..row + u + w].fill(None);
            }
            u += w;
        }
    }
}
