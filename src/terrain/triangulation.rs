//! Grid triangulation

/// Number of samples along one row (cells + 1).
#[inline]
pub fn row_len(width: u32) -> usize {
    width as usize + 1
}

/// Total sample count for a grid of `width` x `height` cells, or `None` if
/// the largest sample index would not fit in a `u32` triangle index.
pub fn checked_sample_count(width: u32, height: u32) -> Option<usize> {
    let count = (width as u64 + 1).checked_mul(height as u64 + 1)?;
    if count - 1 > u32::MAX as u64 {
        return None;
    }
    usize::try_from(count).ok()
}

/// Total sample count for a grid of `width` x `height` cells.
///
/// # Panics
///
/// Panics if the dimensions fail [`checked_sample_count`]. Dimensions read
/// from files or configuration are checked before they reach a grid.
#[inline]
pub fn sample_count(width: u32, height: u32) -> usize {
    match checked_sample_count(width, height) {
        Some(count) => count,
        None => panic!("{}x{} grid exceeds the u32 index range", width, height),
    }
}

/// Build the index list for a `width` x `height` cell grid.
///
/// Each cell `(x, y)` with base vertex `v = x + y * (width + 1)` yields the
/// triangles `(v, v + W + 1, v + 1)` and `(v + 1, v + W + 1, v + W + 2)`.
/// Both wind the same way, so face normals of a flat grid point up (+Y).
pub fn triangulate(width: u32, height: u32) -> Vec<u32> {
    let w = width;
    let mut indices = Vec::with_capacity(width as usize * height as usize * 6);

    for y in 0..height {
        for x in 0..width {
            let v = x + y * (w + 1);
            indices.extend_from_slice(&[
                v,
                v + w + 1,
                v + 1,
                v + 1,
                v + w + 1,
                v + w + 2,
            ]);
        }
    }

    indices
}
