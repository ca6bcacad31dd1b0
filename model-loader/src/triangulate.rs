// fan triangulation: every triangle shares corner 0
// only right for convex planar polygons, which is what exporters give us in practice
pub fn fan(corner_count: usize) -> impl Iterator<Item = [usize; 3]> {
    (0..corner_count.saturating_sub(2)).map(|i| [0, i + 1, i + 2])
}

/// Swap the last two corners of every triangle, turning front faces into back faces.
pub fn flip_winding(indices: &mut [u32]) {
    for triangle in indices.chunks_exact_mut(3) {
        triangle.swap(1, 2);
    }
}
