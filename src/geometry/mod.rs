//! Lattice geometry: the base solid, convex hull construction and BCC placement.
//!
//! - `hull` derives a closed triangulated surface from a point cloud
//! - `lattice` produces the body-centered-cubic offset sequence
//!
//! The base solid is a truncated octahedron given as 24 surface points. The
//! rendered mesh is always regenerated from these points through the hull
//! builder, so no explicit face index table is kept.

use cgmath::Vector3;

pub mod hull;
pub mod lattice;

/// The 24 surface points of a truncated octahedron centered at the origin:
/// all permutations of (0, ±1, ±2). The circumscribing extent is ~2 units
/// along each axis, which matches the 4-unit lattice spacing for
/// non-overlapping close packing.
const TRUNCATED_OCTAHEDRON: [[f64; 3]; 24] = [
    [2.0, 0.0, 1.0],
    [2.0, 0.0, -1.0],
    [-2.0, 0.0, 1.0],
    [-2.0, 0.0, -1.0],
    [1.0, 2.0, 0.0],
    [-1.0, 2.0, 0.0],
    [1.0, -2.0, 0.0],
    [-1.0, -2.0, 0.0],
    [0.0, 1.0, 2.0],
    [0.0, -1.0, 2.0],
    [0.0, 1.0, -2.0],
    [0.0, -1.0, -2.0],
    [1.0, 0.0, 2.0],
    [-1.0, 0.0, 2.0],
    [1.0, 0.0, -2.0],
    [-1.0, 0.0, -2.0],
    [0.0, 2.0, 1.0],
    [0.0, 2.0, -1.0],
    [0.0, -2.0, 1.0],
    [0.0, -2.0, -1.0],
    [2.0, 1.0, 0.0],
    [2.0, -1.0, 0.0],
    [-2.0, 1.0, 0.0],
    [-2.0, -1.0, 0.0],
];

/// The base solid's vertex set in a form the hull builder consumes.
pub fn truncated_octahedron_points() -> Vec<Vector3<f64>> {
    TRUNCATED_OCTAHEDRON
        .iter()
        .map(|&[x, y, z]| Vector3::new(x, y, z))
        .collect()
}
