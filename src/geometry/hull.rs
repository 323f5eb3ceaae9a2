//! Incremental convex hull over a 3D point cloud.
//!
//! The hull is seeded with a tetrahedron of extreme points; every remaining
//! point is then inserted by removing the faces it can see and fanning new
//! triangles over the horizon edge loop. Face winding is counter-clockwise
//! seen from outside, so cross products of triangle edges give outward
//! normals directly.
//!
//! The construction is deterministic: the same input sequence always yields
//! the same triangle sequence.

use std::collections::HashSet;
use std::fmt;

use cgmath::{InnerSpace, Vector3};

const EPSILON: f64 = 1e-9;

/// Errors for point sets that don't span a 3D volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HullError {
    /// Fewer than the four points needed for a tetrahedron.
    TooFewPoints(usize),
    /// All points collinear or coplanar.
    Degenerate,
}

impl fmt::Display for HullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints(n) => {
                write!(f, "convex hull needs at least 4 points, got {}", n)
            }
            Self::Degenerate => {
                write!(f, "input points are collinear or coplanar")
            }
        }
    }
}

impl std::error::Error for HullError {}

/// A closed triangulated convex surface over a set of input points.
///
/// Triangles index into the original point slice. Points that end up inside
/// the hull are kept in `points` but referenced by no triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Hull {
    points: Vec<Vector3<f64>>,
    triangles: Vec<[usize; 3]>,
}

impl Hull {
    /// Compute the convex hull of `points`.
    pub fn from_points(points: &[Vector3<f64>]) -> Result<Self, HullError> {
        if points.len() < 4 {
            return Err(HullError::TooFewPoints(points.len()));
        }

        let seed = initial_tetrahedron(points)?;
        let mut triangles = seed_faces(points, seed);

        for (i, &p) in points.iter().enumerate() {
            if seed.contains(&i) {
                continue;
            }
            insert_point(points, &mut triangles, i, p);
        }

        Ok(Self {
            points: points.to_vec(),
            triangles,
        })
    }

    /// The input points the triangle indices refer to.
    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    /// Hull triangles, counter-clockwise seen from outside.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Sorted indices of the input points that lie on the hull surface.
    pub fn vertex_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .triangles
            .iter()
            .flatten()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        indices.sort_unstable();
        indices
    }
}

/// Flat-shaded vertex data expanded from a hull.
///
/// Corner vertices are duplicated per triangle so each face carries its own
/// normal, which is what gives the faceted look. Indices are sequential but
/// kept so the GPU upload path is the same as for shared-vertex meshes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FacetedMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl FacetedMesh {
    pub fn from_hull(hull: &Hull) -> Self {
        let points = hull.points();
        let mut positions = Vec::with_capacity(hull.triangles().len() * 3);
        let mut normals = Vec::with_capacity(hull.triangles().len() * 3);

        for tri in hull.triangles() {
            let normal = face_normal(points, *tri).normalize();
            let normal = [normal.x as f32, normal.y as f32, normal.z as f32];
            for &idx in tri {
                let p = points[idx];
                positions.push([p.x as f32, p.y as f32, p.z as f32]);
                normals.push(normal);
            }
        }

        let indices = (0..positions.len() as u32).collect();
        Self {
            positions,
            normals,
            indices,
        }
    }
}

fn face_normal(points: &[Vector3<f64>], [a, b, c]: [usize; 3]) -> Vector3<f64> {
    (points[b] - points[a]).cross(points[c] - points[a])
}

/// Distance of `p` above the face plane; positive means the face sees `p`.
fn signed_distance(points: &[Vector3<f64>], tri: [usize; 3], p: Vector3<f64>) -> f64 {
    let normal = face_normal(points, tri);
    let magnitude = normal.magnitude();
    if magnitude < EPSILON {
        return 0.0;
    }
    normal.dot(p - points[tri[0]]) / magnitude
}

/// Pick four points spanning a non-degenerate tetrahedron: an extreme point,
/// the point farthest from it, the point farthest from that line, and the
/// point farthest from that plane.
fn initial_tetrahedron(points: &[Vector3<f64>]) -> Result<[usize; 4], HullError> {
    let mut i0 = 0;
    for (i, p) in points.iter().enumerate() {
        if p.x < points[i0].x {
            i0 = i;
        }
    }

    let mut i1 = i0;
    let mut best = 0.0;
    for (i, p) in points.iter().enumerate() {
        let d = (p - points[i0]).magnitude2();
        if d > best {
            best = d;
            i1 = i;
        }
    }
    if best < EPSILON * EPSILON {
        return Err(HullError::Degenerate);
    }

    let line = points[i1] - points[i0];
    let mut i2 = i0;
    best = 0.0;
    for (i, p) in points.iter().enumerate() {
        let d = line.cross(p - points[i0]).magnitude2();
        if d > best {
            best = d;
            i2 = i;
        }
    }
    if best < EPSILON * EPSILON {
        return Err(HullError::Degenerate);
    }

    let mut i3 = i0;
    best = 0.0;
    for (i, p) in points.iter().enumerate() {
        let d = signed_distance(points, [i0, i1, i2], *p).abs();
        if d > best {
            best = d;
            i3 = i;
        }
    }
    if best < EPSILON {
        return Err(HullError::Degenerate);
    }

    Ok([i0, i1, i2, i3])
}

/// The four outward-oriented faces of the seed tetrahedron.
fn seed_faces(points: &[Vector3<f64>], [i0, i1, i2, i3]: [usize; 4]) -> Vec<[usize; 3]> {
    [
        ([i0, i1, i2], i3),
        ([i0, i1, i3], i2),
        ([i0, i2, i3], i1),
        ([i1, i2, i3], i0),
    ]
    .into_iter()
    .map(|(face, opposite)| orient_outward(points, face, opposite))
    .collect()
}

/// Flip the face winding if the opposite tetrahedron corner is above it.
fn orient_outward(
    points: &[Vector3<f64>],
    [a, b, c]: [usize; 3],
    opposite: usize,
) -> [usize; 3] {
    if signed_distance(points, [a, b, c], points[opposite]) > 0.0 {
        [a, c, b]
    } else {
        [a, b, c]
    }
}

/// Fold one point into the hull: drop every face that sees it and fan new
/// triangles from the point over the horizon loop. Points inside the current
/// hull (no face sees them) are skipped.
fn insert_point(
    points: &[Vector3<f64>],
    triangles: &mut Vec<[usize; 3]>,
    index: usize,
    p: Vector3<f64>,
) {
    let visible: Vec<usize> = triangles
        .iter()
        .enumerate()
        .filter(|(_, tri)| signed_distance(points, **tri, p) > EPSILON)
        .map(|(fi, _)| fi)
        .collect();
    if visible.is_empty() {
        return;
    }

    let mut region_edges: HashSet<(usize, usize)> = HashSet::new();
    for &fi in &visible {
        let [a, b, c] = triangles[fi];
        for edge in [(a, b), (b, c), (c, a)] {
            region_edges.insert(edge);
        }
    }

    // A directed edge whose reverse belongs to a hidden neighbour is on the
    // horizon. Walking the visible faces in order keeps the result
    // deterministic; winding carries over to the new fan triangles.
    let mut horizon: Vec<(usize, usize)> = Vec::new();
    for &fi in &visible {
        let [a, b, c] = triangles[fi];
        for (u, v) in [(a, b), (b, c), (c, a)] {
            if !region_edges.contains(&(v, u)) {
                horizon.push((u, v));
            }
        }
    }

    let visible_set: HashSet<usize> = visible.into_iter().collect();
    let mut next = Vec::with_capacity(triangles.len() - visible_set.len() + horizon.len());
    for (fi, tri) in triangles.iter().enumerate() {
        if !visible_set.contains(&fi) {
            next.push(*tri);
        }
    }
    for (u, v) in horizon {
        next.push([u, v, index]);
    }
    *triangles = next;
}
