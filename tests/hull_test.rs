use std::collections::HashMap;

use cgmath::{InnerSpace, Vector3};
use lattice_backdrop::geometry::hull::{FacetedMesh, Hull, HullError};
use lattice_backdrop::geometry::truncated_octahedron_points;

/// Count how often each undirected edge is used by the hull triangles.
fn edge_uses(hull: &Hull) -> HashMap<(usize, usize), usize> {
    let mut uses = HashMap::new();
    for &[a, b, c] in hull.triangles() {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            let key = (u.min(v), u.max(v));
            *uses.entry(key).or_insert(0) += 1;
        }
    }
    uses
}

/// Six times the signed volume enclosed by the triangles; positive when the
/// winding is outward around an origin-containing solid.
fn six_volume(hull: &Hull) -> f64 {
    let points = hull.points();
    hull.triangles()
        .iter()
        .map(|&[a, b, c]| points[a].dot(points[b].cross(points[c])))
        .sum()
}

fn tetrahedron() -> Vec<Vector3<f64>> {
    vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    ]
}

fn cube() -> Vec<Vector3<f64>> {
    let mut points = Vec::new();
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                points.push(Vector3::new(x, y, z));
            }
        }
    }
    points
}

#[test]
fn rejects_too_few_points() {
    let points = tetrahedron();
    assert_eq!(
        Hull::from_points(&points[..3]),
        Err(HullError::TooFewPoints(3))
    );
}

#[test]
fn rejects_coplanar_points() {
    let points = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(0.5, 0.5, 0.0),
    ];
    assert_eq!(Hull::from_points(&points), Err(HullError::Degenerate));
}

#[test]
fn rejects_collinear_points() {
    let points: Vec<_> = (0..6)
        .map(|i| Vector3::new(i as f64, 2.0 * i as f64, 0.0))
        .collect();
    assert_eq!(Hull::from_points(&points), Err(HullError::Degenerate));
}

#[test]
fn tetrahedron_hull_is_its_four_faces() {
    let hull = Hull::from_points(&tetrahedron()).unwrap();
    assert_eq!(hull.triangles().len(), 4);
    assert!(edge_uses(&hull).values().all(|&n| n == 2));
}

#[test]
fn cube_hull_triangulates_to_twelve_faces() {
    let hull = Hull::from_points(&cube()).unwrap();
    // Any triangulation of a convex polytope surface with V vertices has
    // 2V - 4 triangles.
    assert_eq!(hull.triangles().len(), 12);
    assert_eq!(hull.vertex_indices().len(), 8);
    assert!(edge_uses(&hull).values().all(|&n| n == 2));
}

#[test]
fn interior_points_are_dropped() {
    let mut points = cube();
    points.push(Vector3::new(0.0, 0.0, 0.0));
    points.push(Vector3::new(0.2, -0.3, 0.4));
    let hull = Hull::from_points(&points).unwrap();
    assert_eq!(hull.triangles().len(), 12);
    assert_eq!(hull.vertex_indices().len(), 8);
    assert!(!hull.vertex_indices().contains(&8));
    assert!(!hull.vertex_indices().contains(&9));
}

#[test]
fn truncated_octahedron_hull_is_a_closed_manifold() {
    let hull = Hull::from_points(&truncated_octahedron_points()).unwrap();
    // 24 vertices on the hull: 2*24 - 4 triangles, 3*24 - 6 edges.
    assert_eq!(hull.triangles().len(), 44);
    let uses = edge_uses(&hull);
    assert_eq!(uses.len(), 66);
    assert!(uses.values().all(|&n| n == 2), "open or non-manifold edge");
}

#[test]
fn truncated_octahedron_uses_all_input_points() {
    let hull = Hull::from_points(&truncated_octahedron_points()).unwrap();
    assert_eq!(hull.vertex_indices(), (0..24).collect::<Vec<_>>());
}

#[test]
fn winding_is_outward_and_contains_every_point() {
    let points = truncated_octahedron_points();
    let hull = Hull::from_points(&points).unwrap();
    assert!(six_volume(&hull) > 0.0);

    for &[a, b, c] in hull.triangles() {
        let normal = (points[b] - points[a]).cross(points[c] - points[a]);
        for p in &points {
            let distance = normal.normalize().dot(p - points[a]);
            assert!(distance <= 1e-9, "point {:?} above a hull face", p);
        }
    }
}

#[test]
fn construction_is_deterministic() {
    let points = truncated_octahedron_points();
    assert_eq!(
        Hull::from_points(&points).unwrap(),
        Hull::from_points(&points).unwrap()
    );
}

#[test]
fn faceted_mesh_expands_three_vertices_per_triangle() {
    let hull = Hull::from_points(&truncated_octahedron_points()).unwrap();
    let mesh = FacetedMesh::from_hull(&hull);
    assert_eq!(mesh.positions.len(), 44 * 3);
    assert_eq!(mesh.normals.len(), 44 * 3);
    assert_eq!(mesh.indices.len(), 44 * 3);
    assert_eq!(mesh.indices, (0..132).collect::<Vec<u32>>());
}

#[test]
fn faceted_mesh_normals_are_unit_face_normals() {
    let hull = Hull::from_points(&truncated_octahedron_points()).unwrap();
    let mesh = FacetedMesh::from_hull(&hull);

    for triangle in 0..mesh.positions.len() / 3 {
        let v = |i: usize| Vector3::<f32>::from(mesh.positions[triangle * 3 + i]);
        let expected = (v(1) - v(0)).cross(v(2) - v(0)).normalize();
        for i in 0..3 {
            let normal = Vector3::from(mesh.normals[triangle * 3 + i]);
            assert!((normal.magnitude() - 1.0).abs() < 1e-5);
            assert!((normal - expected).magnitude() < 1e-5);
        }
    }
}
