use std::f32::consts::TAU;

use cgmath::{InnerSpace, Matrix4, Rad, SquareMatrix, Transform, Vector3, Vector4};
use lattice_backdrop::camera::Projection;
use lattice_backdrop::data_structures::instance::Instance;
use lattice_backdrop::geometry::lattice::bcc_offsets;
use lattice_backdrop::spin::Spin;
use lattice_backdrop::Backdrop;

#[test]
fn spin_accumulates_fixed_angles_per_frame() {
    let backdrop = Backdrop::default();
    let mut spin = Spin::new();
    let frames = 1000;
    for _ in 0..frames {
        spin.advance(backdrop.yaw_rate, backdrop.pitch_rate);
    }
    let expected_yaw = (frames as f32 * backdrop.yaw_rate) % TAU;
    let expected_pitch = (frames as f32 * backdrop.pitch_rate) % TAU;
    assert!((spin.yaw - expected_yaw).abs() < 1e-3);
    assert!((spin.pitch - expected_pitch).abs() < 1e-3);
}

#[test]
fn spin_wraps_into_one_turn() {
    let mut spin = Spin::new();
    for _ in 0..10_000 {
        spin.advance(0.002, 0.001);
    }
    assert!(spin.yaw >= 0.0 && spin.yaw < TAU);
    assert!(spin.pitch >= 0.0 && spin.pitch < TAU);
}

#[test]
fn spin_matrix_is_identity_at_rest() {
    assert_eq!(Spin::new().to_matrix(), Matrix4::identity());
}

#[test]
fn spin_matrix_applies_yaw_before_pitch() {
    let spin = Spin {
        yaw: 0.3,
        pitch: 0.7,
    };
    let expected = Matrix4::from_angle_x(Rad(0.7)) * Matrix4::from_angle_y(Rad(0.3));
    let difference = spin.to_matrix() - expected;
    for column in 0..4 {
        assert!(Vector4::from(difference[column]).magnitude() < 1e-6);
    }
}

#[test]
fn projection_aspect_follows_viewport() {
    let mut projection = Projection::new(800, 600, cgmath::Deg(60.0), 0.1, 1000.0);
    assert!((projection.aspect() - 800.0 / 600.0).abs() < 1e-6);

    projection.resize(1600, 900);
    assert!((projection.aspect() - 1600.0 / 900.0).abs() < 1e-6);
}

#[test]
fn instances_are_pure_translations_of_their_offsets() {
    let offsets = bcc_offsets(1);
    let instances: Vec<Instance> = offsets.iter().copied().map(Instance::from).collect();
    assert_eq!(instances.len(), offsets.len());

    for (instance, offset) in instances.iter().zip(&offsets) {
        let matrix = instance.to_matrix();
        // A pure translation maps the origin to the offset and keeps
        // directions unchanged.
        assert_eq!(matrix.transform_point([0.0, 0.0, 0.0].into()), {
            let v: Vector3<f32> = *offset;
            cgmath::Point3::new(v.x, v.y, v.z)
        });
        assert_eq!(
            matrix.transform_vector(Vector3::unit_x()),
            Vector3::unit_x()
        );
    }
}

#[test]
fn stock_backdrop_matches_the_original_scene() {
    let backdrop = Backdrop::default();
    assert_eq!(backdrop.grid, 2);
    assert_eq!(backdrop.fovy_deg, 60.0);
    assert_eq!(backdrop.znear, 0.1);
    assert_eq!(backdrop.zfar, 1000.0);
    assert_eq!(backdrop.yaw_rate, 0.002);
    assert_eq!(backdrop.pitch_rate, 0.001);
    assert_eq!(backdrop.roughness, 0.6);
    assert_eq!(backdrop.metalness, 0.1);
    assert_eq!(backdrop.frame_budget, None);
    assert_eq!(bcc_offsets(backdrop.grid).len(), 250);
}
