use glam::{Quat, Vec3};
use strand_core::quaternion::*;

const EPS: f32 = 1e-5;

fn sample_directions() -> Vec<Vec3> {
    vec![
        Vec3::X,
        Vec3::Y,
        Vec3::Z,
        -Vec3::X,
        Vec3::new(1.0, 1.0, 0.0).normalize(),
        Vec3::new(-0.3, 0.8, 0.52).normalize(),
        Vec3::new(0.0, -0.1, 1.0).normalize(),
    ]
}

#[test]
fn test_identity_is_scalar_last() {
    let q = identity();
    assert_eq!((q.x, q.y, q.z, q.w), (0.0, 0.0, 0.0, 1.0));
    assert_eq!(rotate(q, Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_from_to_same_direction_is_identity() {
    for u in sample_directions() {
        let q = from_to(u, u);
        assert!(q.abs_diff_eq(identity(), EPS), "from_to({:?}, itself) = {:?}", u, q);
    }
}

#[test]
fn test_from_to_opposite_is_half_turn() {
    for u in sample_directions() {
        let q = from_to(u, -u);
        assert!((q.length() - 1.0).abs() < EPS, "not unit: {:?}", q);
        assert_eq!(q.w, 0.0, "scalar part must be zero");
        let axis = Vec3::new(q.x, q.y, q.z);
        assert!(axis.dot(u).abs() < EPS, "axis {:?} not perpendicular to {:?}", axis, u);
        assert!(rotate(q, u).abs_diff_eq(-u, EPS));
    }
}

#[test]
fn test_from_to_maps_u_onto_v() {
    let dirs = sample_directions();
    for &u in &dirs {
        for &v in &dirs {
            let q = from_to(u, v);
            assert!((q.length() - 1.0).abs() < EPS, "not unit: {:?}", q);
            let mapped = rotate(q, u);
            assert!(mapped.abs_diff_eq(v, 1e-4), "{:?} -> {:?} gave {:?}", u, v, mapped);
        }
    }
}

#[test]
fn test_from_bend_right_angle() {
    let q = from_bend(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.0, 0.5, 0.0));
    let expected = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
    assert!(q.abs_diff_eq(expected, EPS), "got {:?}", q);
}

#[test]
fn test_from_bend_straight_strand_is_identity() {
    let q = from_bend(
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
    );
    assert!(q.abs_diff_eq(identity(), EPS));
}

#[test]
fn test_conjugate_negates_vector_part() {
    let q = Quat::from_xyzw(0.1, -0.2, 0.3, 0.9);
    let c = conjugate(q);
    assert_eq!((c.x, c.y, c.z, c.w), (-0.1, 0.2, -0.3, 0.9));
}

#[test]
fn test_inverse_composes_to_identity() {
    let unit = from_to(Vec3::X, Vec3::new(0.2, 0.7, -0.4).normalize());
    assert!(multiply(inverse(unit), unit).abs_diff_eq(identity(), EPS));
    assert!(multiply(unit, inverse(unit)).abs_diff_eq(identity(), EPS));

    let scaled = Quat::from_xyzw(1.0, 2.0, 3.0, 4.0);
    assert!(multiply(scaled, inverse(scaled)).abs_diff_eq(identity(), EPS));
}

#[test]
fn test_rotate_composition() {
    let q1 = from_to(Vec3::X, Vec3::Y);
    let q2 = from_bend(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.3, 0.2, 1.5));
    for v in sample_directions() {
        let v = v * 2.5;
        let composed = rotate(multiply(q1, q2), v);
        let chained = rotate(q1, rotate(q2, v));
        assert!(composed.abs_diff_eq(chained, 1e-4), "{:?} vs {:?}", composed, chained);
    }
}

#[test]
fn test_rotate_preserves_length() {
    let q = from_to(Vec3::new(0.6, 0.0, 0.8), Vec3::new(0.0, -0.6, 0.8));
    let v = Vec3::new(3.0, -1.0, 2.0);
    assert!((rotate(q, v).length() - v.length()).abs() < 1e-4);
}

#[test]
fn test_multiply_is_hamilton_product() {
    let i = Quat::from_xyzw(1.0, 0.0, 0.0, 0.0);
    let j = Quat::from_xyzw(0.0, 1.0, 0.0, 0.0);
    let k = Quat::from_xyzw(0.0, 0.0, 1.0, 0.0);
    assert!(multiply(i, j).abs_diff_eq(k, EPS), "ij = k");
    assert!(multiply(j, i).abs_diff_eq(-k, EPS), "ji = -k");
    assert!(multiply(k, k).abs_diff_eq(-identity(), EPS), "kk = -1");
}

#[test]
fn test_rotate_and_inverse_match_glam() {
    let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, -0.5).normalize(), 0.83);
    let v = Vec3::new(0.3, -1.2, 2.0);
    assert!(rotate(q, v).abs_diff_eq(q * v, 1e-5));
    assert!(inverse(q).abs_diff_eq(q.inverse(), 1e-6));
}
