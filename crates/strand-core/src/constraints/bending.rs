use glam::Vec3;

use super::DivisionGuard;
use crate::particle::Particle;

/// Bending resistance of three consecutive strand particles.
///
/// The particles span a virtual triangle; the constraint acts on the
/// distance from the middle particle `p1` to the centroid of the triangle:
///
/// ```text
///        p1
///        |  r = p1 - c
///        c
///   p0 ------- p2
/// ```
///
/// `p1` carries twice the gradient of the outer particles, hence the
/// `w0 + 2 * w1 + w2` denominator.
#[inline]
fn project_triangle(
    guard: DivisionGuard,
    delta: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    w2: f32,
    r: Vec3,
    d0: &mut Vec3,
    d1: &mut Vec3,
    d2: &mut Vec3,
) {
    let w_sum = w0 + 2.0 * w1 + w2;
    let w_inv = (2.0 * delta * stiffness) / w_sum;
    if guard.admits(w_sum, w_inv) {
        *d0 += w0 * w_inv * r;
        *d1 -= 2.0 * w1 * w_inv * r;
        *d2 += w2 * w_inv * r;
    }
}

#[inline]
fn centroid_offset(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    let c = (p0 + p1 + p2) / 3.0;
    p1 - c
}

/// Keep `p1` at exactly `radius` from the centroid of `p0, p1, p2`.
///
/// A straight, evenly spaced triple puts `p1` on the centroid, so a rest
/// `radius` of 0 evaluates `0 * inf` and yields NaN deltas unless the guard
/// is on, in which case the correction is skipped.
#[inline]
pub fn solve_triangle_bending_constraint(
    guard: DivisionGuard,
    radius: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    w2: f32,
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
    d0: &mut Vec3,
    d1: &mut Vec3,
    d2: &mut Vec3,
) {
    let r = centroid_offset(p0, p1, p2);
    let delta = 1.0 - radius * r.length_recip();
    project_triangle(guard, delta, stiffness, w0, w1, w2, r, d0, d1, d2);
}

/// Active only while `p1` is closer than `radius_min` to the centroid.
#[inline]
pub fn solve_triangle_bending_min_constraint(
    guard: DivisionGuard,
    radius_min: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    w2: f32,
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
    d0: &mut Vec3,
    d1: &mut Vec3,
    d2: &mut Vec3,
) {
    let r = centroid_offset(p0, p1, p2);
    let delta = 1.0 - (radius_min * r.length_recip()).max(1.0);
    project_triangle(guard, delta, stiffness, w0, w1, w2, r, d0, d1, d2);
}

/// Active only while `p1` is further than `radius_max` from the centroid.
#[inline]
pub fn solve_triangle_bending_max_constraint(
    guard: DivisionGuard,
    radius_max: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    w2: f32,
    p0: Vec3,
    p1: Vec3,
    p2: Vec3,
    d0: &mut Vec3,
    d1: &mut Vec3,
    d2: &mut Vec3,
) {
    let r = centroid_offset(p0, p1, p2);
    let delta = 1.0 - (radius_max * r.length_recip()).min(1.0);
    project_triangle(guard, delta, stiffness, w0, w1, w2, r, d0, d1, d2);
}

/// Triangle bending constraint applied to `p0`, `p1` and `p2` in place.
pub fn apply_triangle_bending_constraint(
    guard: DivisionGuard,
    radius: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    w2: f32,
    p0: &mut Vec3,
    p1: &mut Vec3,
    p2: &mut Vec3,
) {
    let (mut d0, mut d1, mut d2) = (Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    solve_triangle_bending_constraint(
        guard, radius, stiffness, w0, w1, w2, *p0, *p1, *p2, &mut d0, &mut d1, &mut d2,
    );
    *p0 += d0;
    *p1 += d1;
    *p2 += d2;
}

/// Minimum-radius bending constraint applied in place.
pub fn apply_triangle_bending_min_constraint(
    guard: DivisionGuard,
    radius_min: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    w2: f32,
    p0: &mut Vec3,
    p1: &mut Vec3,
    p2: &mut Vec3,
) {
    let (mut d0, mut d1, mut d2) = (Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    solve_triangle_bending_min_constraint(
        guard, radius_min, stiffness, w0, w1, w2, *p0, *p1, *p2, &mut d0, &mut d1, &mut d2,
    );
    *p0 += d0;
    *p1 += d1;
    *p2 += d2;
}

/// Maximum-radius bending constraint applied in place.
pub fn apply_triangle_bending_max_constraint(
    guard: DivisionGuard,
    radius_max: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    w2: f32,
    p0: &mut Vec3,
    p1: &mut Vec3,
    p2: &mut Vec3,
) {
    let (mut d0, mut d1, mut d2) = (Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
    solve_triangle_bending_max_constraint(
        guard, radius_max, stiffness, w0, w1, w2, *p0, *p1, *p2, &mut d0, &mut d1, &mut d2,
    );
    *p0 += d0;
    *p1 += d1;
    *p2 += d2;
}

/// [`apply_triangle_bending_constraint`] with weights taken from the particles.
pub fn apply_triangle_bending_constraint_particles(
    guard: DivisionGuard,
    radius: f32,
    stiffness: f32,
    x0: &mut Particle,
    x1: &mut Particle,
    x2: &mut Particle,
) {
    apply_triangle_bending_constraint(
        guard,
        radius,
        stiffness,
        x0.weight,
        x1.weight,
        x2.weight,
        &mut x0.position,
        &mut x1.position,
        &mut x2.position,
    );
}

/// [`apply_triangle_bending_min_constraint`] with weights taken from the particles.
pub fn apply_triangle_bending_min_constraint_particles(
    guard: DivisionGuard,
    radius_min: f32,
    stiffness: f32,
    x0: &mut Particle,
    x1: &mut Particle,
    x2: &mut Particle,
) {
    apply_triangle_bending_min_constraint(
        guard,
        radius_min,
        stiffness,
        x0.weight,
        x1.weight,
        x2.weight,
        &mut x0.position,
        &mut x1.position,
        &mut x2.position,
    );
}

/// [`apply_triangle_bending_max_constraint`] with weights taken from the particles.
pub fn apply_triangle_bending_max_constraint_particles(
    guard: DivisionGuard,
    radius_max: f32,
    stiffness: f32,
    x0: &mut Particle,
    x1: &mut Particle,
    x2: &mut Particle,
) {
    apply_triangle_bending_max_constraint(
        guard,
        radius_max,
        stiffness,
        x0.weight,
        x1.weight,
        x2.weight,
        &mut x0.position,
        &mut x1.position,
        &mut x2.position,
    );
}
