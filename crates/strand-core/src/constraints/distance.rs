use glam::Vec3;

use super::DivisionGuard;
use crate::particle::Particle;

/// Split a scaled segment correction between two particles by weight.
///
/// `delta` is the signed relative length error (`1 - target / |r|`), so the
/// correction is `delta * r`, shared as `w0 / (w0 + w1)` and `w1 / (w0 + w1)`.
#[inline]
fn project_pair(
    guard: DivisionGuard,
    delta: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    r: Vec3,
    d0: &mut Vec3,
    d1: &mut Vec3,
) {
    let w_sum = w0 + w1;
    let w_inv = (delta * stiffness) / w_sum;
    if guard.admits(w_sum, w_inv) {
        *d0 += w0 * w_inv * r;
        *d1 -= w1 * w_inv * r;
    }
}

/// Keep `p0` and `p1` at exactly `distance` apart.
///
/// Corrections are added to `d0` and `d1`. The mass-weighted sum
/// `d0 / w0 + d1 / w1` is always zero.
#[inline]
pub fn solve_distance_constraint(
    guard: DivisionGuard,
    distance: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    p0: Vec3,
    p1: Vec3,
    d0: &mut Vec3,
    d1: &mut Vec3,
) {
    let r = p1 - p0;
    let delta = 1.0 - distance * r.length_recip();
    project_pair(guard, delta, stiffness, w0, w1, r, d0, d1);
}

/// Push `p0` and `p1` apart only while they are closer than `distance_min`.
#[inline]
pub fn solve_distance_min_constraint(
    guard: DivisionGuard,
    distance_min: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    p0: Vec3,
    p1: Vec3,
    d0: &mut Vec3,
    d1: &mut Vec3,
) {
    let r = p1 - p0;
    let delta = 1.0 - (distance_min * r.length_recip()).max(1.0);
    project_pair(guard, delta, stiffness, w0, w1, r, d0, d1);
}

/// Pull `p0` and `p1` together only while they are further than `distance_max`.
#[inline]
pub fn solve_distance_max_constraint(
    guard: DivisionGuard,
    distance_max: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    p0: Vec3,
    p1: Vec3,
    d0: &mut Vec3,
    d1: &mut Vec3,
) {
    let r = p1 - p0;
    let delta = 1.0 - (distance_max * r.length_recip()).min(1.0);
    project_pair(guard, delta, stiffness, w0, w1, r, d0, d1);
}

/// Long range attachment: tether `p1` to the anchor `p0`.
///
/// Only `p1` moves and only when it is further than `distance_max` from the
/// anchor. No stiffness and no weights are involved.
#[inline]
pub fn solve_distance_lra_constraint(distance_max: f32, p0: Vec3, p1: Vec3, d1: &mut Vec3) {
    let r = p1 - p0;
    let delta = 1.0 - (distance_max * r.length_recip()).min(1.0);
    *d1 -= delta * r;
}

/// Follow-the-leader: rescale the segment so `p1` sits exactly `distance`
/// from the leader `p0`. Only `p1` moves.
#[inline]
pub fn solve_distance_ftl_constraint(distance: f32, p0: Vec3, p1: Vec3, d1: &mut Vec3) {
    let r = p1 - p0;
    let delta = 1.0 - distance * r.length_recip();
    *d1 -= delta * r;
}

/// Distance constraint applied to `p0` and `p1` in place.
pub fn apply_distance_constraint(
    guard: DivisionGuard,
    distance: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    p0: &mut Vec3,
    p1: &mut Vec3,
) {
    let mut d0 = Vec3::ZERO;
    let mut d1 = Vec3::ZERO;
    solve_distance_constraint(guard, distance, stiffness, w0, w1, *p0, *p1, &mut d0, &mut d1);
    *p0 += d0;
    *p1 += d1;
}

/// Minimum-distance constraint applied to `p0` and `p1` in place.
pub fn apply_distance_min_constraint(
    guard: DivisionGuard,
    distance_min: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    p0: &mut Vec3,
    p1: &mut Vec3,
) {
    let mut d0 = Vec3::ZERO;
    let mut d1 = Vec3::ZERO;
    solve_distance_min_constraint(
        guard, distance_min, stiffness, w0, w1, *p0, *p1, &mut d0, &mut d1,
    );
    *p0 += d0;
    *p1 += d1;
}

/// Maximum-distance constraint applied to `p0` and `p1` in place.
pub fn apply_distance_max_constraint(
    guard: DivisionGuard,
    distance_max: f32,
    stiffness: f32,
    w0: f32,
    w1: f32,
    p0: &mut Vec3,
    p1: &mut Vec3,
) {
    let mut d0 = Vec3::ZERO;
    let mut d1 = Vec3::ZERO;
    solve_distance_max_constraint(
        guard, distance_max, stiffness, w0, w1, *p0, *p1, &mut d0, &mut d1,
    );
    *p0 += d0;
    *p1 += d1;
}

/// Long range attachment applied to `p1` in place.
pub fn apply_distance_lra_constraint(distance_max: f32, p0: Vec3, p1: &mut Vec3) {
    let mut d1 = Vec3::ZERO;
    solve_distance_lra_constraint(distance_max, p0, *p1, &mut d1);
    *p1 += d1;
}

/// Follow-the-leader applied to `p1` in place.
pub fn apply_distance_ftl_constraint(distance: f32, p0: Vec3, p1: &mut Vec3) {
    let mut d1 = Vec3::ZERO;
    solve_distance_ftl_constraint(distance, p0, *p1, &mut d1);
    *p1 += d1;
}

/// FTL that also adds the applied correction to `d1`, so the caller can
/// chain it into later passes such as velocity reconstruction.
pub fn apply_distance_ftl_constraint_accumulate(
    distance: f32,
    p0: Vec3,
    p1: &mut Vec3,
    d1: &mut Vec3,
) {
    let mut d = Vec3::ZERO;
    solve_distance_ftl_constraint(distance, p0, *p1, &mut d);
    *p1 += d;
    *d1 += d;
}

/// [`apply_distance_constraint`] with weights taken from the particles.
pub fn apply_distance_constraint_particles(
    guard: DivisionGuard,
    distance: f32,
    stiffness: f32,
    x0: &mut Particle,
    x1: &mut Particle,
) {
    apply_distance_constraint(
        guard,
        distance,
        stiffness,
        x0.weight,
        x1.weight,
        &mut x0.position,
        &mut x1.position,
    );
}

/// [`apply_distance_min_constraint`] with weights taken from the particles.
pub fn apply_distance_min_constraint_particles(
    guard: DivisionGuard,
    distance_min: f32,
    stiffness: f32,
    x0: &mut Particle,
    x1: &mut Particle,
) {
    apply_distance_min_constraint(
        guard,
        distance_min,
        stiffness,
        x0.weight,
        x1.weight,
        &mut x0.position,
        &mut x1.position,
    );
}

/// [`apply_distance_max_constraint`] with weights taken from the particles.
pub fn apply_distance_max_constraint_particles(
    guard: DivisionGuard,
    distance_max: f32,
    stiffness: f32,
    x0: &mut Particle,
    x1: &mut Particle,
) {
    apply_distance_max_constraint(
        guard,
        distance_max,
        stiffness,
        x0.weight,
        x1.weight,
        &mut x0.position,
        &mut x1.position,
    );
}

/// LRA on particles. The anchor is read-only and weights are ignored.
pub fn apply_distance_lra_constraint_particles(
    distance_max: f32,
    x0: &Particle,
    x1: &mut Particle,
) {
    apply_distance_lra_constraint(distance_max, x0.position, &mut x1.position);
}

/// FTL on particles. The leader is read-only and weights are ignored.
pub fn apply_distance_ftl_constraint_particles(distance: f32, x0: &Particle, x1: &mut Particle) {
    apply_distance_ftl_constraint(distance, x0.position, &mut x1.position);
}
