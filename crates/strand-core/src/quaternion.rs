//! Minimal rotation algebra for tracking strand frames.
//!
//! Quaternions are `glam::Quat`, stored `(x, y, z, w)` with the scalar last.

use glam::{Quat, Vec3};

/// Below this value of `1 + dot(u, v)` the inputs count as opposite.
const ANTIPARALLEL_EPSILON: f32 = 1e-6;

#[inline]
pub fn identity() -> Quat {
    Quat::IDENTITY
}

/// Shortest-arc rotation taking unit vector `u` onto unit vector `v`.
///
/// For (nearly) opposite inputs the rotation axis is any vector
/// perpendicular to `u`, chosen from its two largest components so it
/// cannot vanish, and the scalar part is zero (a half turn).
#[inline]
pub fn from_to(u: Vec3, v: Vec3) -> Quat {
    let s = 1.0 + u.dot(v);
    let q = if s < ANTIPARALLEL_EPSILON {
        let axis = if u.x.abs() > u.z.abs() {
            Vec3::new(-u.y, u.x, 0.0)
        } else {
            Vec3::new(0.0, -u.z, u.y)
        };
        Quat::from_xyzw(axis.x, axis.y, axis.z, 0.0)
    } else {
        let axis = u.cross(v);
        Quat::from_xyzw(axis.x, axis.y, axis.z, s)
    };
    q.normalize()
}

/// Rotation from segment `p0 -> p1` to segment `p1 -> p2`, i.e. the bend
/// at joint `p1`.
#[inline]
pub fn from_bend(p0: Vec3, p1: Vec3, p2: Vec3) -> Quat {
    let u = (p1 - p0).normalize();
    let v = (p2 - p1).normalize();
    from_to(u, v)
}

#[inline]
pub fn conjugate(q: Quat) -> Quat {
    q.conjugate()
}

/// Conjugate over squared norm; equals the conjugate for unit quaternions.
#[inline]
pub fn inverse(q: Quat) -> Quat {
    let c = conjugate(q);
    let n = q.length_squared();
    Quat::from_xyzw(c.x / n, c.y / n, c.z / n, c.w / n)
}

/// Hamilton product `a * b`: applying the result rotates by `b` first.
#[inline]
pub fn multiply(a: Quat, b: Quat) -> Quat {
    a * b
}

/// Rotate `v` by unit quaternion `q` using `v + 2w(u x v) + 2u x (u x v)`.
#[inline]
pub fn rotate(q: Quat, v: Vec3) -> Vec3 {
    let u = Vec3::new(q.x, q.y, q.z);
    let t = 2.0 * u.cross(v);
    v + q.w * t + u.cross(t)
}

