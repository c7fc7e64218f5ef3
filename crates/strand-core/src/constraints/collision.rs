use glam::{Mat4, Vec3, Vec4};

use crate::particle::Particle;

/// Contact query against the boundary shapes of the scene.
///
/// Returns `(normal.xyz, depth)` such that adding `normal * depth` to the
/// queried position resolves the penetration. A query reports zero depth when
/// the position is not penetrating; a negative depth means the position lies
/// inside a boundary.
pub trait BoundaryContact {
    fn contact(&self, p: Vec3) -> Vec4;
}

impl<F> BoundaryContact for F
where
    F: Fn(Vec3) -> Vec4,
{
    #[inline]
    fn contact(&self, p: Vec3) -> Vec4 {
        self(p)
    }
}

/// Contact query that also identifies the boundary it hit, so the solver can
/// look up how that boundary moved since the previous step.
///
/// Every tagged query is also a plain [`BoundaryContact`], so one boundary
/// provider serves both the frictionless and the frictional constraints.
pub trait TaggedBoundaryContact: BoundaryContact {
    /// Same contract as [`BoundaryContact::contact`], plus the boundary index.
    fn contact_tagged(&self, p: Vec3) -> (Vec4, usize);

    /// Transform taking a world position on boundary `index` to where that
    /// point was in world space at the start of the step.
    fn world_to_prev_world(&self, index: usize) -> Mat4;
}

/// Remove penetration exactly; there is no stiffness.
#[inline]
pub fn solve_collision_constraint<Q>(query: &Q, p: Vec3, d: &mut Vec3)
where
    Q: BoundaryContact + ?Sized,
{
    let contact = query.contact(p);
    *d += contact.truncate() * contact.w;
}

/// Collision response with Coulomb friction.
///
/// `x0` is the particle position at the start of the step and `p` the
/// current position. `friction` serves as both the static and the kinetic
/// coefficient. Tangential slip is measured relative to the boundary's own
/// motion: inside the friction cone it is cancelled fully, outside it is
/// reduced by at most `friction * |depth|`.
#[inline]
pub fn solve_collision_friction_constraint<Q>(
    query: &Q,
    friction: f32,
    x0: Vec3,
    p: Vec3,
    d: &mut Vec3,
) where
    Q: TaggedBoundaryContact + ?Sized,
{
    let (contact, index) = query.contact_tagged(p);
    let normal = contact.truncate();
    let depth = contact.w;

    let correction = normal * depth;
    *d += correction;

    if depth < 0.0 {
        let mu_s = friction;
        let mu_k = friction;

        let x_star = p + correction;
        let x_star_prev = query.world_to_prev_world(index).transform_point3(x_star);

        // Boundary displacement at x_star is (x_star - x_star_prev).
        let x_delta = (x_star - x0) - (x_star - x_star_prev);
        let x_delta_tan = x_delta - x_delta.dot(normal) * normal;

        let slip_sq = x_delta_tan.length_squared();
        let cone = mu_s * depth;
        if slip_sq < cone * cone {
            *d -= x_delta_tan;
        } else {
            let slip = slip_sq.sqrt();
            *d -= x_delta_tan * (mu_k * -depth / slip).min(1.0);
        }
    }
}

/// Resolve penetration of `p` in place.
pub fn apply_collision_constraint<Q>(query: &Q, p: &mut Vec3)
where
    Q: BoundaryContact + ?Sized,
{
    let mut d = Vec3::ZERO;
    solve_collision_constraint(query, *p, &mut d);
    *p += d;
}

/// Frictional collision response applied to `p` in place.
pub fn apply_collision_friction_constraint<Q>(query: &Q, friction: f32, x0: Vec3, p: &mut Vec3)
where
    Q: TaggedBoundaryContact + ?Sized,
{
    let mut d = Vec3::ZERO;
    solve_collision_friction_constraint(query, friction, x0, *p, &mut d);
    *p += d;
}

/// Collision on a particle. Weights play no part in collision response.
pub fn apply_collision_constraint_particle<Q>(query: &Q, x: &mut Particle)
where
    Q: BoundaryContact + ?Sized,
{
    apply_collision_constraint(query, &mut x.position);
}

/// Frictional collision on a particle; `x0` is its position at the start of the step.
pub fn apply_collision_friction_constraint_particle<Q>(
    query: &Q,
    friction: f32,
    x0: Vec3,
    x: &mut Particle,
) where
    Q: TaggedBoundaryContact + ?Sized,
{
    apply_collision_friction_constraint(query, friction, x0, &mut x.position);
}
