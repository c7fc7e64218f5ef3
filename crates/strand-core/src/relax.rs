//! Driver-side helpers for one relaxation pass.
//!
//! Nothing here knows about strand topology. [`CorrectionBuffer`] holds the
//! Jacobi accumulation state for any set of constraints, and the collision
//! passes run the per-particle collision constraints over a whole buffer.

use glam::Vec3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::constraints::collision::{
    solve_collision_constraint, solve_collision_friction_constraint, BoundaryContact,
    TaggedBoundaryContact,
};
use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::particle::Particle;

fn check_len(name: &'static str, expected: usize, actual: usize) -> SolverResult<()> {
    if expected != actual {
        return Err(SolverError::LengthMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Jacobi accumulation buffers.
///
/// Constraints write their deltas here instead of into the positions; once
/// every constraint of the iteration has run, [`CorrectionBuffer::apply`]
/// moves each particle by the average of the deltas it received.
pub struct CorrectionBuffer {
    /// Accumulated position corrections.
    pub corrections: Vec<Vec3>,
    /// Number of corrections per particle (for averaging).
    pub correction_counts: Vec<u32>,
}

impl CorrectionBuffer {
    pub fn new(count: usize) -> Self {
        Self {
            corrections: vec![Vec3::ZERO; count],
            correction_counts: vec![0u32; count],
        }
    }

    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    /// Zero all corrections. Call before the first constraint of each iteration.
    pub fn reset(&mut self) {
        self.corrections.fill(Vec3::ZERO);
        self.correction_counts.fill(0);
    }

    /// Mutable delta slot for particle `i`, counted as one contribution.
    ///
    /// Pass the returned reference as a `d*` argument of a `solve_*` function.
    #[inline]
    pub fn slot(&mut self, i: usize) -> &mut Vec3 {
        self.correction_counts[i] += 1;
        &mut self.corrections[i]
    }

    #[inline]
    pub fn accumulate(&mut self, i: usize, delta: Vec3) {
        *self.slot(i) += delta;
    }

    /// Apply averaged corrections to `particles` and return how many moved.
    ///
    /// With `config.division_guard` on, a non-finite average is dropped
    /// instead of being written into the particle state.
    pub fn apply(&self, particles: &mut [Particle], config: &SolverConfig) -> SolverResult<usize> {
        config.validate()?;
        check_len("particles", self.len(), particles.len())?;
        let guard = config.division_guard;

        let mut moved = 0;
        let mut rejected = 0;
        for (i, particle) in particles.iter_mut().enumerate() {
            let count = self.correction_counts[i];
            if count == 0 {
                continue;
            }
            let delta = self.corrections[i] / count as f32;
            if guard.enabled() && !delta.is_finite() {
                rejected += 1;
                continue;
            }
            particle.position += delta;
            moved += 1;
        }

        if rejected > 0 {
            tracing::warn!(rejected, "dropped non-finite corrections");
        }
        tracing::trace!(moved, "applied averaged corrections");
        Ok(moved)
    }
}

/// Resolve boundary penetration for every non-pinned particle in place.
pub fn solve_collisions<Q>(particles: &mut [Particle], query: &Q)
where
    Q: BoundaryContact + Sync + ?Sized,
{
    let _span = tracing::trace_span!("solve_collisions", count = particles.len()).entered();

    let project = |particle: &mut Particle| {
        if particle.is_pinned() {
            return;
        }
        let mut d = Vec3::ZERO;
        solve_collision_constraint(query, particle.position, &mut d);
        particle.position += d;
    };

    #[cfg(feature = "parallel")]
    particles.par_iter_mut().for_each(project);
    #[cfg(not(feature = "parallel"))]
    particles.iter_mut().for_each(project);
}

/// Frictional collision pass using `config.friction`. `start` holds each
/// particle's position at the start of the step and must match `particles`
/// in length.
pub fn solve_collisions_with_friction<Q>(
    particles: &mut [Particle],
    start: &[Vec3],
    query: &Q,
    config: &SolverConfig,
) -> SolverResult<()>
where
    Q: TaggedBoundaryContact + Sync + ?Sized,
{
    config.validate()?;
    check_len("start", particles.len(), start.len())?;
    let friction = config.friction;
    let _span = tracing::trace_span!("solve_collisions_with_friction", count = particles.len())
        .entered();

    let project = |(particle, x0): (&mut Particle, &Vec3)| {
        if particle.is_pinned() {
            return;
        }
        let mut d = Vec3::ZERO;
        solve_collision_friction_constraint(query, friction, *x0, particle.position, &mut d);
        particle.position += d;
    };

    #[cfg(feature = "parallel")]
    particles.par_iter_mut().zip(start.par_iter()).for_each(project);
    #[cfg(not(feature = "parallel"))]
    particles.iter_mut().zip(start.iter()).for_each(project);

    Ok(())
}
