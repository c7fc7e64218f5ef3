//! Local position-based constraint projections.
//!
//! Every `solve_*` function adds its correction into the caller's delta
//! accumulators and leaves positions untouched; every `apply_*` form starts
//! from zero deltas and writes the result straight into the positions.
//! Whether deltas are summed across constraints (Jacobi) or applied
//! immediately (Gauss-Seidel) is the caller's decision.

use serde::{Deserialize, Serialize};

pub mod bending;
pub mod collision;
pub mod distance;

/// Whether weighted constraints check their denominator before applying.
///
/// With `Off` an all-pinned pair or triple (or a zero-length segment) yields
/// non-finite deltas. With `On` such corrections are dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DivisionGuard {
    #[default]
    Off,
    On,
}

impl DivisionGuard {
    #[inline]
    pub fn enabled(self) -> bool {
        self == DivisionGuard::On
    }

    /// Returns false when the guard is on and the correction must be skipped.
    #[inline]
    pub(crate) fn admits(self, w_sum: f32, w_inv: f32) -> bool {
        !self.enabled() || (w_sum > 0.0 && w_inv.is_finite())
    }
}
