use serde::{Deserialize, Serialize};

use crate::constraints::DivisionGuard;
use crate::error::{SolverError, SolverResult};

/// Parameters of the driver-side passes in [`crate::relax`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Whether averaged corrections are checked for non-finite values.
    pub division_guard: DivisionGuard,
    /// Coulomb coefficient used for both the static and kinetic regime.
    pub friction: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            division_guard: DivisionGuard::Off,
            friction: 0.0,
        }
    }
}

impl SolverConfig {
    pub fn with_division_guard(mut self, guard: DivisionGuard) -> Self {
        self.division_guard = guard;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn validate(&self) -> SolverResult<()> {
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(SolverError::InvalidConfig(format!(
                "friction must be finite and non-negative, got {}",
                self.friction
            )));
        }
        Ok(())
    }
}
