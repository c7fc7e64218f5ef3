//! Position-based dynamics constraints for strand-like bodies (hair, fur).
//!
//! The crate is a library of local constraint projections plus the small
//! quaternion toolkit used to track bend frames. It owns no particle state:
//! the simulation driver passes positions and weights in, receives
//! corrections back, and chooses iteration order, iteration count and
//! whether corrections are applied immediately or accumulated.

pub mod config;
pub mod constraints;
pub mod error;
pub mod particle;
pub mod quaternion;
pub mod relax;

pub use config::SolverConfig;
pub use constraints::DivisionGuard;
pub use error::{SolverError, SolverResult};
pub use particle::Particle;
