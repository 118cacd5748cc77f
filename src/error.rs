use thiserror::Error;

use crate::math::Vector;

/// Errors reported while setting up a simulation.
///
/// A running simulation never fails; these only come out of
/// [`SphParams::validate`](crate::config::SphParams::validate) and
/// [`SphState::new`](crate::core::SphState::new).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SphError {
    #[error("Invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    #[error("Particle {index} has invalid mass {mass}")]
    InvalidMass { index: usize, mass: f32 },
    #[error("Particle {index} has a non-finite position")]
    InvalidPosition { index: usize },
    #[error("Particle {index} at {position} lies outside the grid")]
    OutOfBounds { index: usize, position: Vector },
    #[error("Particle {index} has no id left to assign")]
    TooManyParticles { index: usize },
}
