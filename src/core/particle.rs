//! Fluid particles for SPH simulation
//!
//! Particles carry mass, position and velocity, plus the per-tick
//! accumulators the density and force passes write into.

use crate::math::{Real, Vector, zero_vector};

/// Stable particle identity, assigned once when a simulation is built.
pub type ParticleId = u32;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub(crate) id: ParticleId,
    pub mass: Real,
    pub position: Vector,
    pub velocity: Vector,

    // Per-tick accumulators, zeroed by the reset phase
    pub density: Real,
    pub force: Vector,
    pub color_gradient: Vector,
    pub color_laplacian: Real,
}

impl Default for Particle {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Particle {
    pub fn zeroed() -> Self {
        Self {
            id: 0,
            mass: 1.0,
            position: zero_vector(),
            velocity: zero_vector(),
            density: 0.0,
            force: zero_vector(),
            color_gradient: zero_vector(),
            color_laplacian: 0.0,
        }
    }

    pub fn new(position: Vector) -> Self {
        Self {
            position,
            ..Self::zeroed()
        }
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: Real) -> Self {
        self.mass = mass;
        self
    }

    /// Set the id by hand, for driving the passes on a bare grid. Ids
    /// must be unique within a grid; [`SphState::new`](super::SphState::new)
    /// overwrites them.
    pub fn with_id(mut self, id: ParticleId) -> Self {
        self.id = id;
        self
    }

    #[inline(always)]
    pub fn id(&self) -> ParticleId {
        self.id
    }

    /// Zero the transient accumulators before a new tick.
    #[inline(always)]
    pub fn reset_accumulators(&mut self) {
        self.density = 0.0;
        self.force = zero_vector();
        self.color_gradient = zero_vector();
        self.color_laplacian = 0.0;
    }

    #[inline(always)]
    pub fn kinetic_energy(&self) -> Real {
        0.5 * self.mass * self.velocity.length_squared()
    }

    #[inline(always)]
    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.density.is_finite()
            && self.force.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    #[test]
    fn builder_sets_fields() {
        let particle = Particle::new(Vec3::new(1.0, 2.0, 3.0))
            .with_velocity(Vec3::X)
            .with_mass(2.0)
            .with_id(7);
        assert_eq!(particle.id(), 7);
        assert_eq!(particle.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(particle.velocity, Vec3::X);
        assert_eq!(particle.mass, 2.0);
        assert_eq!(particle.kinetic_energy(), 1.0);
        assert_eq!(particle.momentum(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn reset_clears_only_accumulators() {
        let mut particle = Particle::new(Vec3::ONE).with_velocity(Vec3::Y);
        particle.density = 3.0;
        particle.force = Vec3::X;
        particle.color_gradient = Vec3::Z;
        particle.color_laplacian = -2.0;

        particle.reset_accumulators();

        assert_eq!(particle.density, 0.0);
        assert_eq!(particle.force, Vec3::ZERO);
        assert_eq!(particle.color_gradient, Vec3::ZERO);
        assert_eq!(particle.color_laplacian, 0.0);
        assert_eq!(particle.position, Vec3::ONE);
        assert_eq!(particle.velocity, Vec3::Y);
    }
}
