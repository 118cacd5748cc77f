//! Reset and integration passes

use crate::config::{COLOR_GRADIENT_THRESHOLD, SphParams};
use crate::core::grid::Grid;
use crate::core::particle::Particle;

/// Zero density, force and color-field accumulators of every particle.
pub fn reset_particles(grid: &mut Grid) {
    grid.for_each_particle_mut(Particle::reset_accumulators);
}

/// Surface tension plus semi-implicit Euler for one particle.
#[inline]
pub fn integrate_particle(particle: &mut Particle, params: &SphParams) {
    if particle.color_gradient.length() > COLOR_GRADIENT_THRESHOLD {
        particle.force += -params.surface_tension
            * particle.color_laplacian
            * particle.color_gradient.normalize();
    }

    let acceleration =
        particle.force / particle.density - params.damping * particle.velocity / particle.mass;
    particle.velocity += params.timestep * acceleration;
    particle.position += params.timestep * particle.velocity;
}

pub fn integrate_particles(grid: &mut Grid, params: &SphParams) {
    grid.for_each_particle_mut(|particle| integrate_particle(particle, params));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    #[test]
    fn semi_implicit_euler_uses_new_velocity() {
        let params = SphParams::default().with_damping(0.0).with_timestep(0.1);
        let mut particle = Particle::new(Vec3::ZERO);
        particle.density = 2.0;
        particle.force = Vec3::new(4.0, 0.0, 0.0);

        integrate_particle(&mut particle, &params);

        // a = 4 / 2 = 2; v = 0.2; x = 0.02
        assert!((particle.velocity.x - 0.2).abs() < 1e-6);
        assert!((particle.position.x - 0.02).abs() < 1e-6);
    }

    #[test]
    fn damping_opposes_velocity() {
        let params = SphParams::default().with_damping(2.0).with_timestep(0.01);
        let mut particle = Particle::new(Vec3::ZERO).with_velocity(Vec3::X);
        particle.density = 1.0;

        integrate_particle(&mut particle, &params);

        assert!((particle.velocity.x - 0.98).abs() < 1e-6);
    }

    #[test]
    fn surface_tension_only_above_threshold() {
        let params = SphParams::default().with_damping(0.0).with_surface_tension(1.0);

        let mut weak = Particle::new(Vec3::ZERO);
        weak.density = 1.0;
        weak.color_gradient = Vec3::new(0.0005, 0.0, 0.0);
        weak.color_laplacian = 10.0;
        integrate_particle(&mut weak, &params);
        assert_eq!(weak.velocity, Vec3::ZERO);

        let mut strong = Particle::new(Vec3::ZERO);
        strong.density = 1.0;
        strong.color_gradient = Vec3::new(0.0, 2.0, 0.0);
        strong.color_laplacian = 10.0;
        integrate_particle(&mut strong, &params);
        // force = -1 * 10 * (0, 1, 0)
        assert!((strong.force.y + 10.0).abs() < 1e-6);
        assert!(strong.velocity.y < 0.0);
    }
}
