//! Force pass
//!
//! Pressure, viscosity and color-field terms for every unordered pair of
//! distinct particles within the smoothing radius.

use crate::config::SphParams;
use crate::core::grid::{Grid, PairMut};
use crate::core::kernel::KernelCoefficients;
use crate::core::particle::Particle;

use super::pairs::for_each_candidate_pair;

/// Add the pair terms of one ordered candidate pair to both particles.
///
/// Skipped unless `p.id < q.id`, so a particle never pairs with itself
/// and each unordered pair is handled once. Both densities must already
/// be positive.
#[inline]
pub fn add_forces(
    p: &mut Particle,
    q: &mut Particle,
    kernels: &KernelCoefficients,
    params: &SphParams,
) {
    if p.id >= q.id {
        return;
    }

    let r = p.position - q.position;
    if r.length_squared() > kernels.radius_sq() {
        return;
    }

    let p_weight = p.mass / p.density;
    let q_weight = q.mass / q.density;

    // Pressure: each side is scaled by the other particle's mass/density.
    let common = 0.5
        * params.gas_constant
        * ((p.density - params.rest_density) + (q.density - params.rest_density))
        * kernels.pressure_gradient(r);
    p.force += -q_weight * common;
    q.force -= -p_weight * common;

    // Viscosity pulls both velocities towards each other.
    let common = params.viscosity * (q.velocity - p.velocity) * kernels.viscosity_laplacian(r);
    p.force += q_weight * common;
    q.force -= p_weight * common;

    let common = kernels.density_gradient(r);
    p.color_gradient += q_weight * common;
    q.color_gradient -= p_weight * common;

    let value = kernels.density_laplacian(r);
    p.color_laplacian += q_weight * value;
    q.color_laplacian += p_weight * value;
}

pub fn compute_forces(grid: &mut Grid, kernels: &KernelCoefficients, params: &SphParams) {
    for_each_candidate_pair(grid, |pair| {
        if let PairMut::Distinct(p, q) = pair {
            add_forces(p, q, kernels, params);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    fn particle(id: u32, position: Vec3, velocity: Vec3, density: f32) -> Particle {
        let mut particle = Particle::new(position).with_velocity(velocity);
        particle.id = id;
        particle.density = density;
        particle
    }

    #[test]
    fn compressed_pair_repels() {
        let params = SphParams::default();
        let kernels = KernelCoefficients::new(params.smoothing_radius);
        let mut a = particle(0, Vec3::ZERO, Vec3::ZERO, 2.0);
        let mut b = particle(1, Vec3::new(0.5, 0.0, 0.0), Vec3::ZERO, 2.0);

        add_forces(&mut a, &mut b, &kernels, &params);

        assert!(a.force.x < 0.0);
        assert!(b.force.x > 0.0);
        assert!((a.force + b.force).length() < 1e-3);
    }

    #[test]
    fn higher_id_side_and_self_are_skipped() {
        let params = SphParams::default();
        let kernels = KernelCoefficients::new(params.smoothing_radius);
        let mut a = particle(0, Vec3::ZERO, Vec3::ZERO, 2.0);
        let mut b = particle(1, Vec3::new(0.5, 0.0, 0.0), Vec3::ZERO, 2.0);

        add_forces(&mut b, &mut a, &kernels, &params);
        assert_eq!(a.force, Vec3::ZERO);
        assert_eq!(b.force, Vec3::ZERO);
        assert_eq!(a.color_laplacian, 0.0);
    }

    #[test]
    fn pressure_weighting_uses_other_particle() {
        let params = SphParams::default().with_viscosity(0.0);
        let kernels = KernelCoefficients::new(params.smoothing_radius);
        let mut a = particle(0, Vec3::ZERO, Vec3::ZERO, 2.0);
        let mut b = particle(1, Vec3::new(0.5, 0.0, 0.0), Vec3::ZERO, 4.0).with_mass(2.0);

        add_forces(&mut a, &mut b, &kernels, &params);

        let r = a.position - b.position;
        let common = 0.5
            * params.gas_constant
            * ((2.0 - params.rest_density) + (4.0 - params.rest_density))
            * kernels.pressure_gradient(r);
        let expected_a = -(2.0 / 4.0) * common;
        let expected_b = (1.0 / 2.0) * common;
        assert!((a.force - expected_a).length() < 1e-3);
        assert!((b.force - expected_b).length() < 1e-3);
    }

    #[test]
    fn viscosity_smooths_relative_velocity() {
        let params = SphParams::default()
            .with_gas_constant(0.0)
            .with_viscosity(1.0);
        let kernels = KernelCoefficients::new(params.smoothing_radius);
        let mut a = particle(0, Vec3::ZERO, Vec3::ZERO, 1.0);
        let mut b = particle(1, Vec3::new(0.5, 0.0, 0.0), Vec3::Y, 1.0);

        add_forces(&mut a, &mut b, &kernels, &params);

        assert!(a.force.y > 0.0);
        assert!(b.force.y < 0.0);
        assert!((a.force + b.force).length() < 1e-5);
    }

    #[test]
    fn color_field_is_antisymmetric_gradient_symmetric_laplacian() {
        let params = SphParams::default();
        let kernels = KernelCoefficients::new(params.smoothing_radius);
        let mut a = particle(0, Vec3::ZERO, Vec3::ZERO, 1.5);
        let mut b = particle(1, Vec3::new(0.0, 0.6, 0.0), Vec3::ZERO, 1.5);

        add_forces(&mut a, &mut b, &kernels, &params);

        assert!((a.color_gradient + b.color_gradient).length() < 1e-6);
        assert!(a.color_gradient.length() > 0.0);
        assert_eq!(a.color_laplacian, b.color_laplacian);
    }

    #[test]
    fn pair_beyond_radius_contributes_nothing() {
        let params = SphParams::default();
        let kernels = KernelCoefficients::new(params.smoothing_radius);
        let mut a = particle(0, Vec3::ZERO, Vec3::X, 2.0);
        let mut b = particle(1, Vec3::new(params.smoothing_radius + 1e-3, 0.0, 0.0), Vec3::ZERO, 2.0);

        add_forces(&mut a, &mut b, &kernels, &params);

        assert_eq!(a.force, Vec3::ZERO);
        assert_eq!(b.force, Vec3::ZERO);
        assert_eq!(a.color_gradient, Vec3::ZERO);
        assert_eq!(b.color_laplacian, 0.0);
    }
}
