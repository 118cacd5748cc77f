//! Density pass
//!
//! Accumulates `rho_p = sum_q m_q W(p - q)` symmetrically: each
//! unordered pair is evaluated once and written to both members.

use crate::core::grid::{Grid, PairMut};
use crate::core::kernel::KernelCoefficients;
use crate::core::particle::Particle;
use crate::math::zero_vector;

use super::pairs::for_each_candidate_pair;

/// Add the density contribution of one ordered candidate pair.
///
/// Skipped when `p.id > q.id` so the pair is only counted from its
/// lower-id side, or when the pair is farther apart than the radius.
#[inline]
pub fn add_density(p: &mut Particle, q: &mut Particle, kernels: &KernelCoefficients) {
    if p.id > q.id {
        return;
    }

    let r = p.position - q.position;
    if r.length_squared() > kernels.radius_sq() {
        return;
    }

    let common = kernels.density(r);
    p.density += q.mass * common;
    q.density += p.mass * common;
}

/// Self pair: the symmetric update lands on the same particle twice.
#[inline]
pub fn add_self_density(particle: &mut Particle, kernels: &KernelCoefficients) {
    let common = kernels.density(zero_vector());
    particle.density += 2.0 * particle.mass * common;
}

pub fn compute_densities(grid: &mut Grid, kernels: &KernelCoefficients) {
    for_each_candidate_pair(grid, |pair| match pair {
        PairMut::Same(particle) => add_self_density(particle, kernels),
        PairMut::Distinct(p, q) => add_density(p, q, kernels),
    });
}
