//! Initial particle layouts

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::Particle;
use crate::math::{Real, Vector};

/// Lattice coordinates of a `columns` block, x fastest inside z inside y.
fn lattice_coords(columns: UVec3) -> impl Iterator<Item = UVec3> {
    (0..columns.y).flat_map(move |j| {
        (0..columns.z).flat_map(move |k| (0..columns.x).map(move |i| UVec3::new(i, j, k)))
    })
}

/// The first `count` points of a regular lattice, one particle per point.
///
/// Points are `origin + (i, j, k) * spacing` for `(i, j, k)` inside
/// `columns`. The block fills layer by layer from the bottom, so a count
/// smaller than the block leaves the top layer partial. A count larger
/// than the block is capped at the block size.
pub fn lattice_block(columns: UVec3, count: usize, spacing: Real, origin: Vector) -> Vec<Particle> {
    lattice_coords(columns)
        .take(count)
        .map(|coord| Particle::new(origin + coord.as_vec3() * spacing))
        .collect()
}

/// [`lattice_block`] with every point displaced by up to `jitter` per axis.
///
/// The same `seed` always gives the same layout.
pub fn jittered_lattice_block(
    columns: UVec3,
    count: usize,
    spacing: Real,
    origin: Vector,
    jitter: Real,
    seed: u64,
) -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let jitter = jitter.abs();
    lattice_block(columns, count, spacing, origin)
        .into_iter()
        .map(|mut particle| {
            particle.position += Vec3::new(
                rng.random_range(-jitter..=jitter),
                rng.random_range(-jitter..=jitter),
                rng.random_range(-jitter..=jitter),
            );
            particle
        })
        .collect()
}

/// Unit-spaced block filling half the width of a `container`, its full
/// height and depth, starting at the origin.
///
/// The container is the region the fluid is held in, usually smaller than
/// the grid.
pub fn half_width_block(container: UVec3, count: usize) -> Vec<Particle> {
    let columns = UVec3::new((container.x / 2).max(1), container.y, container.z);
    lattice_block(columns, count, 1.0, Vec3::ZERO)
}
