//! Resting blocks settle without blowing up
//!
//! For the near-equilibrium runs the rest density is taken from the
//! initial lattice itself, so the block starts close to zero pressure and
//! should stay there.

use sph3d::core::ParticlesMut;
use sph3d::scene::lattice_block;
use sph3d::{Particle, SphParams, SphState, TickStats};
use bevy::math::{UVec3, Vec3};

const TICKS: usize = 150;
const BLOCK: u32 = 6;
const COUNT: usize = (BLOCK * BLOCK * BLOCK) as usize;

fn base_params() -> SphParams {
    SphParams::default()
        .with_grid_dims(UVec3::splat(16))
        .with_gas_constant(50.0)
}

fn block(spacing: f32) -> Vec<Particle> {
    lattice_block(UVec3::splat(BLOCK), COUNT, spacing, Vec3::splat(5.0))
}

/// Mean density of the untouched lattice, sampled by the force hook of
/// the first tick.
fn initial_mean_density(params: &SphParams, particles: &[Particle]) -> f32 {
    let mut state = SphState::new(params.clone(), particles.to_vec()).unwrap();
    let mut mean = 0.0;
    let mut sample = |particles: &mut ParticlesMut<'_>| {
        mean = particles.iter().map(|p| p.density).sum::<f32>() / particles.len() as f32;
    };
    state.step(Some(&mut sample), None);
    mean
}

fn run(params: SphParams, particles: Vec<Particle>) -> Vec<TickStats> {
    let mut state = SphState::new(params, particles).unwrap();
    (0..TICKS)
        .map(|_| {
            let stats = state.advance();
            assert!(stats.is_finite(), "diverged at tick {}", stats.tick);
            assert_eq!(stats.particle_count, COUNT);
            stats
        })
        .collect()
}

fn peak_kinetic_energy(history: &[TickStats]) -> f32 {
    history.iter().map(|s| s.kinetic_energy).fold(0.0, f32::max)
}

/// Run a block at its own rest density and check it stays there.
fn assert_settles(spacing: f32, max_kinetic_energy: f32) {
    let base = base_params();
    let particles = block(spacing);
    let rest_density = initial_mean_density(&base, &particles);
    let history = run(base.with_rest_density(rest_density), particles);

    for stats in &history {
        let deviation = (stats.mean_density - rest_density).abs() / rest_density;
        assert!(
            deviation < 0.05,
            "spacing {}: tick {} mean density {} vs rest density {}",
            spacing,
            stats.tick,
            stats.mean_density,
            rest_density
        );
        assert_eq!(stats.clamped_count, 0);
        assert!(
            stats.kinetic_energy < max_kinetic_energy,
            "spacing {}: tick {} kinetic energy {}",
            spacing,
            stats.tick,
            stats.kinetic_energy
        );
    }

    // Motion decays once the start-up transient is over.
    let (early, late) = history.split_at(TICKS / 2);
    let early_peak = peak_kinetic_energy(early);
    let late_peak = peak_kinetic_energy(late);
    assert!(
        late_peak <= early_peak,
        "spacing {}: kinetic energy grew from {} to {}",
        spacing,
        early_peak,
        late_peak
    );
}

/// Test that a dense lattice at its own rest density stays near it
#[test]
fn test_dense_lattice_stays_near_rest_density() {
    assert_settles(0.6, 10.0);
}

/// Test that a lattice spaced near the smoothing radius stays near rest density
#[test]
fn test_wide_lattice_stays_near_rest_density() {
    assert_settles(1.0, 60.0);
}

/// Test that a block compressed well above the default rest density
/// expands without density spikes
#[test]
fn test_compressed_lattice_expands_boundedly() {
    let params = base_params().with_grid_dims(UVec3::splat(24));
    assert_eq!(params.rest_density, SphParams::default().rest_density);
    let particles = block(0.6);
    let initial = initial_mean_density(&params, &particles);
    assert!(initial > params.rest_density);

    let history = run(params, particles);

    let initial_peak = history[0].max_density;
    for stats in &history {
        assert!(
            stats.max_density < 1.5 * initial_peak,
            "tick {}: max density {} (started at {})",
            stats.tick,
            stats.max_density,
            initial_peak
        );
        assert!(stats.min_density > 0.0);
    }
    let last = &history[TICKS - 1];
    assert!(
        last.mean_density < initial,
        "mean density {} did not drop below {}",
        last.mean_density,
        initial
    );
}
