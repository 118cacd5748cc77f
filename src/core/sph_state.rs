use bevy::prelude::*;

use crate::config::SphParams;
use crate::diagnostics::{PassTimings, TickStats};
use crate::error::SphError;
use crate::solver::{
    compute_densities, compute_forces, integrate_particles, rebuild_grid, reset_particles,
};

use super::grid::Grid;
use super::hooks::{ParticlesMut, StepHook};
use super::kernel::KernelCoefficients;
use super::particle::{Particle, ParticleId};

/// Phases of one tick, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepPhase {
    Reset,
    Density,
    Force,
    ExternalForce,
    Integrate,
    ExternalConstraint,
    Rebuild,
}

impl StepPhase {
    pub const COUNT: usize = 7;

    pub const ALL: [StepPhase; Self::COUNT] = [
        StepPhase::Reset,
        StepPhase::Density,
        StepPhase::Force,
        StepPhase::ExternalForce,
        StepPhase::Integrate,
        StepPhase::ExternalConstraint,
        StepPhase::Rebuild,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            StepPhase::Reset => "reset",
            StepPhase::Density => "density",
            StepPhase::Force => "force",
            StepPhase::ExternalForce => "external_force",
            StepPhase::Integrate => "integrate",
            StepPhase::ExternalConstraint => "external_constraint",
            StepPhase::Rebuild => "rebuild",
        }
    }
}

/// Id for the particle at `index` of the input, if one fits.
fn particle_id(index: usize) -> Result<ParticleId, SphError> {
    ParticleId::try_from(index).map_err(|_| SphError::TooManyParticles { index })
}

/// Aggregate simulation state for the solver.
///
/// Owns the active grid, where every particle lives between ticks, and
/// the standby grid the rebuild pass fills before the two are swapped.
#[derive(Resource)]
pub struct SphState {
    active: Grid,
    standby: Grid,
    params: SphParams,
    kernels: KernelCoefficients,
    tick: u64,
    last_stats: TickStats,
}

impl SphState {
    /// Build a simulation from a parameter set and its particles.
    ///
    /// Particles receive ids `0..n` in input order. Every particle must
    /// have a finite position inside the grid and a positive mass.
    pub fn new(params: SphParams, particles: Vec<Particle>) -> Result<Self, SphError> {
        params.validate()?;

        let mut active = Grid::new(
            params.grid_dims,
            params.smoothing_radius,
            params.cell_inline_capacity,
        );
        let standby = Grid::new(
            params.grid_dims,
            params.smoothing_radius,
            params.cell_inline_capacity,
        );

        for (index, mut particle) in particles.into_iter().enumerate() {
            if !particle.mass.is_finite() || particle.mass <= 0.0 {
                return Err(SphError::InvalidMass {
                    index,
                    mass: particle.mass,
                });
            }
            if !particle.position.is_finite() || !particle.velocity.is_finite() {
                return Err(SphError::InvalidPosition { index });
            }
            if active.cell_index_for(particle.position).is_none() {
                return Err(SphError::OutOfBounds {
                    index,
                    position: particle.position,
                });
            }

            particle.id = particle_id(index)?;
            particle.reset_accumulators();
            active.insert(particle);
        }

        info!(
            "SPH initialized: {} particles, grid {}x{}x{} (cell {:.3}), {} in overflow",
            active.len(),
            params.grid_dims.x,
            params.grid_dims.y,
            params.grid_dims.z,
            params.smoothing_radius,
            active.overflow_len(),
        );

        let mut last_stats = TickStats::from_grid(&active);
        last_stats.tick = 0;

        Ok(Self {
            kernels: KernelCoefficients::new(params.smoothing_radius),
            active,
            standby,
            params,
            tick: 0,
            last_stats,
        })
    }

    /// Run one full tick: reset, density, forces, the external force
    /// hook, integration, the external constraint hook, grid rebuild.
    pub fn step(
        &mut self,
        external_force: Option<&mut dyn StepHook>,
        external_constraint: Option<&mut dyn StepHook>,
    ) -> TickStats {
        let mut timings = PassTimings::default();

        timings.record(StepPhase::Reset, || reset_particles(&mut self.active));
        timings.record(StepPhase::Density, || {
            compute_densities(&mut self.active, &self.kernels)
        });
        timings.record(StepPhase::Force, || {
            compute_forces(&mut self.active, &self.kernels, &self.params)
        });

        if let Some(hook) = external_force {
            let phase = StepPhase::ExternalForce;
            timings.record(phase, || {
                hook.apply(&mut ParticlesMut::new(&mut self.active, phase))
            });
        }

        timings.record(StepPhase::Integrate, || {
            integrate_particles(&mut self.active, &self.params)
        });

        if let Some(hook) = external_constraint {
            let phase = StepPhase::ExternalConstraint;
            timings.record(phase, || {
                hook.apply(&mut ParticlesMut::new(&mut self.active, phase))
            });
        }

        let clamped = timings.record(StepPhase::Rebuild, || {
            rebuild_grid(&mut self.active, &mut self.standby)
        });

        self.tick += 1;

        if clamped > 0 {
            warn!(
                "tick {}: {} particles left the grid and were clamped into edge cells",
                self.tick, clamped
            );
        }
        debug!("tick {} timings: {}", self.tick, timings);

        let mut stats = TickStats::from_grid(&self.active);
        stats.tick = self.tick;
        stats.clamped_count = clamped;
        stats.timings = timings;
        self.last_stats = stats.clone();
        stats
    }

    /// One tick with neither hook installed.
    pub fn advance(&mut self) -> TickStats {
        self.step(None, None)
    }

    /// Visit every particle once, in grid order.
    pub fn for_each_particle<F: FnMut(&Particle)>(&self, f: F) {
        self.active.for_each_particle(f);
    }

    pub fn for_each_particle_mut<F: FnMut(&mut Particle)>(&mut self, f: F) {
        self.active.for_each_particle_mut(f);
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.active.iter()
    }

    /// Copy of every particle, sorted by id.
    pub fn collect_particles(&self) -> Vec<Particle> {
        let mut particles: Vec<Particle> = self.active.iter().cloned().collect();
        particles.sort_by_key(Particle::id);
        particles
    }

    pub fn particle_count(&self) -> usize {
        self.active.len()
    }

    pub fn grid(&self) -> &Grid {
        &self.active
    }

    pub fn params(&self) -> &SphParams {
        &self.params
    }

    pub fn kernels(&self) -> &KernelCoefficients {
        &self.kernels
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn last_stats(&self) -> &TickStats {
        &self.last_stats
    }
}
