//! Caller-supplied hooks run inside a simulation tick
//!
//! A tick offers two hook points: one after the force pass for body
//! forces such as gravity, and one after integration for position and
//! velocity constraints such as container walls. Hooks see the particles
//! through [`ParticlesMut`], never the simulation itself, so a hook
//! cannot start another tick.

use super::grid::Grid;
use super::particle::Particle;
use super::sph_state::StepPhase;

/// Mutable view over every live particle, handed to hooks.
pub struct ParticlesMut<'a> {
    grid: &'a mut Grid,
    phase: StepPhase,
}

impl<'a> ParticlesMut<'a> {
    pub(crate) fn new(grid: &'a mut Grid, phase: StepPhase) -> Self {
        Self { grid, phase }
    }

    /// Hook point this view was handed out at.
    pub fn phase(&self) -> StepPhase {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn for_each<F: FnMut(&Particle)>(&self, f: F) {
        self.grid.for_each_particle(f);
    }

    pub fn for_each_mut<F: FnMut(&mut Particle)>(&mut self, f: F) {
        self.grid.for_each_particle_mut(f);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.grid.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.grid.iter_mut()
    }
}

/// Strategy invoked at a hook point of the step.
///
/// Called at most once per hook point per tick. May read and write any
/// particle.
pub trait StepHook {
    fn apply(&mut self, particles: &mut ParticlesMut<'_>);
}

impl<F> StepHook for F
where
    F: FnMut(&mut ParticlesMut<'_>),
{
    fn apply(&mut self, particles: &mut ParticlesMut<'_>) {
        self(particles)
    }
}
