use std::time::Duration;

use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod math;
pub mod scene;
pub mod solver;

// Public re-exports for clean API
pub use config::SphParams;
pub use crate::core::{Grid, GridCell, Particle, ParticleId, ParticlesMut, SphState, StepHook, StepPhase};
pub use diagnostics::{PassTimings, TickStats};
pub use error::SphError;

/// Hooks the [`SphPlugin`] step system hands to every tick.
#[derive(Resource, Default)]
pub struct SphHooks {
    pub external_force: Option<Box<dyn StepHook + Send + Sync>>,
    pub external_constraint: Option<Box<dyn StepHook + Send + Sync>>,
}

impl SphHooks {
    pub fn with_external_force(mut self, hook: impl StepHook + Send + Sync + 'static) -> Self {
        self.external_force = Some(Box::new(hook));
        self
    }

    pub fn with_external_constraint(
        mut self,
        hook: impl StepHook + Send + Sync + 'static,
    ) -> Self {
        self.external_constraint = Some(Box::new(hook));
        self
    }
}

/// Runs one SPH tick per fixed timestep.
pub struct SphPlugin {
    pub params: SphParams,
    pub particles: Vec<Particle>,
}

impl SphPlugin {
    pub fn new(params: SphParams, particles: Vec<Particle>) -> Self {
        Self { params, particles }
    }
}

impl Plugin for SphPlugin {
    fn build(&self, app: &mut App) {
        match SphState::new(self.params.clone(), self.particles.clone()) {
            Ok(state) => {
                app.insert_resource(state);
                app.insert_resource(Time::<Fixed>::from_duration(Duration::from_secs_f64(
                    self.params.timestep as f64,
                )));
            }
            Err(err) => error!("SPH state not created: {err}"),
        }
        app.init_resource::<SphHooks>();
        app.add_systems(FixedUpdate, step_simulation);
    }
}

/// Advance the simulation by one tick with the installed hooks.
pub fn step_simulation(state: Option<ResMut<SphState>>, mut hooks: ResMut<SphHooks>) {
    let Some(mut state) = state else {
        return;
    };
    let SphHooks {
        external_force,
        external_constraint,
    } = &mut *hooks;
    state.step(
        external_force
            .as_deref_mut()
            .map(|hook| hook as &mut dyn StepHook),
        external_constraint
            .as_deref_mut()
            .map(|hook| hook as &mut dyn StepHook),
    );
}
