//! Per-tick statistics and pass timings

use std::fmt;
use std::time::{Duration, Instant};

use crate::core::StepPhase;
use crate::core::grid::Grid;
use crate::math::{Real, Vector, zero_vector};

/// Wall time spent in each phase of a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PassTimings {
    durations: [Duration; StepPhase::COUNT],
}

impl PassTimings {
    /// Run `f` as `phase` and keep its elapsed time.
    #[inline]
    pub fn record<T>(&mut self, phase: StepPhase, f: impl FnOnce() -> T) -> T {
        let (value, elapsed) = time_pass(f);
        self.durations[phase.index()] += elapsed;
        value
    }

    pub fn get(&self, phase: StepPhase) -> Duration {
        self.durations[phase.index()]
    }

    pub fn total(&self) -> Duration {
        self.durations.iter().sum()
    }
}

impl fmt::Display for PassTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, phase) in StepPhase::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(
                f,
                "{}={:.3}ms",
                phase.label(),
                self.get(phase).as_secs_f64() * 1000.0
            )?;
        }
        Ok(())
    }
}

/// Run `f` and return its result with the elapsed time.
#[inline]
pub fn time_pass<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Snapshot of the particle set after a tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickStats {
    pub tick: u64,
    pub particle_count: usize,
    pub overflow_count: usize,
    pub clamped_count: usize,
    pub mean_density: Real,
    pub min_density: Real,
    pub max_density: Real,
    pub kinetic_energy: Real,
    pub momentum: Vector,
    pub max_speed: Real,
    pub timings: PassTimings,
}

impl TickStats {
    /// Gather particle statistics from a grid. Tick bookkeeping
    /// (`tick`, `clamped_count`, `timings`) is left at its default.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut stats = Self {
            min_density: Real::INFINITY,
            max_density: Real::NEG_INFINITY,
            momentum: zero_vector(),
            ..Self::default()
        };

        let mut density_sum = 0.0;
        for particle in grid.iter() {
            stats.particle_count += 1;
            density_sum += particle.density;
            stats.min_density = stats.min_density.min(particle.density);
            stats.max_density = stats.max_density.max(particle.density);
            stats.kinetic_energy += particle.kinetic_energy();
            stats.momentum += particle.momentum();
            stats.max_speed = stats.max_speed.max(particle.velocity.length());
        }

        if stats.particle_count == 0 {
            stats.min_density = 0.0;
            stats.max_density = 0.0;
        } else {
            stats.mean_density = density_sum / stats.particle_count as Real;
        }
        stats.overflow_count = grid.overflow_len();
        stats
    }

    pub fn is_finite(&self) -> bool {
        self.mean_density.is_finite()
            && self.kinetic_energy.is_finite()
            && self.momentum.is_finite()
            && self.max_speed.is_finite()
    }
}

impl fmt::Display for TickStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {}: particles={} overflow={} clamped={} dens(mean={:.3} min={:.3} max={:.3}) ke={:.4} max_speed={:.3}",
            self.tick,
            self.particle_count,
            self.overflow_count,
            self.clamped_count,
            self.mean_density,
            self.min_density,
            self.max_density,
            self.kinetic_energy,
            self.max_speed,
        )
    }
}
