// Headless water column: a half-width block of particles settling under
// gravity inside a vertical cylinder.
use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use sph3d::scene::half_width_block;
use sph3d::{ParticlesMut, SphHooks, SphParams, SphPlugin, SphState, StepHook};

const PARTICLE_COUNT: usize = 400;
/// Region the water is held in, inside the larger SPH grid.
const CONTAINER: UVec3 = UVec3::new(10, 15, 10);
const TICK_LIMIT: u64 = 600;
const LOG_PERIOD: u64 = 50;
const GRAVITY_STRENGTH: f32 = 100.0;

/// Constant body force, scaled by density so the resulting acceleration
/// only depends on mass.
struct Gravity {
    direction: Vec3,
}

impl StepHook for Gravity {
    fn apply(&mut self, particles: &mut ParticlesMut<'_>) {
        let direction = self.direction;
        particles.for_each_mut(|particle| {
            particle.force += GRAVITY_STRENGTH * direction * particle.density / particle.mass;
        });
    }
}

/// Vertical cylinder with a floor and a ceiling. Particles that cross a
/// wall are put back on it and their velocity is mirrored.
struct CylinderContainer {
    center: Vec2,
    radius: f32,
    floor: f32,
    ceiling: f32,
}

impl CylinderContainer {
    /// Cylinder inscribed in a container of the given extent.
    fn for_container(extent: UVec3) -> Self {
        let extent = extent.as_vec3();
        Self {
            center: Vec2::new(extent.x, extent.z) / 2.0,
            radius: extent.x / 2.0,
            floor: 0.0,
            ceiling: extent.y - 1.0,
        }
    }
}

impl StepHook for CylinderContainer {
    fn apply(&mut self, particles: &mut ParticlesMut<'_>) {
        particles.for_each_mut(|particle| {
            let offset = Vec2::new(particle.position.x, particle.position.z) - self.center;
            if offset.length() >= self.radius {
                let normal = offset.normalize_or_zero();
                let wall = self.center + self.radius * normal;
                particle.position.x = wall.x;
                particle.position.z = wall.y;

                let normal = Vec3::new(normal.x, 0.0, normal.y);
                particle.velocity -= 2.0 * particle.velocity.dot(normal) * normal;
            }

            if particle.position.y >= self.ceiling {
                particle.position.y = self.ceiling;
                particle.velocity.y = -particle.velocity.y;
            } else if particle.position.y < self.floor {
                particle.position.y = self.floor;
                particle.velocity.y = -particle.velocity.y;
            }
        });
    }
}

fn log_tick_stats(state: Res<SphState>, mut exit: MessageWriter<AppExit>) {
    let stats = state.last_stats();
    if stats.tick > 0 && stats.tick % LOG_PERIOD == 0 {
        info!("{stats}");
        debug!("timings: {}", stats.timings);
    }
    if !stats.is_finite() {
        error!("simulation diverged at tick {}", stats.tick);
        exit.write(AppExit::error());
    } else if stats.tick >= TICK_LIMIT {
        info!("reached {} ticks", stats.tick);
        exit.write(AppExit::Success);
    }
}

fn main() -> AppExit {
    let params = SphParams::default();
    let particles = half_width_block(CONTAINER, PARTICLE_COUNT);
    let hooks = SphHooks::default()
        .with_external_force(Gravity {
            direction: Vec3::NEG_Y,
        })
        .with_external_constraint(CylinderContainer::for_container(CONTAINER));

    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_plugins(SphPlugin::new(params, particles))
        .insert_resource(hooks)
        .add_systems(
            FixedUpdate,
            log_tick_stats
                .after(sph3d::step_simulation)
                .run_if(resource_exists::<SphState>),
        )
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_matches_water_column() {
        let container = CylinderContainer::for_container(CONTAINER);
        assert_eq!(container.center, Vec2::new(5.0, 5.0));
        assert_eq!(container.radius, 5.0);
        assert_eq!(container.ceiling, 14.0);
        assert!(SphParams::default().grid_extent().cmpgt(CONTAINER.as_vec3()).all());
    }

    #[test]
    fn container_pulls_seeded_block_inside() {
        let params = SphParams::default();
        let particles = half_width_block(CONTAINER, PARTICLE_COUNT);
        assert_eq!(particles.len(), PARTICLE_COUNT);
        let mut state = SphState::new(params, particles).unwrap();

        let mut container = CylinderContainer::for_container(CONTAINER);
        let mut checked = 0;
        let mut check = |particles: &mut ParticlesMut<'_>| {
            container.apply(particles);
            particles.for_each(|p| {
                let offset = Vec2::new(p.position.x, p.position.z) - Vec2::splat(5.0);
                assert!(offset.length() <= 5.0 + 1e-4, "{:?} outside wall", p.position);
                assert!((0.0..=14.0).contains(&p.position.y));
                checked += 1;
            });
        };
        state.step(None, Some(&mut check));

        assert_eq!(checked, PARTICLE_COUNT);
    }
}
