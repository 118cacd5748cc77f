use bevy::prelude::*;

use crate::error::SphError;
use crate::math::{GridSize, Real, Vector};

use super::constants::*;

/// Solver parameters for an SPH simulation.
///
/// Fixed once a [`SphState`](crate::core::SphState) is built from them.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SphParams {
    /// Kernel support radius, also the edge length of a grid cell
    pub smoothing_radius: Real,

    /// Density the pressure term drives the fluid towards
    pub rest_density: Real,

    /// Pressure stiffness
    pub gas_constant: Real,

    /// Viscosity coefficient (mu)
    pub viscosity: Real,

    /// Surface tension coefficient (sigma)
    pub surface_tension: Real,

    /// Velocity damping applied in the integrator
    pub damping: Real,

    /// Fixed integration timestep
    pub timestep: Real,

    /// Number of cells along each axis
    pub grid_dims: GridSize,

    /// Particles stored inline per cell before spilling into overflow
    pub cell_inline_capacity: usize,
}

impl Default for SphParams {
    fn default() -> Self {
        Self {
            smoothing_radius: SMOOTHING_RADIUS,
            rest_density: REST_DENSITY,
            gas_constant: GAS_CONSTANT,
            viscosity: VISCOSITY,
            surface_tension: SURFACE_TENSION,
            damping: POINT_DAMPING,
            timestep: TIMESTEP,
            grid_dims: UVec3::new(GRID_WIDTH, GRID_HEIGHT, GRID_DEPTH),
            cell_inline_capacity: CELL_INLINE_CAPACITY,
        }
    }
}

impl SphParams {
    pub fn with_smoothing_radius(mut self, radius: Real) -> Self {
        self.smoothing_radius = radius;
        self
    }

    pub fn with_rest_density(mut self, rest_density: Real) -> Self {
        self.rest_density = rest_density;
        self
    }

    pub fn with_gas_constant(mut self, gas_constant: Real) -> Self {
        self.gas_constant = gas_constant;
        self
    }

    pub fn with_viscosity(mut self, viscosity: Real) -> Self {
        self.viscosity = viscosity;
        self
    }

    pub fn with_surface_tension(mut self, surface_tension: Real) -> Self {
        self.surface_tension = surface_tension;
        self
    }

    pub fn with_damping(mut self, damping: Real) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_timestep(mut self, timestep: Real) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_grid_dims(mut self, dims: GridSize) -> Self {
        self.grid_dims = dims;
        self
    }

    pub fn with_cell_inline_capacity(mut self, capacity: usize) -> Self {
        self.cell_inline_capacity = capacity;
        self
    }

    /// World-space size covered by the grid.
    pub fn grid_extent(&self) -> Vector {
        self.grid_dims.as_vec3() * self.smoothing_radius
    }

    /// Check every parameter for values the solver cannot run with.
    pub fn validate(&self) -> Result<(), SphError> {
        let positive = [
            ("smoothing_radius", self.smoothing_radius),
            ("timestep", self.timestep),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SphError::InvalidParameter { name, value });
            }
        }

        let non_negative = [
            ("rest_density", self.rest_density),
            ("gas_constant", self.gas_constant),
            ("viscosity", self.viscosity),
            ("surface_tension", self.surface_tension),
            ("damping", self.damping),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SphError::InvalidParameter { name, value });
            }
        }

        let dims = [
            ("grid_dims.x", self.grid_dims.x),
            ("grid_dims.y", self.grid_dims.y),
            ("grid_dims.z", self.grid_dims.z),
        ];
        for (name, value) in dims {
            if value == 0 {
                return Err(SphError::InvalidParameter {
                    name,
                    value: value as f32,
                });
            }
        }

        Ok(())
    }
}
