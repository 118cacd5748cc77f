// Default physical constants for the SPH solver
use crate::math::Real;

// Kernel support
pub const SMOOTHING_RADIUS: Real = 1.1;

// Fluid material constants
pub const REST_DENSITY: Real = 1.2;
pub const GAS_CONSTANT: Real = 1000.0;
pub const VISCOSITY: Real = 0.1;
pub const SURFACE_TENSION: Real = 1.0;
pub const POINT_DAMPING: Real = 2.0;

// Integration
pub const TIMESTEP: Real = 0.01;

// Grid layout
pub const GRID_WIDTH: u32 = 20;
pub const GRID_HEIGHT: u32 = 20;
pub const GRID_DEPTH: u32 = 20;
pub const CELL_INLINE_CAPACITY: usize = 10;

// Numerical guards
pub const PRESSURE_KERNEL_EPSILON: Real = 0.001;
pub const COLOR_GRADIENT_THRESHOLD: Real = 0.001;
