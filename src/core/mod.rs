pub mod cell;
pub mod grid;
pub mod hooks;
pub mod kernel;
pub mod particle;
pub mod sph_state;

pub use cell::GridCell;
pub use grid::{
    Grid, GridDims, NEIGHBOR_COUNT, NEIGHBOR_OFFSETS, PairMut, ParticleRef, Placement,
};
pub use hooks::{ParticlesMut, StepHook};
pub use kernel::{
    KernelCoefficients, density_kernel, density_kernel_gradient, density_kernel_laplacian,
    pressure_kernel_gradient, viscosity_kernel_laplacian,
};
pub use particle::{Particle, ParticleId};
pub use sph_state::{SphState, StepPhase};
