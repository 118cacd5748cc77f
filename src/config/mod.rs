//! Configuration and parameters
//!
//! Default constants and the solver parameter pack.

pub mod constants;
pub mod sph_params;

pub use constants::*;
pub use sph_params::*;
