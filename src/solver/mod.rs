//! SPH solver passes
//!
//! Each pass sweeps the active grid once. The pair passes (density and
//! forces) update both members of a pair, so they run sequentially.

pub mod density;
pub mod forces;
pub mod integrate;
pub mod pairs;
pub mod rebuild;

pub use density::*;
pub use forces::*;
pub use integrate::*;
pub use pairs::for_each_candidate_pair;
pub use rebuild::*;
