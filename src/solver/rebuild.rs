//! Grid rebuild pass

use crate::core::grid::Grid;

/// Re-bucket every particle of `active` into `standby` by its current
/// position, then swap the two so `active` holds the fresh layout.
///
/// Returns the number of particles clamped into edge cells.
pub fn rebuild_grid(active: &mut Grid, standby: &mut Grid) -> usize {
    standby.clear();
    let clamped = active.drain_into(standby);
    active.clear();
    std::mem::swap(active, standby);
    clamped
}
