use crate::core::grid::{Grid, PairMut, ParticleRef};

/// Hand every candidate pair to `visit`.
///
/// For each particle `p` in grid order, every particle `q` of the
/// 3x3x3 block around `p`'s cell is a candidate, `p` itself included.
/// Each unordered pair therefore shows up twice; the passes keep one of
/// the two visits by comparing ids.
pub fn for_each_candidate_pair<F>(grid: &mut Grid, mut visit: F)
where
    F: FnMut(PairMut<'_>),
{
    let dims = grid.dims();
    for home in 0..dims.cell_count() {
        let center = dims.coord_of(home);
        for p_slot in 0..grid.cell_len(home) {
            let p = ParticleRef {
                cell: home,
                slot: p_slot,
            };
            for neighbor in dims.neighbor_indices(center) {
                for q_slot in 0..grid.cell_len(neighbor) {
                    let q = ParticleRef {
                        cell: neighbor,
                        slot: q_slot,
                    };
                    if let Some(pair) = grid.pair_mut(p, q) {
                        visit(pair);
                    }
                }
            }
        }
    }
}
