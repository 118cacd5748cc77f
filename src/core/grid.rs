//! Uniform spatial grid for SPH neighbor search
//!
//! Dense `W x H x D` array of [`GridCell`]s with cell width equal to the
//! smoothing radius, so every neighbor of a particle lives in the 3x3x3
//! block around its home cell.

use bevy::prelude::*;

use crate::math::{GridCoord, GridSize, Real, Vector};

use super::cell::GridCell;
use super::particle::Particle;

/// Number of cells in a 3x3x3 block
pub const NEIGHBOR_COUNT: usize = 27;

/// Offsets of the 3x3x3 block, x fastest then y then z
pub const NEIGHBOR_OFFSETS: [IVec3; NEIGHBOR_COUNT] = {
    let mut offsets = [IVec3::ZERO; NEIGHBOR_COUNT];
    let mut idx = 0;
    while idx < NEIGHBOR_COUNT {
        let i = idx as i32;
        offsets[idx] = IVec3::new(i % 3 - 1, (i / 3) % 3 - 1, i / 9 - 1);
        idx += 1;
    }
    offsets
};

/// Grid dimensions and the coordinate <-> linear index mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    size: GridSize,
}

impl GridDims {
    pub fn new(size: GridSize) -> Self {
        Self { size }
    }

    #[inline(always)]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[inline(always)]
    pub fn cell_count(&self) -> usize {
        self.size.x as usize * self.size.y as usize * self.size.z as usize
    }

    #[inline(always)]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.z >= 0
            && (coord.x as u32) < self.size.x
            && (coord.y as u32) < self.size.y
            && (coord.z as u32) < self.size.z
    }

    /// Bounds-checked `i + j * W + k * W * H`.
    #[inline(always)]
    pub fn linear_index(&self, coord: GridCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let (w, h) = (self.size.x as usize, self.size.y as usize);
        Some(coord.x as usize + coord.y as usize * w + coord.z as usize * w * h)
    }

    /// Inverse of [`linear_index`](Self::linear_index).
    #[inline(always)]
    pub fn coord_of(&self, index: usize) -> GridCoord {
        let (w, h) = (self.size.x as usize, self.size.y as usize);
        IVec3::new(
            (index % w) as i32,
            ((index / w) % h) as i32,
            (index / (w * h)) as i32,
        )
    }

    /// Pull a coordinate onto the nearest edge cell.
    #[inline(always)]
    pub fn clamp(&self, coord: GridCoord) -> GridCoord {
        coord.clamp(IVec3::ZERO, self.size.as_ivec3() - IVec3::ONE)
    }

    /// Linear index of the cell nearest to `coord`.
    #[inline(always)]
    pub fn clamped_index(&self, coord: GridCoord) -> usize {
        let cell = self.clamp(coord).as_uvec3();
        let (w, h) = (self.size.x as usize, self.size.y as usize);
        cell.x as usize + cell.y as usize * w + cell.z as usize * w * h
    }

    /// Linear indices of the in-bounds cells of the 3x3x3 block around `center`.
    #[inline]
    pub fn neighbor_indices(self, center: GridCoord) -> impl Iterator<Item = usize> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |offset| self.linear_index(center + offset))
    }
}

/// Address of a particle stored in a grid: cell index plus slot in that cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParticleRef {
    pub cell: usize,
    pub slot: usize,
}

/// Two borrowed members of a candidate pair.
pub enum PairMut<'a> {
    /// Both references name the same particle.
    Same(&'a mut Particle),
    Distinct(&'a mut Particle, &'a mut Particle),
}

/// Where [`Grid::insert`] put a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub cell: usize,
    pub spilled: bool,
    pub clamped: bool,
}

#[derive(Clone, Debug)]
pub struct Grid {
    dims: GridDims,
    cell_width: Real,
    cells: Vec<GridCell>,
}

impl Grid {
    pub fn new(size: GridSize, cell_width: Real, inline_capacity: usize) -> Self {
        let dims = GridDims::new(size);
        Self {
            dims,
            cell_width,
            cells: (0..dims.cell_count())
                .map(|_| GridCell::with_capacity(inline_capacity))
                .collect(),
        }
    }

    #[inline(always)]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline(always)]
    pub fn cell_width(&self) -> Real {
        self.cell_width
    }

    /// `floor(position / cell_width)` per axis. May lie outside the grid.
    #[inline(always)]
    pub fn bucket_index(&self, position: Vector) -> GridCoord {
        (position / self.cell_width).floor().as_ivec3()
    }

    /// Cell index for a position, `None` when it falls outside the grid.
    #[inline]
    pub fn cell_index_for(&self, position: Vector) -> Option<usize> {
        self.dims.linear_index(self.bucket_index(position))
    }

    /// Store a particle in the cell its position maps to.
    ///
    /// Never rejects: a full cell spills into overflow, and a position
    /// outside the grid is assigned to the nearest edge cell.
    pub fn insert(&mut self, particle: Particle) -> Placement {
        let bucket = self.bucket_index(particle.position);
        let clamped = !self.dims.contains(bucket);
        let cell = self.dims.clamped_index(bucket);
        let spilled = self.cells[cell].push(particle);
        Placement {
            cell,
            spilled,
            clamped,
        }
    }

    #[inline(always)]
    pub fn cell(&self, index: usize) -> Option<&GridCell> {
        self.cells.get(index)
    }

    #[inline(always)]
    pub fn cell_mut(&mut self, index: usize) -> Option<&mut GridCell> {
        self.cells.get_mut(index)
    }

    pub fn cell_at(&self, coord: GridCoord) -> Option<&GridCell> {
        self.dims.linear_index(coord).and_then(|index| self.cells.get(index))
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    #[inline(always)]
    pub fn cell_len(&self, index: usize) -> usize {
        self.cells.get(index).map_or(0, GridCell::len)
    }

    pub fn for_each_in_cell<F: FnMut(&Particle)>(&self, index: usize, f: F) {
        if let Some(cell) = self.cells.get(index) {
            cell.for_each(f);
        }
    }

    /// Visit each in-bounds cell of the 3x3x3 block around `center`.
    pub fn for_each_neighbor_cell<F>(&self, center: GridCoord, mut f: F)
    where
        F: FnMut(GridCoord, &GridCell),
    {
        for offset in NEIGHBOR_OFFSETS {
            let coord = center + offset;
            if let Some(index) = self.dims.linear_index(coord) {
                f(coord, &self.cells[index]);
            }
        }
    }

    #[inline]
    pub fn particle(&self, at: ParticleRef) -> Option<&Particle> {
        self.cells.get(at.cell).and_then(|cell| cell.get(at.slot))
    }

    #[inline]
    pub fn particle_mut(&mut self, at: ParticleRef) -> Option<&mut Particle> {
        self.cells.get_mut(at.cell).and_then(|cell| cell.get_mut(at.slot))
    }

    /// Mutable access to both members of a candidate pair.
    pub fn pair_mut(&mut self, a: ParticleRef, b: ParticleRef) -> Option<PairMut<'_>> {
        if a == b {
            return self.particle_mut(a).map(PairMut::Same);
        }
        if a.cell == b.cell {
            let (pa, pb) = self.cells.get_mut(a.cell)?.pair_mut(a.slot, b.slot)?;
            return Some(PairMut::Distinct(pa, pb));
        }
        if a.cell.max(b.cell) >= self.cells.len() {
            return None;
        }
        let (cell_a, cell_b) = if a.cell < b.cell {
            let (head, tail) = self.cells.split_at_mut(b.cell);
            (&mut head[a.cell], &mut tail[0])
        } else {
            let (head, tail) = self.cells.split_at_mut(a.cell);
            (&mut tail[0], &mut head[b.cell])
        };
        Some(PairMut::Distinct(
            cell_a.get_mut(a.slot)?,
            cell_b.get_mut(b.slot)?,
        ))
    }

    /// Visit every particle in grid order: cells by linear index, inline
    /// slots before overflow within a cell.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.cells.iter().flat_map(GridCell::iter)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.cells.iter_mut().flat_map(GridCell::iter_mut)
    }

    pub fn for_each_particle<F: FnMut(&Particle)>(&self, f: F) {
        self.iter().for_each(f);
    }

    pub fn for_each_particle_mut<F: FnMut(&mut Particle)>(&mut self, f: F) {
        self.iter_mut().for_each(f);
    }

    /// Total particles across all cells, inline and overflow.
    pub fn len(&self) -> usize {
        self.cells.iter().map(GridCell::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(GridCell::is_empty)
    }

    pub fn overflow_len(&self) -> usize {
        self.cells.iter().map(GridCell::overflow_len).sum()
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Empty every cell without releasing storage.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Move every particle into `target`, re-bucketed by current position.
    /// Returns how many particles had to be clamped into edge cells.
    pub fn drain_into(&mut self, target: &mut Grid) -> usize {
        let mut clamped = 0;
        for cell in &mut self.cells {
            for particle in cell.drain() {
                if target.insert(particle).clamped {
                    clamped += 1;
                }
            }
        }
        clamped
    }
}
