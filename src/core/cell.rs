//! Two-tier grid cell storage
//!
//! A cell keeps up to `inline_capacity` particles in a buffer reserved
//! up front, and spills anything beyond that into an overflow list. Both
//! buffers keep their allocation across `clear`, so a cell that was
//! sized once at startup never reallocates in steady state.

use super::particle::Particle;

#[derive(Clone, Debug)]
pub struct GridCell {
    inline: Vec<Particle>,
    overflow: Vec<Particle>,
    inline_capacity: usize,
}

impl GridCell {
    pub fn with_capacity(inline_capacity: usize) -> Self {
        Self {
            inline: Vec::with_capacity(inline_capacity),
            overflow: Vec::new(),
            inline_capacity,
        }
    }

    /// Store a particle. Returns `true` when it landed in overflow.
    #[inline]
    pub fn push(&mut self, particle: Particle) -> bool {
        if self.inline.len() < self.inline_capacity {
            self.inline.push(particle);
            false
        } else {
            self.overflow.push(particle);
            true
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inline.len() + self.overflow.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inline.is_empty() && self.overflow.is_empty()
    }

    #[inline(always)]
    pub fn inline_len(&self) -> usize {
        self.inline.len()
    }

    #[inline(always)]
    pub fn overflow_len(&self) -> usize {
        self.overflow.len()
    }

    pub fn inline_capacity(&self) -> usize {
        self.inline_capacity
    }

    /// Slots `0..inline_len()` address inline storage, the rest overflow.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<&Particle> {
        match slot.checked_sub(self.inline.len()) {
            None => self.inline.get(slot),
            Some(spill) => self.overflow.get(spill),
        }
    }

    #[inline]
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Particle> {
        match slot.checked_sub(self.inline.len()) {
            None => self.inline.get_mut(slot),
            Some(spill) => self.overflow.get_mut(spill),
        }
    }

    /// Mutable access to two different slots of this cell.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Particle, &mut Particle)> {
        if a == b {
            return None;
        }
        let split = self.inline.len();
        match (a < split, b < split) {
            (true, true) => two_mut(&mut self.inline, a, b),
            (false, false) => two_mut(&mut self.overflow, a - split, b - split),
            (true, false) => Some((
                self.inline.get_mut(a)?,
                self.overflow.get_mut(b - split)?,
            )),
            (false, true) => Some((
                self.overflow.get_mut(a - split)?,
                self.inline.get_mut(b)?,
            )),
        }
    }

    /// Inline particles first, then overflow.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.inline.iter().chain(self.overflow.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.inline.iter_mut().chain(self.overflow.iter_mut())
    }

    pub fn for_each<F: FnMut(&Particle)>(&self, f: F) {
        self.iter().for_each(f);
    }

    pub fn for_each_mut<F: FnMut(&mut Particle)>(&mut self, f: F) {
        self.iter_mut().for_each(f);
    }

    /// Move every particle out, leaving the cell empty with its storage intact.
    pub fn drain(&mut self) -> impl Iterator<Item = Particle> + '_ {
        self.inline.drain(..).chain(self.overflow.drain(..))
    }

    #[inline]
    pub fn clear(&mut self) {
        self.inline.clear();
        self.overflow.clear();
    }
}

fn two_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a.max(b) >= items.len() {
        return None;
    }
    if a < b {
        let (head, tail) = items.split_at_mut(b);
        Some((&mut head[a], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(a);
        Some((&mut tail[0], &mut head[b]))
    }
}
