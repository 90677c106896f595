//! Folding into the canonical domain and neighbor resolution.
//!
//! A canonical position `p` has `2 * D` von Neumann neighbors in full space.
//! Each one folds to a canonical position of the form `p ± e_axis`; several
//! real neighbors may fold onto the same slot. For every slot we record how
//! many real neighbors it stands for (`symmetry_count`) and how many real
//! neighbors of the target fold back onto `p` (`share_multiplier`).

use std::collections::HashMap;

/// Folds full-space coordinates into the canonical domain.
#[inline]
pub fn canonicalize<const D: usize>(coords: [i64; D]) -> [usize; D] {
    let mut folded = coords.map(|c| c.unsigned_abs() as usize);
    folded.sort_unstable_by(|a, b| b.cmp(a));
    folded
}

/// Number of full-space positions that fold onto `position`.
pub fn orbit_size<const D: usize>(position: &[usize; D]) -> u32 {
    let nonzero = position.iter().filter(|&&c| c != 0).count() as u32;
    let mut permutations = factorial(D as u32);
    let mut run = 1;
    for i in 1..=D {
        if i < D && position[i] == position[i - 1] {
            run += 1;
        } else {
            permutations /= factorial(run);
            run = 1;
        }
    }
    (1u32 << nonzero) * permutations
}

fn factorial(n: u32) -> u32 {
    (1..=n).product()
}

/// One canonical neighbor slot of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NeighborSlot {
    pub axis: usize,
    /// `1` or `-1`.
    pub delta: i8,
    pub symmetry_count: u32,
    pub share_multiplier: u32,
}

impl NeighborSlot {
    /// Canonical coordinates of the slot's target.
    #[inline]
    pub fn target<const D: usize>(&self, position: &[usize; D]) -> [usize; D] {
        let mut target = *position;
        if self.delta > 0 {
            target[self.axis] += 1;
        } else {
            target[self.axis] -= 1;
        }
        target
    }

    /// Which slice the target lives in, relative to the position's slice.
    #[inline]
    pub fn slice_offset(&self) -> i8 {
        if self.axis == 0 {
            self.delta
        } else {
            0
        }
    }

    /// Whether the target lies one slice further from the origin.
    #[inline]
    pub fn is_outward(&self) -> bool {
        self.axis == 0 && self.delta > 0
    }
}

fn folded_neighbors<const D: usize>(position: &[usize; D]) -> impl Iterator<Item = [usize; D]> {
    let signed = position.map(|c| c as i64);
    (0..D).flat_map(move |axis| {
        [1i64, -1].into_iter().map(move |delta| {
            let mut neighbor = signed;
            neighbor[axis] += delta;
            canonicalize(neighbor)
        })
    })
}

/// Resolves the neighbor slots of a canonical position by folding every
/// real neighbor.
pub fn resolve_neighbors<const D: usize>(position: &[usize; D]) -> Vec<NeighborSlot> {
    let mut slots: Vec<NeighborSlot> = Vec::with_capacity(2 * D);
    for target in folded_neighbors(position) {
        let Some(axis) = (0..D).find(|&a| target[a] != position[a]) else {
            debug_assert!(false, "neighbor of {:?} folded onto itself", position);
            continue;
        };
        let delta = if target[axis] > position[axis] { 1 } else { -1 };
        if let Some(slot) = slots
            .iter_mut()
            .find(|s| s.axis == axis && s.delta == delta)
        {
            slot.symmetry_count += 1;
            continue;
        }
        let share_multiplier = folded_neighbors(&target)
            .filter(|back| back == position)
            .count() as u32;
        slots.push(NeighborSlot {
            axis,
            delta,
            symmetry_count: 1,
            share_multiplier,
        });
    }
    slots
}

/// Shape class of a canonical position.
///
/// Gaps between adjacent coordinates and the last coordinate, clamped to
/// `0`, `1` or `2+`. Corners, diagonal edges, faces and the interior each map
/// to their own classes, and every position of one class has the same
/// neighbor slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionType<const D: usize> {
    gaps: [u8; D],
}

impl<const D: usize> PositionType<D> {
    pub fn of(position: &[usize; D]) -> Self {
        let mut gaps = [0u8; D];
        for (i, gap) in gaps.iter_mut().enumerate() {
            let next = if i + 1 < D { position[i + 1] } else { 0 };
            *gap = position[i].saturating_sub(next).min(2) as u8;
        }
        Self { gaps }
    }

    pub fn gaps(&self) -> [u8; D] {
        self.gaps
    }

    /// Every coordinate at least two apart from its neighbors and from zero.
    pub fn is_interior(&self) -> bool {
        self.gaps.iter().all(|&g| g == 2)
    }
}

/// Neighbor slots resolved once per position type.
#[derive(Debug, Default)]
pub struct NeighborPatterns<const D: usize> {
    patterns: HashMap<PositionType<D>, Vec<NeighborSlot>>,
}

impl<const D: usize> NeighborPatterns<D> {
    pub fn new() -> Self {
        Self {
            patterns: HashMap::new(),
        }
    }

    pub fn slots(&mut self, position: &[usize; D]) -> &[NeighborSlot] {
        self.patterns
            .entry(PositionType::of(position))
            .or_insert_with(|| resolve_neighbors(position))
    }

    /// Number of position types seen so far.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
