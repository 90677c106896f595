//! One generation of toppling over the canonical domain.
//!
//! The previous generation is consumed slice by slice through a three slice
//! window (`x - 1`, `x`, `x + 1`); a slice is dropped as soon as the window
//! moves past it. The next generation is written through a window of the
//! same shape and committed slice by slice.

use std::mem;

use super::grid::{slice_index, AnisotropicGrid, SlicePositions};
use super::symmetry::NeighborPatterns;
use super::topology::{GridTopology, WallPolicy};
use super::topple::{accumulate, topple, Neighbor};
use crate::number::CellValue;

/// Summary of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Some cell toppled.
    pub changed: bool,
    /// A cell at or past `max_x` toppled, so the occupied region grew.
    pub frontier_reached: bool,
    pub toppled_cells: u64,
}

/// Slices `x - 1`, `x` and `x + 1`.
struct SliceWindow<T> {
    slices: [Vec<T>; 3],
}

impl<T> SliceWindow<T> {
    fn new(current: Vec<T>, greater: Vec<T>) -> Self {
        Self {
            slices: [Vec::new(), current, greater],
        }
    }

    /// Moves the window one slice outwards, returning the slice that left it.
    fn advance(&mut self, incoming: Vec<T>) -> Vec<T> {
        self.slices.rotate_left(1);
        mem::replace(&mut self.slices[2], incoming)
    }

    #[inline]
    fn slice(&self, offset: i8) -> &[T] {
        &self.slices[(offset + 1) as usize]
    }

    #[inline]
    fn slice_mut(&mut self, offset: i8) -> &mut [T] {
        &mut self.slices[(offset + 1) as usize]
    }

    fn into_slices(self) -> [Vec<T>; 3] {
        self.slices
    }
}

/// Topples every canonical cell once and returns the next generation.
///
/// `observe` is called for every visited position with whether it toppled.
pub fn advance<T, const D: usize, F>(
    grid: AnisotropicGrid<T, D>,
    topology: &GridTopology,
    max_x: usize,
    patterns: &mut NeighborPatterns<D>,
    mut observe: F,
) -> (AnisotropicGrid<T, D>, StepReport)
where
    T: CellValue,
    F: FnMut(&[usize; D], bool),
{
    let wall = topology.wall();
    let policy = topology.wall_policy();
    let last_x = topology.traversal_edge(max_x);
    let new_edge = topology.storage_edge(max_x);
    let next_slice = |x: usize| {
        if x <= new_edge {
            AnisotropicGrid::<T, D>::zeroed_slice(x)
        } else {
            Vec::new()
        }
    };

    let mut source = grid.into_slices().into_iter();
    let first = source.next().unwrap_or_default();
    let second = source.next().unwrap_or_default();
    let mut old = SliceWindow::new(first, second);
    let mut new = SliceWindow::new(next_slice(0), next_slice(1));
    let mut committed: Vec<Vec<T>> = Vec::with_capacity(new_edge + 2);

    let mut report = StepReport::default();
    let mut neighbors: Vec<Neighbor<T>> = Vec::with_capacity(2 * D);

    for x in 0..=last_x {
        let at_wall = wall == Some(x);
        for (index, position) in SlicePositions::<D>::new(x).enumerate() {
            let value = old.slice(0)[index].clone();
            let slots = patterns.slots(&position);

            neighbors.clear();
            for (slot_index, slot) in slots.iter().enumerate() {
                let neighbor_value = if at_wall && slot.is_outward() {
                    match policy {
                        Some(WallPolicy::Absorbing) => T::zero(),
                        _ => continue,
                    }
                } else {
                    let target = slot.target(&position);
                    old.slice(slot.slice_offset())[slice_index(&target[1..])].clone()
                };
                if neighbor_value < value {
                    neighbors.push(Neighbor::new(
                        neighbor_value,
                        slot.symmetry_count,
                        slot.share_multiplier,
                        slot_index,
                    ));
                }
            }

            let outcome = topple(value, &mut neighbors);
            accumulate(&mut new.slice_mut(0)[index], outcome.kept);
            for neighbor in neighbors.drain(..) {
                let slot = slots[neighbor.slot];
                if neighbor.received.is_zero() || (at_wall && slot.is_outward()) {
                    continue;
                }
                let target = slot.target(&position);
                let cell = &mut new.slice_mut(slot.slice_offset())[slice_index(&target[1..])];
                accumulate(cell, neighbor.received);
            }

            if outcome.toppled {
                report.changed = true;
                report.toppled_cells += 1;
                if wall.is_none() && x >= max_x {
                    report.frontier_reached = true;
                }
            }
            observe(&position, outcome.toppled);
        }

        drop(old.advance(source.next().unwrap_or_default()));
        let finished = new.advance(next_slice(x + 2));
        if x > 0 {
            committed.push(finished);
        }
    }

    let [last, beyond, _] = new.into_slices();
    committed.push(last);
    if last_x < new_edge {
        committed.push(beyond);
    }
    if report.frontier_reached {
        committed.push(AnisotropicGrid::<T, D>::zeroed_slice(committed.len()));
    }

    (AnisotropicGrid::from_slices(committed), report)
}
