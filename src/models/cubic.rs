//! 3D aether on a closed cube with the source at its center cell.
//!
//! Coordinates run `0..side` on every axis. The cube has no cells past its
//! faces, so toppling never sends anything outward and mass is conserved.

use num_bigint::BigInt;

use super::Model;
use crate::automaton::region::FullSpaceView;
use crate::automaton::symmetry::canonicalize;
use crate::automaton::topology::GridTopology;
use crate::error::{AetherError, AetherResult};
use crate::number::CellValue;
use crate::snapshot::Snapshot;
use crate::state::AetherState;

#[derive(Debug)]
pub struct CubicGrid3D<T = BigInt> {
    state: AetherState<T, 3>,
    side: usize,
    center: usize,
}

impl<T: CellValue> CubicGrid3D<T> {
    /// `side` must be odd and at least 13.
    pub fn new(side: usize, initial_value: T) -> AetherResult<Self> {
        let state = AetherState::new(initial_value, GridTopology::FixedCube { side })?;
        Ok(Self::wrap(state, side))
    }

    fn wrap(state: AetherState<T, 3>, side: usize) -> Self {
        Self {
            state,
            side,
            center: side / 2,
        }
    }

    pub fn next_step(&mut self) -> bool {
        self.state.next_step()
    }

    fn centered(&self, coords: [usize; 3]) -> AetherResult<[i64; 3]> {
        if coords.iter().any(|&c| c >= self.side) {
            return Err(AetherError::OutOfBounds {
                coords: coords.to_vec(),
                edge: self.side - 1,
            });
        }
        Ok(coords.map(|c| c as i64 - self.center as i64))
    }

    /// Value at cube coordinates.
    pub fn get_from_position(&self, x: usize, y: usize, z: usize) -> AetherResult<T> {
        let centered = self.centered([x, y, z])?;
        Ok(self.state.get_from_position(centered))
    }

    /// Value at cube coordinates inside the stored octant:
    /// `x >= y >= z >= side / 2`.
    pub fn get_from_asymmetric_position(&self, x: usize, y: usize, z: usize) -> AetherResult<T> {
        if [x, y, z].iter().any(|&c| c < self.center) {
            return Err(AetherError::OutOfBounds {
                coords: vec![x, y, z],
                edge: self.side - 1,
            });
        }
        self.state
            .get_from_asymmetric_position(&[x - self.center, y - self.center, z - self.center])
            .map_err(|err| match err {
                AetherError::NotCanonical { .. } => AetherError::NotCanonical {
                    coords: vec![x, y, z],
                },
                other => other,
            })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Cube coordinate of the source on every axis.
    pub fn source_coord(&self) -> usize {
        self.center
    }

    pub fn min_x(&self) -> usize {
        0
    }

    pub fn max_x(&self) -> usize {
        self.side - 1
    }

    pub fn asymmetric_min_x(&self) -> usize {
        self.center
    }

    pub fn asymmetric_max_x(&self) -> usize {
        self.side - 1
    }

    pub fn step(&self) -> u64 {
        self.state.step()
    }

    pub fn changed(&self) -> Option<bool> {
        self.state.changed()
    }

    pub fn initial_value(&self) -> &T {
        self.state.initial_value()
    }

    pub fn total_mass(&self) -> T {
        self.state.total_mass()
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot::capture(&self.state)
    }

    pub fn restore(snapshot: Snapshot<T>) -> AetherResult<Self> {
        let GridTopology::FixedCube { side } = snapshot.topology else {
            return Err(AetherError::IncompatibleSnapshot {
                reason: format!("expected a cubic grid, found {:?}", snapshot.topology),
            });
        };
        Ok(Self::wrap(snapshot.restore()?, side))
    }
}

impl<T: CellValue> Model for CubicGrid3D<T> {
    fn next_step(&mut self) -> bool {
        CubicGrid3D::next_step(self)
    }

    fn step(&self) -> u64 {
        self.state.step()
    }

    fn changed(&self) -> Option<bool> {
        self.state.changed()
    }

    fn asymmetric_max_x(&self) -> usize {
        self.side - 1
    }
}

impl<T: CellValue> FullSpaceView<3> for CubicGrid3D<T> {
    type Value = T;

    /// Cube coordinates; anything outside the cube reads zero.
    fn value_at(&self, coords: [i64; 3]) -> T {
        let center = self.center as i64;
        let mut centered = [0i64; 3];
        for (offset, c) in centered.iter_mut().zip(coords) {
            match c.checked_sub(center) {
                Some(value) => *offset = value,
                None => return T::zero(),
            }
        }
        let folded = canonicalize(centered);
        if folded[0] > self.center {
            return T::zero();
        }
        self.state.value_at_canonical(&folded)
    }
}
