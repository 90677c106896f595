//! 3D aether inside an absorbing cube centered on the source.
//!
//! Flow toward cells past the wall is lost, so total mass shrinks once
//! toppling reaches the boundary.

use num_bigint::BigInt;

use super::Model;
use crate::automaton::region::FullSpaceView;
use crate::automaton::topology::GridTopology;
use crate::error::{AetherError, AetherResult};
use crate::number::CellValue;
use crate::snapshot::Snapshot;
use crate::state::AetherState;

#[derive(Debug)]
pub struct Enclosed3D<T = BigInt> {
    state: AetherState<T, 3>,
}

impl<T: CellValue> Enclosed3D<T> {
    /// `side` must be odd and at least 13.
    pub fn new(initial_value: T, side: usize) -> AetherResult<Self> {
        let state = AetherState::new(initial_value, GridTopology::Enclosed { side })?;
        Ok(Self { state })
    }

    pub fn next_step(&mut self) -> bool {
        self.state.next_step()
    }

    /// Origin-centered coordinates; cells past the wall read zero.
    pub fn get_from_position(&self, x: i64, y: i64, z: i64) -> T {
        self.state.get_from_position([x, y, z])
    }

    pub fn get_from_asymmetric_position(&self, x: usize, y: usize, z: usize) -> AetherResult<T> {
        self.state.get_from_asymmetric_position(&[x, y, z])
    }

    pub fn side(&self) -> usize {
        self.state.topology().side().unwrap_or_default()
    }

    pub fn asymmetric_max_x(&self) -> usize {
        self.state.asymmetric_max_x()
    }

    pub fn max_x(&self) -> usize {
        self.state.asymmetric_max_x()
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
        if !matches!(snapshot.topology, GridTopology::Enclosed { .. }) {
            return Err(AetherError::IncompatibleSnapshot {
                reason: format!("expected an enclosed grid, found {:?}", snapshot.topology),
            });
        }
        Ok(Self {
            state: snapshot.restore()?,
        })
    }
}

impl<T: CellValue> Model for Enclosed3D<T> {
    fn next_step(&mut self) -> bool {
        Enclosed3D::next_step(self)
    }

    fn step(&self) -> u64 {
        self.state.step()
    }

    fn changed(&self) -> Option<bool> {
        self.state.changed()
    }

    fn asymmetric_max_x(&self) -> usize {
        self.state.asymmetric_max_x()
    }
}

impl<T: CellValue> FullSpaceView<3> for Enclosed3D<T> {
    type Value = T;

    fn value_at(&self, coords: [i64; 3]) -> T {
        self.state.get_from_position(coords)
    }
}
