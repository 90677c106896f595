//! Backup bundle for pausing and resuming a model.
//!
//! A snapshot holds everything needed to continue a run: the grid, the step
//! counter, the occupied edge, the initial value and the last changed flag.
//! It derives serde traits; choosing a file format is left to the caller.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::automaton::grid::AnisotropicGrid;
use crate::automaton::topology::GridTopology;
use crate::error::{AetherError, AetherResult};
use crate::number::CellValue;
use crate::state::AetherState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub dimension: usize,
    pub topology: GridTopology,
    pub initial_value: T,
    pub step: u64,
    pub max_x: usize,
    pub changed: Option<bool>,
    /// Canonical slices `0..=edge`.
    pub slices: Vec<Vec<T>>,
}

pub(crate) fn reject(reason: String) -> AetherError {
    warn!(reason = %reason, "snapshot_rejected");
    AetherError::IncompatibleSnapshot { reason }
}

impl<T: CellValue> Snapshot<T> {
    pub fn capture<const D: usize>(state: &AetherState<T, D>) -> Self {
        Self {
            dimension: D,
            topology: state.topology,
            initial_value: state.initial_value.clone(),
            step: state.step,
            max_x: state.max_x,
            changed: state.changed,
            slices: state.grid.slices().to_vec(),
        }
    }

    /// Rebuilds a model, checking that the bundle is consistent.
    pub fn restore<const D: usize>(self) -> AetherResult<AetherState<T, D>> {
        if self.dimension != D {
            return Err(reject(format!(
                "snapshot is {}D, expected {}D",
                self.dimension, D
            )));
        }
        AetherState::<T, D>::check_dimension()?;
        self.topology.validate()?;
        T::check_initial_value(&self.initial_value, D)?;

        if let Some(wall) = self.topology.wall() {
            if self.max_x != wall {
                return Err(reject(format!(
                    "max_x {} does not match the wall at {}",
                    self.max_x, wall
                )));
            }
        }
        let expected_edge = self.topology.storage_edge(self.max_x);
        if self.slices.len() != expected_edge + 1 {
            return Err(reject(format!(
                "expected {} slices, found {}",
                expected_edge + 1,
                self.slices.len()
            )));
        }
        if let Some((x, found, expected)) = AnisotropicGrid::<T, D>::shape_mismatch(&self.slices) {
            return Err(reject(format!(
                "slice {} holds {} cells, expected {}",
                x, found, expected
            )));
        }

        info!(
            dimension = D,
            topology = ?self.topology,
            step = self.step,
            max_x = self.max_x,
            "aether_model_restored"
        );

        Ok(AetherState::from_parts(
            AnisotropicGrid::from_slices(self.slices),
            self.topology,
            self.initial_value,
            self.step,
            self.max_x,
            self.changed,
        ))
    }
}
