//! Checkerboard alternation of toppling.
//!
//! Positions are split by the parity of their coordinate sum. On each step
//! one parity is expected to topple and the other to rest; the turn flips
//! every step, and the first turn belongs to even positions when the source
//! is non-negative. The tracker records, for every position, whether its
//! behavior during the source's latest transition matched its turn.

use num_bigint::BigInt;
use num_traits::Signed;
use serde::{Deserialize, Serialize};

use super::Model;
use crate::automaton::grid::{is_canonical, AnisotropicGrid};
use crate::automaton::region::FullSpaceView;
use crate::automaton::symmetry::canonicalize;
use crate::automaton::topology::GridTopology;
use crate::error::{AetherError, AetherResult};
use crate::number::CellValue;
use crate::snapshot::{reject, Snapshot};
use crate::state::AetherState;

#[inline]
fn its_turn<const D: usize>(position: &[usize; D], even_turn: bool) -> bool {
    (position.iter().sum::<usize>() % 2 == 0) == even_turn
}

/// Whether even positions are expected to topple during the transition
/// that starts at `step`.
#[inline]
fn even_turn_from(initial_non_negative: bool, step: u64) -> bool {
    initial_non_negative == (step % 2 == 0)
}

/// Backup bundle of a compliance tracker.
///
/// Without a recorded grid, restoring advances the source once and records
/// that transition instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSnapshot<T> {
    pub source: Snapshot<T>,
    #[serde(default)]
    pub compliance: Option<Vec<Vec<bool>>>,
}

/// Compliance of every position with the expected toppling alternation.
#[derive(Debug)]
pub struct AlternationCompliance<T, const D: usize> {
    source: AetherState<T, D>,
    compliance: AnisotropicGrid<bool, D>,
    /// Turn of the recorded transition.
    even_turn: bool,
}

pub type AlternationCompliance1D<T = BigInt> = AlternationCompliance<T, 1>;
pub type AlternationCompliance2D<T = BigInt> = AlternationCompliance<T, 2>;
pub type AlternationCompliance3D<T = BigInt> = AlternationCompliance<T, 3>;
pub type AlternationCompliance4D<T = BigInt> = AlternationCompliance<T, 4>;

impl<T: CellValue, const D: usize> AlternationCompliance<T, D> {
    /// Tracks an infinite aether. The first transition is recorded here, so
    /// a new tracker is already at step 1.
    pub fn new(initial_value: T) -> AetherResult<Self> {
        Self::with_topology(initial_value, GridTopology::Infinite)
    }

    pub fn with_topology(initial_value: T, topology: GridTopology) -> AetherResult<Self> {
        let source = AetherState::new(initial_value, topology)?;
        Ok(Self::advance_from(source))
    }

    /// Records the transition starting at the source's current step.
    fn advance_from(mut source: AetherState<T, D>) -> Self {
        let non_negative = !source.initial_value().is_negative();
        let even_turn = even_turn_from(non_negative, source.step());
        let compliance = Self::record_transition(&mut source, even_turn);
        Self {
            source,
            compliance,
            even_turn,
        }
    }

    fn record_transition(source: &mut AetherState<T, D>, even_turn: bool) -> AnisotropicGrid<bool, D> {
        let mut compliance = AnisotropicGrid::filled(source.traversal_edge(), false);
        source.next_step_observed(|position, toppled| {
            if let Some(cell) = compliance.get_mut(position) {
                *cell = toppled == its_turn(position, even_turn);
            }
        });
        compliance
    }

    /// Records the source's next transition. Returns whether the source
    /// changed during it.
    pub fn next_step(&mut self) -> bool {
        self.even_turn = !self.even_turn;
        self.compliance = Self::record_transition(&mut self.source, self.even_turn);
        self.source.changed() == Some(true)
    }

    fn compliance_at(&self, canonical: &[usize; D]) -> bool {
        match self.compliance.get(canonical) {
            Some(&compliant) => compliant,
            None => !its_turn(canonical, self.even_turn),
        }
    }

    pub fn get_from_position(&self, coords: [i64; D]) -> bool {
        self.compliance_at(&canonicalize(coords))
    }

    pub fn get_from_asymmetric_position(&self, coords: &[usize; D]) -> AetherResult<bool> {
        if !is_canonical(coords) {
            return Err(AetherError::NotCanonical {
                coords: coords.to_vec(),
            });
        }
        Ok(self.compliance_at(coords))
    }

    /// Whether even positions were expected to topple in the recorded
    /// transition.
    pub fn even_positions_turn(&self) -> bool {
        self.even_turn
    }

    pub fn asymmetric_max_x(&self) -> usize {
        self.source.asymmetric_max_x()
    }

    pub fn max_x(&self) -> usize {
        self.source.asymmetric_max_x()
    }

    /// Step the source reached with the recorded transition.
    pub fn step(&self) -> u64 {
        self.source.step()
    }

    /// Whether the recorded transition changed the source.
    pub fn changed(&self) -> Option<bool> {
        self.source.changed()
    }

    pub fn initial_value(&self) -> &T {
        self.source.initial_value()
    }

    pub fn source(&self) -> &AetherState<T, D> {
        &self.source
    }

    pub fn compliance(&self) -> &AnisotropicGrid<bool, D> {
        &self.compliance
    }

    pub fn snapshot(&self) -> ComplianceSnapshot<T> {
        ComplianceSnapshot {
            source: Snapshot::capture(&self.source),
            compliance: Some(self.compliance.slices().to_vec()),
        }
    }

    pub fn restore(snapshot: ComplianceSnapshot<T>) -> AetherResult<Self> {
        let source: AetherState<T, D> = snapshot.source.restore()?;
        let Some(slices) = snapshot.compliance else {
            return Ok(Self::advance_from(source));
        };

        let step = source.step();
        if step == 0 {
            return Err(reject("compliance grid present at step 0".to_string()));
        }
        if let Some((x, found, expected)) = AnisotropicGrid::<bool, D>::shape_mismatch(&slices) {
            return Err(reject(format!(
                "compliance slice {} holds {} cells, expected {}",
                x, found, expected
            )));
        }
        let max_x = source.asymmetric_max_x();
        let edge = slices.len().checked_sub(1);
        if !matches!(edge, Some(edge) if edge == max_x || edge == max_x + 1) {
            return Err(reject(format!(
                "compliance grid of {} slices does not match max_x {}",
                slices.len(),
                max_x
            )));
        }

        let non_negative = !source.initial_value().is_negative();
        Ok(Self {
            even_turn: even_turn_from(non_negative, step - 1),
            compliance: AnisotropicGrid::from_slices(slices),
            source,
        })
    }
}

impl<T: CellValue, const D: usize> Model for AlternationCompliance<T, D> {
    fn next_step(&mut self) -> bool {
        AlternationCompliance::next_step(self)
    }

    fn step(&self) -> u64 {
        self.source.step()
    }

    fn changed(&self) -> Option<bool> {
        self.source.changed()
    }

    fn asymmetric_max_x(&self) -> usize {
        self.source.asymmetric_max_x()
    }
}

impl<T: CellValue, const D: usize> FullSpaceView<D> for AlternationCompliance<T, D> {
    type Value = bool;

    fn value_at(&self, coords: [i64; D]) -> bool {
        self.get_from_position(coords)
    }
}
