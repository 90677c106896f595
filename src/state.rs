//! Model core shared by every grid variant.

use tracing::{debug, info};

use crate::automaton::grid::{is_canonical, AnisotropicGrid};
use crate::automaton::stepping::{self, StepReport};
use crate::automaton::symmetry::{canonicalize, orbit_size, NeighborPatterns};
use crate::automaton::topology::GridTopology;
use crate::error::{AetherError, AetherResult};
use crate::number::CellValue;
use crate::snapshot::Snapshot;

/// Grid, counters and cached neighbor patterns of one aether model.
#[derive(Debug)]
pub struct AetherState<T, const D: usize> {
    pub(crate) grid: AnisotropicGrid<T, D>,
    pub(crate) topology: GridTopology,
    pub(crate) initial_value: T,
    pub(crate) step: u64,
    pub(crate) max_x: usize,
    pub(crate) changed: Option<bool>,
    patterns: NeighborPatterns<D>,
}

impl<T: CellValue, const D: usize> AetherState<T, D> {
    /// Single source of `initial_value` at the origin.
    pub fn new(initial_value: T, topology: GridTopology) -> AetherResult<Self> {
        Self::check_dimension()?;
        topology.validate()?;
        T::check_initial_value(&initial_value, D)?;

        let max_x = topology.initial_max_x();
        let mut grid = AnisotropicGrid::allocate(topology.storage_edge(max_x));
        if let Some(origin) = grid.get_mut(&[0; D]) {
            *origin = initial_value.clone();
        }

        info!(
            dimension = D,
            topology = ?topology,
            initial_value = %initial_value,
            cell_type = T::TYPE_NAME,
            "aether_model_created"
        );

        Ok(Self::from_parts(grid, topology, initial_value, 0, max_x, None))
    }

    /// Grids need at least one axis; the cell type may restrict further.
    pub(crate) fn check_dimension() -> AetherResult<()> {
        if D == 0 {
            return Err(AetherError::UnsupportedDimension {
                dimension: D,
                cell_type: T::TYPE_NAME,
            });
        }
        Ok(())
    }

    pub(crate) fn from_parts(
        grid: AnisotropicGrid<T, D>,
        topology: GridTopology,
        initial_value: T,
        step: u64,
        max_x: usize,
        changed: Option<bool>,
    ) -> Self {
        Self {
            grid,
            topology,
            initial_value,
            step,
            max_x,
            changed,
            patterns: NeighborPatterns::new(),
        }
    }

    /// Advances one generation. Returns whether any cell toppled.
    pub fn next_step(&mut self) -> bool {
        self.next_step_observed(|_, _| {})
    }

    /// Advances one generation, reporting every visited position and
    /// whether it toppled.
    pub fn next_step_observed<F>(&mut self, observe: F) -> bool
    where
        F: FnMut(&[usize; D], bool),
    {
        let grid = std::mem::replace(&mut self.grid, AnisotropicGrid::from_slices(Vec::new()));
        let (next, report) =
            stepping::advance(grid, &self.topology, self.max_x, &mut self.patterns, observe);
        self.grid = next;
        self.record(report);
        report.changed
    }

    fn record(&mut self, report: StepReport) {
        if report.frontier_reached {
            self.max_x += 1;
        }
        self.step += 1;
        self.changed = Some(report.changed);
        debug!(
            step = self.step,
            max_x = self.max_x,
            changed = report.changed,
            toppled_cells = report.toppled_cells,
            "aether_step"
        );
    }

    /// Value at full-space coordinates. Positions outside storage are zero.
    pub fn get_from_position(&self, coords: [i64; D]) -> T {
        self.value_at_canonical(&canonicalize(coords))
    }

    /// Value at canonical coordinates, zero outside storage.
    pub fn value_at_canonical(&self, canonical: &[usize; D]) -> T {
        self.grid.get(canonical).cloned().unwrap_or_else(T::zero)
    }

    /// Value at canonical coordinates without folding.
    ///
    /// Unbounded models read zero past their storage; bounded models reject
    /// coordinates past the wall.
    pub fn get_from_asymmetric_position(&self, coords: &[usize; D]) -> AetherResult<T> {
        if !is_canonical(coords) {
            return Err(AetherError::NotCanonical {
                coords: coords.to_vec(),
            });
        }
        match self.grid.get(coords) {
            Some(value) => Ok(value.clone()),
            None if !self.topology.is_bounded() => Ok(T::zero()),
            None => Err(AetherError::OutOfBounds {
                coords: coords.to_vec(),
                edge: self.grid.edge(),
            }),
        }
    }

    /// Highest canonical `x` that may hold a nonzero value.
    pub fn asymmetric_max_x(&self) -> usize {
        self.max_x
    }

    /// Last slice the next step will visit.
    pub fn traversal_edge(&self) -> usize {
        self.topology.traversal_edge(self.max_x)
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    /// `None` until the first step has run.
    pub fn changed(&self) -> Option<bool> {
        self.changed
    }

    pub fn initial_value(&self) -> &T {
        &self.initial_value
    }

    pub fn topology(&self) -> GridTopology {
        self.topology
    }

    pub fn grid(&self) -> &AnisotropicGrid<T, D> {
        &self.grid
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot::capture(self)
    }

    pub fn restore(snapshot: Snapshot<T>) -> AetherResult<Self> {
        snapshot.restore()
    }

    /// Sum over full space, each canonical cell weighted by its orbit.
    pub fn total_mass(&self) -> T {
        self.grid.iter().fold(T::zero(), |sum, (position, value)| {
            sum + value.clone() * T::from_count(orbit_size(&position))
        })
    }
}
