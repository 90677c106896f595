//! Grid topologies and what happens at their boundary.

use serde::{Deserialize, Serialize};

use crate::error::{AetherError, AetherResult};

/// Smallest side accepted by bounded grids.
pub const MIN_BOUNDED_SIDE: usize = 13;

/// How the grid is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridTopology {
    /// Unbounded; storage grows one shell whenever toppling reaches the frontier.
    Infinite,
    /// Fixed cube of `side` cells per axis. Cells past the wall do not exist.
    FixedCube { side: usize },
    /// Fixed cube of `side` cells per axis. Flow past the wall is lost.
    Enclosed { side: usize },
}

/// Treatment of neighbor slots beyond a bounded grid's wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallPolicy {
    /// The slot is skipped entirely.
    Closed,
    /// The slot competes as a zero-valued cell and its shares are dropped.
    Absorbing,
}

impl GridTopology {
    pub fn validate(&self) -> AetherResult<()> {
        match *self {
            GridTopology::Infinite => Ok(()),
            GridTopology::FixedCube { side } | GridTopology::Enclosed { side } => {
                if side % 2 == 0 {
                    Err(AetherError::EvenSide { side })
                } else if side < MIN_BOUNDED_SIDE {
                    Err(AetherError::SideTooSmall {
                        side,
                        min: MIN_BOUNDED_SIDE,
                    })
                } else {
                    Ok(())
                }
            }
        }
    }

    pub fn side(&self) -> Option<usize> {
        match *self {
            GridTopology::Infinite => None,
            GridTopology::FixedCube { side } | GridTopology::Enclosed { side } => Some(side),
        }
    }

    /// Highest canonical `x` inside the wall.
    pub fn wall(&self) -> Option<usize> {
        self.side().map(|side| side / 2)
    }

    pub fn wall_policy(&self) -> Option<WallPolicy> {
        match self {
            GridTopology::Infinite => None,
            GridTopology::FixedCube { .. } => Some(WallPolicy::Closed),
            GridTopology::Enclosed { .. } => Some(WallPolicy::Absorbing),
        }
    }

    pub fn is_bounded(&self) -> bool {
        !matches!(self, GridTopology::Infinite)
    }

    /// `max_x` of a freshly created model.
    pub fn initial_max_x(&self) -> usize {
        self.wall().unwrap_or(0)
    }

    /// Highest stored slice for a model at `max_x`. Unbounded storage keeps
    /// two zero shells past `max_x`.
    pub fn storage_edge(&self, max_x: usize) -> usize {
        self.wall().unwrap_or(max_x + 2)
    }

    /// Last slice visited by a step.
    pub fn traversal_edge(&self, max_x: usize) -> usize {
        self.wall().unwrap_or(max_x + 1)
    }
}
