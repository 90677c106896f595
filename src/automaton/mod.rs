//! Core automaton logic over the canonical domain.
//!
//! Storage, neighbor resolution, the toppling rule and the step driver.
//! The model types in `models` and the FFI layer in `ffi` call into these.

pub mod grid;
pub mod region;
pub mod stepping;
pub mod symmetry;
pub mod topology;
pub mod topple;

pub use grid::AnisotropicGrid;
pub use region::{extract_region, region_values, FullSpaceView};
pub use stepping::{advance, StepReport};
pub use symmetry::{canonicalize, orbit_size, NeighborPatterns, NeighborSlot, PositionType};
pub use topology::{GridTopology, WallPolicy};
pub use topple::{topple, Neighbor, ToppleOutcome};
