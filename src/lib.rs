//! Aether Automata - symmetric toppling cellular automata
//!
//! A single source of value at the origin topples into its von Neumann
//! neighbors with exact integer arithmetic. Only the fundamental domain of
//! the grid's symmetry group is stored and stepped; the full grid is read
//! back by folding coordinates into it.
//!
//! The library is usable from Rust through [`models`] and from C through the
//! [`ffi`] functions on `i64` models.

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;
pub mod models;
pub mod number;
pub mod snapshot;
pub mod state;

pub use automaton::{FullSpaceView, GridTopology};
pub use config::{run, RunConfig, RunSummary};
pub use error::{AetherError, AetherResult};
pub use models::{
    Aether, Aether1D, Aether2D, Aether3D, Aether4D, Aether5D, AlternationCompliance,
    AlternationCompliance1D, AlternationCompliance2D, AlternationCompliance3D,
    AlternationCompliance4D, ComplianceSnapshot, CubicGrid3D, Enclosed3D, Model,
};
pub use number::CellValue;
pub use snapshot::Snapshot;
pub use state::AetherState;

#[cfg(test)]
mod tests;
