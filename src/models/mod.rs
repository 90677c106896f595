//! Public model variants.
//!
//! Each variant wraps an [`AetherState`](crate::state::AetherState) with a
//! topology and the coordinate conventions callers expect from it.

pub mod compliance;
pub mod cubic;
pub mod enclosed;
pub mod infinite;

pub use compliance::{
    AlternationCompliance, AlternationCompliance1D, AlternationCompliance2D,
    AlternationCompliance3D, AlternationCompliance4D, ComplianceSnapshot,
};
pub use cubic::CubicGrid3D;
pub use enclosed::Enclosed3D;
pub use infinite::{Aether, Aether1D, Aether2D, Aether3D, Aether4D, Aether5D};

/// Step-level operations shared by every model.
pub trait Model {
    /// Advances one generation. Returns whether anything changed.
    fn next_step(&mut self) -> bool;

    fn step(&self) -> u64;

    /// `None` before the first step.
    fn changed(&self) -> Option<bool>;

    fn asymmetric_max_x(&self) -> usize;
}
