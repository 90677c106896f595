//! Error types for model construction and restore.
//!
//! Stepping itself never fails; every error here is raised while building or
//! restoring a model, or when a caller asks for coordinates the storage does
//! not cover.

use thiserror::Error;

/// Errors produced by the aether models.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AetherError {
    /// Bounded grids need a center cell.
    #[error("grid side must be odd, got {side}")]
    EvenSide { side: usize },

    #[error("grid side must be at least {min}, got {side}")]
    SideTooSmall { side: usize, min: usize },

    /// The fixed-width cell type could overflow with this source value.
    #[error("initial value {value} is outside [{min}, {max}] for {dimension}D")]
    InitialValueOutOfRange {
        value: String,
        min: String,
        max: String,
        dimension: usize,
    },

    #[error("no overflow bound is known for {dimension}D with {cell_type} cells")]
    UnsupportedDimension {
        dimension: usize,
        cell_type: &'static str,
    },

    /// Coordinates passed as asymmetric were not sorted descending.
    #[error("coordinates {coords:?} are not in canonical order")]
    NotCanonical { coords: Vec<usize> },

    #[error("coordinates {coords:?} are outside the stored edge {edge}")]
    OutOfBounds { coords: Vec<usize>, edge: usize },

    #[error("incompatible snapshot: {reason}")]
    IncompatibleSnapshot { reason: String },
}

/// Result type for aether operations.
pub type AetherResult<T> = Result<T, AetherError>;
