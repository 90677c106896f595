//! C ABI over the `i64` models.
//!
//! Every model lives behind an opaque [`AetherHandle`] pointer. The functions
//! are thin wrappers that handle null checks, pointer safety and C-to-Rust
//! conversions; the logic lives in `models` and `automaton`.

pub mod grid;
pub mod lifecycle;
pub mod region;

pub use grid::{
    aether_get, aether_get_asymmetric_max_x, aether_get_changed, aether_get_dimension,
    aether_next_step,
};
pub use lifecycle::{
    aether_create_2d, aether_create_3d, aether_create_cubic_3d, aether_create_enclosed_3d,
    aether_destroy, aether_get_step,
};
pub use region::aether_extract_region;

use crate::automaton::region::{extract_region, FullSpaceView};
use crate::models::{Aether2D, Aether3D, CubicGrid3D, Enclosed3D, Model};

/// A model owned by C code.
#[derive(Debug)]
pub enum AetherHandle {
    Infinite2D(Aether2D<i64>),
    Infinite3D(Aether3D<i64>),
    /// Read with cube coordinates `0..side`.
    Cubic3D(CubicGrid3D<i64>),
    Enclosed3D(Enclosed3D<i64>),
}

impl AetherHandle {
    pub(crate) fn model(&self) -> &dyn Model {
        match self {
            AetherHandle::Infinite2D(m) => m,
            AetherHandle::Infinite3D(m) => m,
            AetherHandle::Cubic3D(m) => m,
            AetherHandle::Enclosed3D(m) => m,
        }
    }

    pub(crate) fn model_mut(&mut self) -> &mut dyn Model {
        match self {
            AetherHandle::Infinite2D(m) => m,
            AetherHandle::Infinite3D(m) => m,
            AetherHandle::Cubic3D(m) => m,
            AetherHandle::Enclosed3D(m) => m,
        }
    }

    pub(crate) fn dimension(&self) -> u32 {
        match self {
            AetherHandle::Infinite2D(_) => 2,
            _ => 3,
        }
    }

    /// Value at `(x, y, z)`; 2D models ignore `z`.
    pub(crate) fn get(&self, x: i64, y: i64, z: i64) -> i64 {
        match self {
            AetherHandle::Infinite2D(m) => m.value_at([x, y]),
            AetherHandle::Infinite3D(m) => m.value_at([x, y, z]),
            AetherHandle::Cubic3D(m) => m.value_at([x, y, z]),
            AetherHandle::Enclosed3D(m) => m.value_at([x, y, z]),
        }
    }

    pub(crate) fn extract(&self, out_buf: &mut [i64], min: [i64; 3], max: [i64; 3]) -> usize {
        match self {
            AetherHandle::Infinite2D(m) => {
                extract_region(m, out_buf, [min[0], min[1]], [max[0], max[1]])
            }
            AetherHandle::Infinite3D(m) => extract_region(m, out_buf, min, max),
            AetherHandle::Cubic3D(m) => extract_region(m, out_buf, min, max),
            AetherHandle::Enclosed3D(m) => extract_region(m, out_buf, min, max),
        }
    }
}
