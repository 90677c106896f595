//! Model creation, destruction and step queries.

use tracing::warn;

use super::AetherHandle;
use crate::error::AetherResult;
use crate::models::{Aether2D, Aether3D, CubicGrid3D, Enclosed3D};

fn into_raw(built: AetherResult<AetherHandle>) -> *mut AetherHandle {
    match built {
        Ok(handle) => Box::into_raw(Box::new(handle)),
        Err(err) => {
            warn!(error = %err, "aether_create_failed");
            std::ptr::null_mut()
        }
    }
}

/// Creates an infinite 2D model with `initial_value` at the origin.
///
/// # Returns
/// A pointer to a new model, or null if the initial value is out of range.
/// Free it with `aether_destroy()`.
#[no_mangle]
pub extern "C" fn aether_create_2d(initial_value: i64) -> *mut AetherHandle {
    into_raw(Aether2D::new(initial_value).map(AetherHandle::Infinite2D))
}

/// Creates an infinite 3D model with `initial_value` at the origin.
///
/// # Returns
/// A pointer to a new model, or null if the initial value is out of range.
#[no_mangle]
pub extern "C" fn aether_create_3d(initial_value: i64) -> *mut AetherHandle {
    into_raw(Aether3D::new(initial_value).map(AetherHandle::Infinite3D))
}

/// Creates a closed cube of `side` cells per axis with the source at its center.
///
/// # Returns
/// A pointer to a new model, or null if `side` is even, below 13, or the
/// initial value is out of range.
#[no_mangle]
pub extern "C" fn aether_create_cubic_3d(side: u32, initial_value: i64) -> *mut AetherHandle {
    into_raw(CubicGrid3D::new(side as usize, initial_value).map(AetherHandle::Cubic3D))
}

/// Creates an absorbing cube of `side` cells per axis centered on the origin.
///
/// # Returns
/// A pointer to a new model, or null on invalid arguments.
#[no_mangle]
pub extern "C" fn aether_create_enclosed_3d(initial_value: i64, side: u32) -> *mut AetherHandle {
    into_raw(Enclosed3D::new(initial_value, side as usize).map(AetherHandle::Enclosed3D))
}

/// Destroys a model and frees its memory.
///
/// # Safety
/// - `ptr` must be a pointer returned by one of the `aether_create_*` functions, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn aether_destroy(ptr: *mut AetherHandle) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the step counter of a model.
///
/// # Safety
/// - `ptr` must be a valid model pointer, or null
///
/// # Returns
/// The step counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn aether_get_step(ptr: *const AetherHandle) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).model().step()
}
