//! Stepping and cell queries.

use super::AetherHandle;

/// Advances a model by one step.
///
/// # Safety
/// - `ptr` must be a valid model pointer, or null
///
/// # Returns
/// 1 if any cell changed, 0 if the model is stable, -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn aether_next_step(ptr: *mut AetherHandle) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    i32::from((*ptr).model_mut().next_step())
}

/// Whether the last step changed anything.
///
/// # Safety
/// - `ptr` must be a valid model pointer, or null
///
/// # Returns
/// 1 or 0 after the first step, -1 before it or if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn aether_get_changed(ptr: *const AetherHandle) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    match (*ptr).model().changed() {
        Some(changed) => i32::from(changed),
        None => -1,
    }
}

/// Gets the highest `x` of the stored octant.
///
/// # Safety
/// - `ptr` must be a valid model pointer, or null
///
/// # Returns
/// The bound, or -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn aether_get_asymmetric_max_x(ptr: *const AetherHandle) -> i64 {
    if ptr.is_null() {
        return -1;
    }
    (*ptr).model().asymmetric_max_x() as i64
}

/// Gets the number of dimensions of a model (2 or 3), or 0 if ptr is null.
///
/// # Safety
/// - `ptr` must be a valid model pointer, or null
#[no_mangle]
pub unsafe extern "C" fn aether_get_dimension(ptr: *const AetherHandle) -> u32 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).dimension()
}

/// Gets the value of a cell.
///
/// Infinite and enclosed models take origin-centered coordinates; cubic
/// models take cube coordinates `0..side`. 2D models ignore `z`.
///
/// # Safety
/// - `ptr` must be a valid model pointer, or null
///
/// # Returns
/// The cell value, or 0 outside the model or if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn aether_get(ptr: *const AetherHandle, x: i64, y: i64, z: i64) -> i64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).get(x, y, z)
}
