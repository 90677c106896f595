//! Region extraction.

use super::AetherHandle;
use crate::automaton::region::region_len;

/// Extracts the half-open box `min..max` into a flat output buffer.
///
/// # Layout
/// The buffer is filled in z,y,x order (z changes slowest, x changes fastest).
/// 2D models ignore `min_z` and `max_z` and fill in y,x order.
///
/// # Safety
/// - `ptr` must be a valid model pointer, or null
/// - `out_buf` must point to at least as many `i64` values as the box holds
///
/// # Returns
/// Number of values written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn aether_extract_region(
    ptr: *const AetherHandle,
    out_buf: *mut i64,
    min_x: i64,
    min_y: i64,
    min_z: i64,
    max_x: i64,
    max_y: i64,
    max_z: i64,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let handle = &*ptr;
    let len = if handle.dimension() == 2 {
        region_len(&[min_x, min_y], &[max_x, max_y])
    } else {
        region_len(&[min_x, min_y, min_z], &[max_x, max_y, max_z])
    };
    if len == 0 {
        return 0;
    }

    let buf_slice = std::slice::from_raw_parts_mut(out_buf, len);
    handle.extract(buf_slice, [min_x, min_y, min_z], [max_x, max_y, max_z]) as u64
}
