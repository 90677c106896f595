//! Region extraction for consumers that render full-space views.

use rayon::prelude::*;

use crate::number::CellValue;
use crate::state::AetherState;

/// Anything that can be read at full-space coordinates.
pub trait FullSpaceView<const D: usize> {
    type Value;

    fn value_at(&self, coords: [i64; D]) -> Self::Value;
}

impl<T: CellValue, const D: usize> FullSpaceView<D> for AetherState<T, D> {
    type Value = T;

    fn value_at(&self, coords: [i64; D]) -> T {
        self.get_from_position(coords)
    }
}

/// Per-axis sizes of the box, or `None` when they do not fit in memory
/// indices.
fn extents<const D: usize>(min: &[i64; D], max: &[i64; D]) -> Option<[usize; D]> {
    let mut extents = [0usize; D];
    for (axis, extent) in extents.iter_mut().enumerate() {
        let span = max[axis].checked_sub(min[axis])?.max(0);
        *extent = usize::try_from(span).ok()?;
    }
    Some(extents)
}

/// Number of cells in the half-open box `min..max`, or 0 when the box is
/// empty or too large to address.
pub fn region_len<const D: usize>(min: &[i64; D], max: &[i64; D]) -> usize {
    extents(min, max)
        .and_then(|extents| {
            extents
                .iter()
                .try_fold(1usize, |total, &extent| total.checked_mul(extent))
        })
        .unwrap_or(0)
}

/// Extract the half-open box `min..max` into a flat buffer.
///
/// # Layout
/// The first axis changes fastest and the last axis slowest, so a 3D box is
/// filled in z,y,x order.
///
/// # Returns
/// Number of cells written, or 0 if the box is empty or the buffer too small.
pub fn extract_region<V, const D: usize>(
    view: &V,
    out_buf: &mut [V::Value],
    min: [i64; D],
    max: [i64; D],
) -> usize
where
    V: FullSpaceView<D> + Sync,
    V::Value: Send,
{
    let total = region_len(&min, &max);
    if total == 0 || out_buf.len() < total {
        return 0;
    }
    let Some(extents) = extents(&min, &max) else {
        return 0;
    };

    out_buf[..total]
        .par_iter_mut()
        .enumerate()
        .for_each(|(offset, cell)| {
            let mut rest = offset;
            let mut coords = min;
            for axis in 0..D {
                coords[axis] += (rest % extents[axis]) as i64;
                rest /= extents[axis];
            }
            *cell = view.value_at(coords);
        });

    total
}

/// Extract the half-open box `min..max` into a new buffer.
pub fn region_values<V, const D: usize>(view: &V, min: [i64; D], max: [i64; D]) -> Vec<V::Value>
where
    V: FullSpaceView<D> + Sync,
    V::Value: Send + Clone + Default,
{
    let mut values = vec![V::Value::default(); region_len(&min, &max)];
    extract_region(view, &mut values, min, max);
    values
}
