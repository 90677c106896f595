//! Anisotropic storage over the canonical domain.
//!
//! Only positions with coordinates sorted descending (`x >= y >= z >= 0`) are
//! stored. Slice `x` holds every canonical position whose first coordinate is
//! `x`, laid out flat in combinatorial number system order, so slice lengths
//! are `x + 1` in 2D and `(x + 1)(x + 2) / 2` in 3D.

use crate::number::CellValue;

/// Binomial coefficient `C(n, k)`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result = 1usize;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}

/// Whether coordinates are sorted descending.
#[inline]
pub fn is_canonical(coords: &[usize]) -> bool {
    coords.windows(2).all(|pair| pair[0] >= pair[1])
}

/// Index of a position inside its slice, given the coordinates after `x`.
#[inline]
pub fn slice_index(rest: &[usize]) -> usize {
    let m = rest.len();
    rest.iter()
        .enumerate()
        .map(|(i, &t)| binomial(t + m - 1 - i, m - i))
        .sum()
}

/// Canonical positions of slice `x`, in storage order.
pub struct SlicePositions<const D: usize> {
    next: Option<[usize; D]>,
}

impl<const D: usize> SlicePositions<D> {
    pub fn new(x: usize) -> Self {
        let mut first = [0usize; D];
        if D > 0 {
            first[0] = x;
        }
        Self { next: Some(first) }
    }
}

impl<const D: usize> Iterator for SlicePositions<D> {
    type Item = [usize; D];

    fn next(&mut self) -> Option<[usize; D]> {
        let current = self.next?;
        let mut following = current;
        let mut axis = D;
        self.next = loop {
            if axis <= 1 {
                break None;
            }
            axis -= 1;
            if following[axis] < following[axis - 1] {
                following[axis] += 1;
                for c in following[axis + 1..].iter_mut() {
                    *c = 0;
                }
                break Some(following);
            }
        };
        Some(current)
    }
}

/// Ragged grid of cell values indexed by canonical coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnisotropicGrid<T, const D: usize> {
    slices: Vec<Vec<T>>,
}

impl<T, const D: usize> AnisotropicGrid<T, D> {
    /// Number of positions in slice `x`.
    #[inline]
    pub fn slice_len(x: usize) -> usize {
        binomial(x + D - 1, D - 1)
    }

    /// Wraps slices produced elsewhere. Callers guarantee the slice shapes.
    pub(crate) fn from_slices(slices: Vec<Vec<T>>) -> Self {
        debug_assert!(Self::shape_mismatch(&slices).is_none());
        Self { slices }
    }

    /// First slice whose length does not match the canonical shape.
    pub fn shape_mismatch(slices: &[Vec<T>]) -> Option<(usize, usize, usize)> {
        slices
            .iter()
            .enumerate()
            .find(|(x, slice)| slice.len() != Self::slice_len(*x))
            .map(|(x, slice)| (x, slice.len(), Self::slice_len(x)))
    }

    pub fn into_slices(self) -> Vec<Vec<T>> {
        self.slices
    }

    pub fn slices(&self) -> &[Vec<T>] {
        &self.slices
    }

    /// Highest stored `x`.
    pub fn edge(&self) -> usize {
        self.slices.len().saturating_sub(1)
    }

    pub fn slice_at(&self, x: usize) -> Option<&[T]> {
        self.slices.get(x).map(Vec::as_slice)
    }

    /// Value at canonical coordinates, or `None` when they are not canonical
    /// or lie beyond the edge.
    pub fn get(&self, coords: &[usize; D]) -> Option<&T> {
        if !is_canonical(coords) {
            return None;
        }
        self.slices.get(coords[0])?.get(slice_index(&coords[1..]))
    }

    pub fn get_mut(&mut self, coords: &[usize; D]) -> Option<&mut T> {
        if !is_canonical(coords) {
            return None;
        }
        self.slices
            .get_mut(coords[0])?
            .get_mut(slice_index(&coords[1..]))
    }

    /// All stored positions with their values, in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = ([usize; D], &T)> + '_ {
        self.slices
            .iter()
            .enumerate()
            .flat_map(|(x, slice)| SlicePositions::<D>::new(x).zip(slice.iter()))
    }
}

impl<T: Clone, const D: usize> AnisotropicGrid<T, D> {
    /// Grid with slices `0..=edge`, every cell set to `value`.
    pub fn filled(edge: usize, value: T) -> Self {
        let slices = (0..=edge)
            .map(|x| vec![value.clone(); Self::slice_len(x)])
            .collect();
        Self { slices }
    }
}

impl<T: CellValue, const D: usize> AnisotropicGrid<T, D> {
    /// Fresh zeroed grid with slices `0..=edge`.
    pub fn allocate(edge: usize) -> Self {
        Self::filled(edge, T::zero())
    }

    /// Zeroed slice `x`.
    pub fn zeroed_slice(x: usize) -> Vec<T> {
        vec![T::zero(); Self::slice_len(x)]
    }
}
