//! Unbounded aether growing from a single source at the origin.

use num_bigint::BigInt;

use super::Model;
use crate::automaton::region::FullSpaceView;
use crate::automaton::topology::GridTopology;
use crate::error::{AetherError, AetherResult};
use crate::number::CellValue;
use crate::snapshot::Snapshot;
use crate::state::AetherState;

/// Infinite aether in `D` dimensions.
#[derive(Debug)]
pub struct Aether<T, const D: usize> {
    state: AetherState<T, D>,
}

pub type Aether1D<T = BigInt> = Aether<T, 1>;
pub type Aether2D<T = BigInt> = Aether<T, 2>;
pub type Aether3D<T = BigInt> = Aether<T, 3>;
pub type Aether4D<T = BigInt> = Aether<T, 4>;
pub type Aether5D<T = BigInt> = Aether<T, 5>;

impl<T: CellValue, const D: usize> Aether<T, D> {
    pub fn new(initial_value: T) -> AetherResult<Self> {
        let state = AetherState::new(initial_value, GridTopology::Infinite)?;
        Ok(Self { state })
    }

    pub fn next_step(&mut self) -> bool {
        self.state.next_step()
    }

    pub fn get_from_position(&self, coords: [i64; D]) -> T {
        self.state.get_from_position(coords)
    }

    pub fn get_from_asymmetric_position(&self, coords: &[usize; D]) -> AetherResult<T> {
        self.state.get_from_asymmetric_position(coords)
    }

    pub fn asymmetric_max_x(&self) -> usize {
        self.state.asymmetric_max_x()
    }

    /// Half-width of the occupied region in full space.
    pub fn max_x(&self) -> usize {
        self.state.asymmetric_max_x()
    }

    pub fn step(&self) -> u64 {
        self.state.step()
    }

    pub fn changed(&self) -> Option<bool> {
        self.state.changed()
    }

    pub fn initial_value(&self) -> &T {
        self.state.initial_value()
    }

    pub fn total_mass(&self) -> T {
        self.state.total_mass()
    }

    pub fn state(&self) -> &AetherState<T, D> {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot::capture(&self.state)
    }

    pub fn restore(snapshot: Snapshot<T>) -> AetherResult<Self> {
        if snapshot.topology != GridTopology::Infinite {
            return Err(AetherError::IncompatibleSnapshot {
                reason: format!("expected an infinite grid, found {:?}", snapshot.topology),
            });
        }
        Ok(Self {
            state: snapshot.restore()?,
        })
    }
}

impl<T: CellValue, const D: usize> Model for Aether<T, D> {
    fn next_step(&mut self) -> bool {
        Aether::next_step(self)
    }

    fn step(&self) -> u64 {
        self.state.step()
    }

    fn changed(&self) -> Option<bool> {
        self.state.changed()
    }

    fn asymmetric_max_x(&self) -> usize {
        self.state.asymmetric_max_x()
    }
}

impl<T: CellValue, const D: usize> FullSpaceView<D> for Aether<T, D> {
    type Value = T;

    fn value_at(&self, coords: [i64; D]) -> T {
        self.state.get_from_position(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_of_ten_topples_into_cross() {
        let mut aether = Aether2D::new(BigInt::from(10)).unwrap();
        assert!(aether.next_step());
        assert_eq!(aether.get_from_position([0, 0]), BigInt::from(2));
        for n in [[1, 0], [-1, 0], [0, 1], [0, -1]] {
            assert_eq!(aether.get_from_position(n), BigInt::from(2), "neighbor {:?}", n);
        }
        assert_eq!(aether.get_from_position([1, 1]), BigInt::from(0));
        assert_eq!(aether.total_mass(), BigInt::from(10));
    }

    #[test]
    fn test_source_of_four_is_stable() {
        let mut aether = Aether2D::<i64>::new(4).unwrap();
        assert!(!aether.next_step());
        assert_eq!(aether.get_from_position([0, 0]), 4);
        assert_eq!(aether.changed(), Some(false));
        assert_eq!(aether.max_x(), 0);
    }

    #[test]
    fn test_i64_guard_rejects_extreme_negative_source() {
        let err = Aether3D::<i64>::new(i64::MIN).unwrap_err();
        assert!(matches!(err, AetherError::InitialValueOutOfRange { dimension: 3, .. }));
        assert!(Aether3D::<i64>::new(crate::number::I64_MIN_INITIAL_VALUE_3D).is_ok());
    }

    #[test]
    fn test_i64_guards_cover_higher_dimensions() {
        use crate::number::{I64_MIN_INITIAL_VALUE_4D, I64_MIN_INITIAL_VALUE_5D};

        assert!(Aether1D::<i64>::new(i64::MIN).is_err());
        assert!(Aether1D::<i64>::new(-i64::MAX).is_ok());
        assert!(Aether4D::<i64>::new(I64_MIN_INITIAL_VALUE_4D).is_ok());
        assert!(Aether4D::<i64>::new(I64_MIN_INITIAL_VALUE_4D - 1).is_err());
        assert!(Aether5D::<i64>::new(I64_MIN_INITIAL_VALUE_5D).is_ok());
        assert!(matches!(
            Aether5D::<i64>::new(I64_MIN_INITIAL_VALUE_5D - 1),
            Err(AetherError::InitialValueOutOfRange { dimension: 5, .. })
        ));
    }

    #[test]
    fn test_restore_rejects_bounded_snapshot() {
        let state = AetherState::<i64, 3>::new(9, GridTopology::Enclosed { side: 13 }).unwrap();
        let err = Aether3D::<i64>::restore(Snapshot::capture(&state)).unwrap_err();
        assert!(matches!(err, AetherError::IncompatibleSnapshot { .. }));
    }
}
