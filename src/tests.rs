#[cfg(test)]
mod tests {
    use crate::automaton::grid::SlicePositions;
    use crate::config::{run, RunConfig};
    use crate::ffi::grid::{aether_get, aether_get_changed, aether_next_step};
    use crate::ffi::lifecycle::{aether_create_2d, aether_destroy, aether_get_step};
    use crate::ffi::region::aether_extract_region;
    use crate::models::{Aether1D, Aether2D, Aether3D, Aether4D, CubicGrid3D, Enclosed3D};
    use crate::snapshot::Snapshot;
    use num_bigint::BigInt;

    /// Plain full-grid aether used as a reference for the symmetric engine.
    struct DenseAether<const D: usize> {
        radius: i64,
        absorbing: bool,
        cells: Vec<i64>,
    }

    impl<const D: usize> DenseAether<D> {
        fn new(radius: i64, initial_value: i64, absorbing: bool) -> Self {
            let side = (2 * radius + 1) as usize;
            let mut dense = Self {
                radius,
                absorbing,
                cells: vec![0; side.pow(D as u32)],
            };
            let origin = dense.index([0; D]).unwrap();
            dense.cells[origin] = initial_value;
            dense
        }

        fn side(&self) -> i64 {
            2 * self.radius + 1
        }

        fn index(&self, coords: [i64; D]) -> Option<usize> {
            let mut index = 0i64;
            for &c in coords.iter().rev() {
                if c < -self.radius || c > self.radius {
                    return None;
                }
                index = index * self.side() + (c + self.radius);
            }
            Some(index as usize)
        }

        fn coords_of(&self, mut index: usize) -> [i64; D] {
            let mut coords = [0i64; D];
            for c in coords.iter_mut() {
                *c = (index as i64 % self.side()) - self.radius;
                index /= self.side() as usize;
            }
            coords
        }

        fn get(&self, coords: [i64; D]) -> i64 {
            self.index(coords).map(|i| self.cells[i]).unwrap_or(0)
        }

        fn step(&mut self) -> bool {
            let mut next = vec![0i64; self.cells.len()];
            let mut changed = false;
            for i in 0..self.cells.len() {
                let value = self.cells[i];
                let position = self.coords_of(i);

                // (neighbor value, neighbor index if it exists)
                let mut lower: Vec<(i64, Option<usize>)> = Vec::new();
                for axis in 0..D {
                    for delta in [1, -1] {
                        let mut n = position;
                        n[axis] += delta;
                        match self.index(n) {
                            Some(j) if self.cells[j] < value => lower.push((self.cells[j], Some(j))),
                            None if self.absorbing && 0 < value => lower.push((0, None)),
                            _ => {}
                        }
                    }
                }
                lower.sort_by_key(|&(v, _)| v);

                let mut remaining = value;
                let mut share_count = lower.len() as i64 + 1;
                let mut k = lower.len();
                while k > 0 {
                    let group_value = lower[k - 1].0;
                    let to_share = remaining - group_value;
                    let share = to_share / share_count;
                    let remainder = to_share % share_count;
                    if share != 0 {
                        changed = true;
                        for &(_, target) in &lower[..k] {
                            if let Some(j) = target {
                                next[j] += share;
                            }
                        }
                        remaining = remaining - to_share + share + remainder;
                    }
                    while k > 0 && lower[k - 1].0 == group_value {
                        k -= 1;
                        share_count -= 1;
                    }
                }
                next[i] += remaining;
            }
            self.cells = next;
            changed
        }

        fn mass(&self) -> i64 {
            self.cells.iter().sum()
        }
    }

    fn all_coords<const D: usize>(radius: i64) -> Vec<[i64; D]> {
        let dense = DenseAether::<D>::new(radius, 0, false);
        (0..dense.cells.len()).map(|i| dense.coords_of(i)).collect()
    }

    #[test]
    fn test_infinite_2d_matches_dense_grid() {
        let steps = 30;
        let mut aether = Aether2D::<i64>::new(2_500).unwrap();
        let mut dense = DenseAether::<2>::new(steps + 2, 2_500, false);

        for step in 0..steps {
            assert_eq!(aether.next_step(), dense.step(), "changed flag at step {}", step);
            for coords in all_coords::<2>(steps + 2) {
                assert_eq!(
                    aether.get_from_position(coords),
                    dense.get(coords),
                    "step {} at {:?}",
                    step + 1,
                    coords
                );
            }
        }
    }

    #[test]
    fn test_infinite_3d_matches_dense_grid() {
        let steps = 12;
        let mut aether = Aether3D::<i64>::new(40_000).unwrap();
        let mut dense = DenseAether::<3>::new(steps + 1, 40_000, false);

        for step in 0..steps {
            assert_eq!(aether.next_step(), dense.step(), "changed flag at step {}", step);
            for coords in all_coords::<3>(steps + 1) {
                assert_eq!(
                    aether.get_from_position(coords),
                    dense.get(coords),
                    "step {} at {:?}",
                    step + 1,
                    coords
                );
            }
        }
    }

    #[test]
    fn test_infinite_1d_matches_dense_line() {
        let steps = 40;
        let mut aether = Aether1D::<i64>::new(1_000).unwrap();
        let mut dense = DenseAether::<1>::new(steps + 2, 1_000, false);

        for step in 0..steps {
            assert_eq!(aether.next_step(), dense.step(), "changed flag at step {}", step);
            for coords in all_coords::<1>(steps + 2) {
                assert_eq!(aether.get_from_position(coords), dense.get(coords), "at {:?}", coords);
            }
        }
        assert_eq!(aether.total_mass(), 1_000);
    }

    #[test]
    fn test_infinite_4d_matches_dense_grid() {
        let steps = 6;
        let mut aether = Aether4D::<i64>::new(20_000).unwrap();
        let mut dense = DenseAether::<4>::new(steps + 1, 20_000, false);

        for step in 0..steps {
            assert_eq!(aether.next_step(), dense.step(), "changed flag at step {}", step);
            for coords in all_coords::<4>(steps + 1) {
                assert_eq!(
                    aether.get_from_position(coords),
                    dense.get(coords),
                    "step {} at {:?}",
                    step + 1,
                    coords
                );
            }
        }
        assert_eq!(aether.total_mass(), 20_000);
    }

    #[test]
    fn test_negative_source_matches_dense_grid() {
        let steps = 20;
        let mut aether = Aether2D::<i64>::new(-777).unwrap();
        let mut dense = DenseAether::<2>::new(steps + 2, -777, false);

        for _ in 0..steps {
            aether.next_step();
            dense.step();
        }
        for coords in all_coords::<2>(steps + 2) {
            assert_eq!(aether.get_from_position(coords), dense.get(coords), "at {:?}", coords);
        }
        assert_eq!(aether.total_mass(), -777);
    }

    #[test]
    fn test_cubic_grid_matches_closed_dense_cube() {
        let mut cube = CubicGrid3D::<i64>::new(13, 300_000).unwrap();
        let mut dense = DenseAether::<3>::new(6, 300_000, false);

        for _ in 0..30 {
            cube.next_step();
            dense.step();
        }
        for coords in all_coords::<3>(6) {
            let cube_coords = coords.map(|c| (c + 6) as usize);
            assert_eq!(
                cube.get_from_position(cube_coords[0], cube_coords[1], cube_coords[2]),
                Ok(dense.get(coords)),
                "at {:?}",
                coords
            );
        }
        assert_eq!(dense.mass(), 300_000);
    }

    #[test]
    fn test_enclosed_matches_absorbing_dense_cube() {
        let mut enclosed = Enclosed3D::<i64>::new(300_000, 13).unwrap();
        let mut dense = DenseAether::<3>::new(6, 300_000, true);

        for _ in 0..30 {
            enclosed.next_step();
            dense.step();
            assert_eq!(enclosed.total_mass(), dense.mass());
        }
        for coords in all_coords::<3>(6) {
            assert_eq!(
                enclosed.get_from_position(coords[0], coords[1], coords[2]),
                dense.get(coords),
                "at {:?}",
                coords
            );
        }
    }

    #[test]
    fn test_enclosed_loses_mass_only_after_reaching_the_wall() {
        let initial = 1_000_000i64;
        let mut enclosed = Enclosed3D::<i64>::new(initial, 13).unwrap();
        let mut previous = initial;
        for step in 1..=80u64 {
            enclosed.next_step();
            let mass = enclosed.total_mass();
            if step <= 6 {
                assert_eq!(mass, initial, "wall not reachable before step 7");
            }
            assert!(mass <= previous, "mass grew at step {}", step);
            previous = mass;
        }
        assert!(previous < initial, "flow past the wall is dropped");
    }

    #[test]
    fn test_mass_conserved_and_non_negative_while_growing() {
        let mut aether = Aether3D::<BigInt>::new(BigInt::from(123_456_789)).unwrap();
        let zero = BigInt::from(0);
        for _ in 0..25 {
            aether.next_step();
            assert_eq!(aether.total_mass(), BigInt::from(123_456_789));
            assert!(aether.state().grid().iter().all(|(_, v)| *v >= zero));
        }
    }

    #[test]
    fn test_bigint_and_i64_agree() {
        let mut big = Aether3D::<BigInt>::new(BigInt::from(54_321)).unwrap();
        let mut small = Aether3D::<i64>::new(54_321).unwrap();
        for _ in 0..20 {
            assert_eq!(big.next_step(), small.next_step());
        }
        assert_eq!(big.asymmetric_max_x(), small.asymmetric_max_x());
        for x in 0..=small.asymmetric_max_x() + 2 {
            for p in SlicePositions::<3>::new(x) {
                assert_eq!(
                    big.get_from_asymmetric_position(&p).unwrap(),
                    BigInt::from(small.get_from_asymmetric_position(&p).unwrap()),
                    "at {:?}",
                    p
                );
            }
        }
    }

    #[test]
    fn test_bigint_handles_sources_beyond_i64() {
        let huge = BigInt::from(i64::MAX) * BigInt::from(1_000);
        let mut aether = Aether2D::new(huge.clone()).unwrap();
        for _ in 0..5 {
            assert!(aether.next_step());
        }
        assert_eq!(aether.total_mass(), huge);
    }

    #[test]
    fn test_stabilization_is_idempotent() {
        let mut aether = Aether2D::<i64>::new(300).unwrap();
        let summary = run(&mut aether, &RunConfig::default());
        assert!(summary.stabilized);

        let settled = aether.snapshot();
        for _ in 0..5 {
            assert!(!aether.next_step());
        }
        let later = aether.snapshot();
        assert_eq!(later.slices, settled.slices);
        assert_eq!(later.step, settled.step + 5);
    }

    #[test]
    fn test_values_are_symmetric() {
        let mut aether = Aether3D::<i64>::new(9_999).unwrap();
        for _ in 0..7 {
            aether.next_step();
        }
        let reference = aether.get_from_position([2, 1, 0]);
        assert!(reference > 0);
        for coords in [[1, 2, 0], [0, -1, 2], [-2, 0, -1], [1, 0, -2], [0, 2, -1]] {
            assert_eq!(aether.get_from_position(coords), reference, "at {:?}", coords);
        }
    }

    #[test]
    fn test_snapshot_resumes_cubic_grid() {
        let mut cube = CubicGrid3D::<i64>::new(15, 77_777).unwrap();
        for _ in 0..10 {
            cube.next_step();
        }
        let json = serde_json::to_string(&cube.snapshot()).unwrap();
        let snapshot: Snapshot<i64> = serde_json::from_str(&json).unwrap();
        let mut resumed = CubicGrid3D::restore(snapshot).unwrap();
        assert_eq!(resumed.side(), 15);
        assert_eq!(resumed.step(), 10);

        for _ in 0..10 {
            assert_eq!(resumed.next_step(), cube.next_step());
        }
        assert_eq!(resumed.get_from_position(7, 3, 9), cube.get_from_position(7, 3, 9));
        assert!(Enclosed3D::restore(cube.snapshot()).is_err());
    }

    #[test]
    fn test_ffi_end_to_end() {
        unsafe {
            let handle = aether_create_2d(10);
            assert!(!handle.is_null());
            assert_eq!(aether_get_changed(handle), -1);

            assert_eq!(aether_next_step(handle), 1);
            assert_eq!(aether_next_step(handle), 0);
            assert_eq!(aether_get_step(handle), 2);
            assert_eq!(aether_get_changed(handle), 0);
            assert_eq!(aether_get(handle, 0, -1, 0), 2);

            let mut buf = vec![-1i64; 9];
            let written = aether_extract_region(handle, buf.as_mut_ptr(), -1, -1, 0, 2, 2, 1);
            assert_eq!(written, 9);
            assert_eq!(buf, vec![0, 2, 0, 2, 2, 2, 0, 2, 0]);
            assert_eq!(buf.iter().sum::<i64>(), 10);

            aether_destroy(handle);
        }
    }
}
