//! The toppling rule.
//!
//! A cell shares its excess with every neighbor holding strictly less.
//! Neighbors are taken in descending value groups; each round divides the
//! gap down to the current group among every neighbor from that group
//! downwards plus the cell itself, and the cell keeps the remainder.

use crate::number::CellValue;

/// A lower-valued neighbor competing for a share of a cell's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor<T> {
    pub value: T,
    pub symmetry_count: u32,
    pub share_multiplier: u32,
    /// Index of the neighbor slot this descriptor was built from.
    pub slot: usize,
    /// Amount received so far, multiplier included.
    pub received: T,
}

impl<T: CellValue> Neighbor<T> {
    pub fn new(value: T, symmetry_count: u32, share_multiplier: u32, slot: usize) -> Self {
        Self {
            value,
            symmetry_count,
            share_multiplier,
            slot,
            received: T::zero(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToppleOutcome<T> {
    /// Value the cell keeps for the next generation.
    pub kept: T,
    pub toppled: bool,
}

#[inline]
pub(crate) fn accumulate<T: CellValue>(cell: &mut T, amount: T) {
    *cell = std::mem::replace(cell, T::zero()) + amount;
}

/// Topples `value` into `neighbors`, which must all hold less than `value`.
///
/// Shares land in each neighbor's `received` field. The slice is reordered.
pub fn topple<T: CellValue>(value: T, neighbors: &mut [Neighbor<T>]) -> ToppleOutcome<T> {
    if neighbors.is_empty() {
        return ToppleOutcome {
            kept: value,
            toppled: false,
        };
    }
    debug_assert!(neighbors.iter().all(|n| n.value < value));

    neighbors.sort_by(|a, b| b.value.cmp(&a.value));
    let mut share_count: u32 = neighbors.iter().map(|n| n.symmetry_count).sum::<u32>() + 1;
    let mut remaining = value;
    let mut toppled = false;

    let mut start = 0;
    while start < neighbors.len() {
        let group_value = neighbors[start].value.clone();
        let group_len = neighbors[start..]
            .iter()
            .take_while(|n| n.value == group_value)
            .count();

        let to_share = remaining.clone() - group_value;
        let (share, remainder) = to_share.divide_with_remainder(share_count);
        if !share.is_zero() {
            toppled = true;
            for neighbor in neighbors[start..].iter_mut() {
                let amount = share.clone() * T::from_count(neighbor.share_multiplier);
                accumulate(&mut neighbor.received, amount);
            }
            remaining = remaining - to_share + share + remainder;
        }

        share_count -= neighbors[start..start + group_len]
            .iter()
            .map(|n| n.symmetry_count)
            .sum::<u32>();
        start += group_len;
    }

    ToppleOutcome {
        kept: remaining,
        toppled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use proptest::prelude::*;

    #[test]
    fn test_no_neighbors_keeps_value() {
        let outcome = topple(42i64, &mut []);
        assert_eq!(outcome.kept, 42);
        assert!(!outcome.toppled);
    }

    #[test]
    fn test_origin_of_ten_shares_two_each() {
        let mut neighbors = vec![Neighbor::new(0i64, 4, 1, 0)];
        let outcome = topple(10, &mut neighbors);
        assert_eq!(outcome.kept, 2);
        assert!(outcome.toppled);
        assert_eq!(neighbors[0].received, 2);
    }

    #[test]
    fn test_origin_of_four_does_not_topple() {
        let mut neighbors = vec![Neighbor::new(0i64, 4, 1, 0)];
        let outcome = topple(4, &mut neighbors);
        assert_eq!(outcome.kept, 4);
        assert!(!outcome.toppled);
        assert_eq!(neighbors[0].received, 0);
    }

    #[test]
    fn test_two_groups_on_diagonal() {
        // 20 on (x, x) with 5 on the outer slot and 2 on the inner one.
        let mut neighbors = vec![Neighbor::new(2i64, 2, 1, 0), Neighbor::new(5, 2, 1, 1)];
        let outcome = topple(20, &mut neighbors);
        assert_eq!(outcome.kept, 4);
        let received = |slot: usize| {
            neighbors
                .iter()
                .find(|n| n.slot == slot)
                .map(|n| n.received)
                .unwrap()
        };
        assert_eq!(received(0), 5, "inner slot takes both rounds");
        assert_eq!(received(1), 3, "outer slot takes the first round only");
    }

    #[test]
    fn test_tied_neighbors_share_equally() {
        let mut neighbors = vec![
            Neighbor::new(1i64, 1, 1, 0),
            Neighbor::new(1, 1, 1, 1),
            Neighbor::new(1, 1, 1, 2),
        ];
        let outcome = topple(11, &mut neighbors);
        assert_eq!(outcome.kept, 5);
        assert!(neighbors.iter().all(|n| n.received == 2));
    }

    #[test]
    fn test_multiplier_scales_received_amount() {
        let mut neighbors = vec![Neighbor::new(BigInt::from(0), 1, 4, 0)];
        let outcome = topple(BigInt::from(7), &mut neighbors);
        assert_eq!(outcome.kept, BigInt::from(4));
        assert_eq!(neighbors[0].received, BigInt::from(12));
    }

    #[test]
    fn test_negative_values_topple_downwards() {
        let mut neighbors = vec![Neighbor::new(-10i64, 4, 1, 0)];
        let outcome = topple(0, &mut neighbors);
        assert_eq!(outcome.kept, -8);
        assert_eq!(neighbors[0].received, 2);
    }

    proptest! {
        #[test]
        fn prop_topple_conserves_and_stays_non_negative(
            value in 0i64..1_000_000,
            raw in proptest::collection::vec((0i64..1_000_000, 1u32..=4), 0..6),
        ) {
            let mut neighbors: Vec<Neighbor<i64>> = raw
                .iter()
                .enumerate()
                .filter(|(_, (v, _))| *v < value)
                .map(|(i, &(v, sym))| Neighbor::new(v, sym, 1, i))
                .collect();
            let lowest = neighbors.iter().map(|n| n.value).min();
            let outcome = topple(value, &mut neighbors);

            let given: i64 = neighbors
                .iter()
                .map(|n| n.received * i64::from(n.symmetry_count))
                .sum();
            prop_assert_eq!(outcome.kept + given, value);
            prop_assert!(outcome.kept >= 0);
            prop_assert!(neighbors.iter().all(|n| n.received >= 0));
            if let Some(lowest) = lowest {
                prop_assert!(outcome.kept >= lowest);
            }
        }
    }
}
