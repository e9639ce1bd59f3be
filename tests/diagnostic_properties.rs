use std::collections::BTreeSet;

use advent2021::diagnostic::{column_bit_for_rating, BitMatrix, Rating};
use proptest::prelude::*;

fn to_rows(width: usize, values: impl IntoIterator<Item = u32>) -> Vec<Vec<u8>> {
    values
        .into_iter()
        .map(|value| {
            (0..width)
                .rev()
                .map(|shift| ((value >> shift) & 1) as u8)
                .collect()
        })
        .collect()
}

/// Any rectangular 0/1 table with at least one row and one column.
fn bit_matrix() -> impl Strategy<Value = BitMatrix> {
    (1usize..10, 1usize..30)
        .prop_flat_map(|(width, height)| {
            prop::collection::vec(prop::collection::vec(0u8..=1, width), height)
        })
        .prop_map(|rows| BitMatrix::new(rows).unwrap())
}

/// A table whose rows are pairwise distinct, so every reduction resolves.
fn distinct_bit_matrix() -> impl Strategy<Value = BitMatrix> {
    (1usize..=10)
        .prop_flat_map(|width| {
            let most = 20usize.min((1usize << width) / 2).max(1);
            (
                Just(width),
                prop::collection::btree_set(0u32..(1u32 << width), 1..=most),
            )
        })
        .prop_map(|(width, values): (usize, BTreeSet<u32>)| {
            BitMatrix::new(to_rows(width, values)).unwrap()
        })
}

proptest! {
    #[test]
    fn epsilon_is_complement_of_gamma(matrix in bit_matrix()) {
        let (gamma, epsilon) = matrix.gamma_epsilon().unwrap();

        prop_assert_eq!(gamma.len(), matrix.width());
        prop_assert_eq!(epsilon.len(), matrix.width());
        for (g, e) in gamma.as_slice().iter().zip(epsilon.as_slice()) {
            prop_assert_eq!(g + e, 1);
        }
    }

    #[test]
    fn ratings_pick_an_original_row(matrix in distinct_bit_matrix()) {
        let (oxygen, co2) = matrix.oxygen_and_co2_ratings().unwrap();

        let rows = matrix.rows();
        prop_assert!(rows.iter().any(|row| row.as_slice() == oxygen.as_slice()));
        prop_assert!(rows.iter().any(|row| row.as_slice() == co2.as_slice()));
    }

    #[test]
    fn parallel_ratings_match_sequential(matrix in distinct_bit_matrix()) {
        let (oxygen, co2) = matrix.oxygen_and_co2_ratings().unwrap();

        prop_assert_eq!(oxygen, matrix.diagnostic_rating(Rating::Most).unwrap());
        prop_assert_eq!(co2, matrix.diagnostic_rating(Rating::Least).unwrap());
    }

    #[test]
    fn unanimous_column_is_a_fixed_point(
        bit in 0u8..=1,
        rest in prop::collection::vec(prop::collection::vec(0u8..=1, 4), 1..20),
    ) {
        let rows: Vec<Vec<u8>> = rest
            .into_iter()
            .map(|mut row| {
                row[2] = bit;
                row
            })
            .collect();

        for &rating in &[Rating::Most, Rating::Least] {
            let target = column_bit_for_rating(&rows, 2, rating).unwrap();
            prop_assert_eq!(target, bit);

            let kept = rows.iter().filter(|row| row[2] == target).count();
            prop_assert_eq!(kept, rows.len());
        }
    }

    #[test]
    fn single_row_is_returned_unchanged(row in prop::collection::vec(0u8..=9, 0..12)) {
        let matrix = BitMatrix::new(vec![row.clone()]).unwrap();

        let most = matrix.diagnostic_rating(Rating::Most).unwrap();
        let least = matrix.diagnostic_rating(Rating::Least).unwrap();

        prop_assert_eq!(most.as_slice(), row.as_slice());
        prop_assert_eq!(least.as_slice(), row.as_slice());
    }
}
