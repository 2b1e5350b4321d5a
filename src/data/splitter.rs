// ============================================================
// Layer 4 - Train/Validation Splitter
// ============================================================
// Draws a random validation sample of row indices and assigns
// every remaining row to training.
//
//   validation size = floor(0.3 * rows)
//   eligible rows   = 1..rows   (sampled without replacement)
//   training rows   = every row not drawn, in ascending order
//
// Row 0 is never eligible for validation. This is a fixed
// boundary (FIRST_VALIDATION_ROW), not a tunable holdout, so row
// 0 always ends up in training.
//
// Reference: rand crate documentation (seq::index::sample)

use rand::{seq::index::sample, Rng};

/// Fraction of all rows drawn for validation
pub const VALIDATION_FRACTION: f64 = 0.3;

/// First row index that may be drawn for validation
pub const FIRST_VALIDATION_ROW: usize = 1;

/// Row indices of each partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    /// Ascending
    pub train:      Vec<usize>,
    /// In the order they were drawn
    pub validation: Vec<usize>,
}

/// Number of validation rows for a table of `rows` rows.
pub fn validation_size(rows: usize) -> usize {
    (rows as f64 * VALIDATION_FRACTION) as usize
}

/// Split `rows` row indices into training and validation partitions.
pub fn split_train_val<R: Rng + ?Sized>(rows: usize, rng: &mut R) -> SplitIndices {
    let eligible = rows.saturating_sub(FIRST_VALIDATION_ROW);
    let amount   = validation_size(rows).min(eligible);

    let validation: Vec<usize> = sample(rng, eligible, amount)
        .into_iter()
        .map(|i| i + FIRST_VALIDATION_ROW)
        .collect();

    let mut in_validation = vec![false; rows];
    for &idx in &validation {
        in_validation[idx] = true;
    }
    let train: Vec<usize> = (0..rows).filter(|&i| !in_validation[i]).collect();

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        train.len(),
        validation.len(),
    );

    SplitIndices { train, validation }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_correct_split_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let split   = split_train_val(100, &mut rng);
        assert_eq!(split.validation.len(), 30);
        assert_eq!(split.train.len(), 70);
    }

    #[test]
    fn test_partitions_are_disjoint_and_cover_all_rows() {
        for rows in [4usize, 10, 33, 57] {
            let mut rng = StdRng::seed_from_u64(rows as u64);
            let split   = split_train_val(rows, &mut rng);

            let mut all: Vec<usize> = split.train.iter().chain(&split.validation).copied().collect();
            all.sort_unstable();
            assert_eq!(all, (0..rows).collect::<Vec<_>>());
            assert_eq!(split.validation.len(), validation_size(rows));
        }
    }

    #[test]
    fn test_row_zero_always_trains() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let split   = split_train_val(10, &mut rng);
            assert_eq!(split.train[0], 0);
            assert!(!split.validation.contains(&0));
        }
    }

    #[test]
    fn test_tiny_tables_have_no_validation() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(split_train_val(0, &mut rng), SplitIndices { train: vec![], validation: vec![] });
        assert_eq!(split_train_val(3, &mut rng).train, vec![0, 1, 2]);
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_val(50, &mut StdRng::seed_from_u64(42));
        let b = split_train_val(50, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
