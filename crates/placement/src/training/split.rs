//! Train/test splitting and stratified folds.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("cannot split {n_samples} rows into non-empty train and test parts")]
    TooFewRows { n_samples: usize },

    #[error("{n_folds} folds need at least {n_folds} rows of each class, the smallest class has {smallest}")]
    TooFewPerClass { n_folds: usize, smallest: usize },
}

/// Shuffle `0..n_samples` and cut off `ceil(n_samples × test_fraction)` rows
/// for the test part. Returns `(train, test)`.
pub fn train_test_split(
    n_samples: usize,
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>), SplitError> {
    let n_test = (n_samples as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(SplitError::TooFewRows { n_samples });
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok((train, indices))
}

/// One cross-validation fold, indices into the fitted set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Stratified k-fold without shuffling.
///
/// Within each class, the i-th row (in input order) goes to fold `i % k`, so
/// every fold holds out a near-equal share of both classes.
pub fn stratified_kfold(labels: &[f64], n_folds: usize) -> Result<Vec<Fold>, SplitError> {
    let n_pos = labels.iter().filter(|&&y| y == 1.0).count();
    let smallest = n_pos.min(labels.len() - n_pos);
    if n_folds < 2 || smallest < n_folds {
        return Err(SplitError::TooFewPerClass { n_folds, smallest });
    }

    let mut assignment = vec![0usize; labels.len()];
    let (mut seen_pos, mut seen_neg) = (0usize, 0usize);
    for (slot, &y) in assignment.iter_mut().zip(labels) {
        let seen = if y == 1.0 { &mut seen_pos } else { &mut seen_neg };
        *slot = *seen % n_folds;
        *seen += 1;
    }

    Ok((0..n_folds)
        .map(|fold| {
            let (test, train): (Vec<usize>, Vec<usize>) =
                (0..labels.len()).partition(|&i| assignment[i] == fold);
            Fold { train, test }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_sizes_and_determinism() {
        let (train, test) = train_test_split(101, 0.2, 42).unwrap();
        assert_eq!(test.len(), 21);
        assert_eq!(train.len(), 80);

        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..101).collect::<Vec<_>>());

        assert_eq!(train_test_split(101, 0.2, 42).unwrap(), (train, test));
        assert_ne!(train_test_split(101, 0.2, 7).unwrap().1, train_test_split(101, 0.2, 42).unwrap().1);
    }

    #[test]
    fn split_rejects_tiny_inputs() {
        assert!(train_test_split(1, 0.2, 42).is_err());
        assert!(train_test_split(0, 0.2, 42).is_err());
        assert!(train_test_split(2, 0.2, 42).is_ok());
    }

    #[test]
    fn folds_are_stratified_and_disjoint() {
        let labels: Vec<f64> = (0..23).map(|i| if i % 3 == 0 { 1.0 } else { 0.0 }).collect();
        let folds = stratified_kfold(&labels, 5).unwrap();
        assert_eq!(folds.len(), 5);

        let mut held_out: Vec<usize> = folds.iter().flat_map(|f| f.test.clone()).collect();
        held_out.sort_unstable();
        assert_eq!(held_out, (0..23).collect::<Vec<_>>());

        for fold in &folds {
            assert_eq!(fold.train.len() + fold.test.len(), 23);
            let pos = fold.test.iter().filter(|&&i| labels[i] == 1.0).count();
            assert!((1..=2).contains(&pos), "fold holds out {pos} positives");
        }
    }

    #[test]
    fn folds_need_enough_minority_rows() {
        let labels = [1.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        assert_eq!(
            stratified_kfold(&labels, 3).unwrap_err(),
            SplitError::TooFewPerClass { n_folds: 3, smallest: 2 }
        );
        assert!(stratified_kfold(&labels, 2).is_ok());
    }
}
