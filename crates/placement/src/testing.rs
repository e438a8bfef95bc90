//! Fixtures shared by unit tests, integration tests and doc examples.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::Dataset;
use crate::features::FeatureVector;
use crate::repr::transform::sigmoid;
use crate::repr::{Artifact, LinearModel, Pipeline, StandardScaler};

/// Absolute tolerance for comparisons of exact closed-form values.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Weights of [`scenario_artifact`], canonical order.
pub const SCENARIO_WEIGHTS: [f64; 6] = [1.2, 0.1, 0.4, 0.3, 0.9, -0.8];

/// Intercept of [`scenario_artifact`].
pub const SCENARIO_BIAS: f64 = -2.0;

/// Plain pipeline with an identity scaler and hand-picked weights.
///
/// Raw and standardised values coincide, so margins can be computed by hand:
/// `1.2·cgpa + 0.1·attendance + 0.4·projects + 0.3·internships + 0.9·skills
/// - 0.8·backlogs - 2.0`.
pub fn scenario_artifact() -> Artifact {
    Artifact::Plain(Pipeline::new(
        StandardScaler::identity(SCENARIO_WEIGHTS.len()),
        LinearModel::from_parts(&SCENARIO_WEIGHTS, SCENARIO_BIAS),
    ))
}

/// Random student profiles with labels drawn from a known logistic model.
///
/// Placement odds rise with every feature except backlogs. The same seed
/// always produces the same rows.
pub fn synthetic_students(n_samples: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(n_samples);
    let mut labels = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        let row = FeatureVector::new(
            rng.gen_range(5.0..10.0),
            rng.gen_range(50.0..100.0),
            rng.gen_range(0..=6) as f64,
            rng.gen_range(0..=2) as f64,
            rng.gen_range(0.0..10.0),
            if rng.gen_bool(0.3) { 1.0 } else { 0.0 },
        );
        let logit = 1.5 * (row.cgpa - 7.5)
            + 0.05 * (row.attendance - 75.0)
            + 0.3 * (row.projects - 3.0)
            + 0.6 * (row.internships - 1.0)
            + 0.4 * (row.skills - 5.0)
            - 1.5 * row.backlogs
            + 0.45;
        labels.push(if rng.gen_bool(sigmoid(logit)) { 1.0 } else { 0.0 });
        rows.push(row);
    }

    Dataset::from_vectors(&rows, &labels).expect("generated rows are valid")
}
