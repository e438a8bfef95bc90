//! Offline training of placement artifacts.
//!
//! Standardise, fit an L2 logistic regression by coordinate descent, and
//! optionally wrap it in sigmoid calibration fitted on stratified folds.
//!
//! # Example
//!
//! ```
//! use placement::testing::synthetic_students;
//! use placement::training::{Trainer, TrainerConfig, Verbosity};
//!
//! let data = synthetic_students(200, 1);
//! let config = TrainerConfig::builder().verbosity(Verbosity::Silent).build().unwrap();
//! let outcome = Trainer::new(config).train(&data).unwrap();
//! assert!(outcome.report.accuracy > 0.5);
//! ```

mod calibration;
mod config;
mod linear;
mod logger;
pub mod metrics;
mod objective;
mod scaler;
mod split;
mod trainer;

pub use calibration::fit_sigmoid;
pub use config::{CalibrationConfig, TrainerConfig, TrainerConfigBuilder};
pub use linear::{LinearFit, LogisticRegression};
pub use logger::{TrainingLogger, Verbosity};
pub use objective::{GradHess, LogisticLoss};
pub use scaler::fit_scaler;
pub use split::{stratified_kfold, train_test_split, Fold, SplitError};
pub use trainer::{TrainError, TrainOutcome, TrainReport, Trainer};
