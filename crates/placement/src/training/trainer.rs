//! Offline trainer producing an [`Artifact`].
//!
//! Flow:
//!
//! 1. Shuffle and split off the test rows.
//! 2. Fit the scaler and logistic regression on the train rows.
//! 3. Optionally calibrate with stratified folds over the train rows.
//! 4. Report metrics on the test rows.

use thiserror::Error;

use super::calibration::fit_sigmoid;
use super::linear::LogisticRegression;
use super::logger::TrainingLogger;
use super::metrics::{accuracy, brier_score, log_loss, roc_auc};
use super::scaler::fit_scaler;
use super::split::{stratified_kfold, train_test_split, SplitError};
use super::{CalibrationConfig, TrainerConfig};
use crate::data::Dataset;
use crate::explainability::{rank_influences, FeatureInfluence, RankingPolicy};
use crate::repr::{
    Artifact, CalibratedEnsemble, CalibratedModel, ModelMeta, Pipeline, StandardScaler,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainError {
    #[error("the {part} rows contain a single class; both placed and not placed are required")]
    SingleClass { part: &'static str },

    #[error(transparent)]
    Split(#[from] SplitError),
}

/// Held-out evaluation of a trained artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub n_train: usize,
    pub n_test: usize,
    pub accuracy: f64,
    pub log_loss: f64,
    /// `None` when the test rows hold a single class.
    pub auc: Option<f64>,
    pub brier: f64,
    /// Influence ranking of the trained weights. `None` for ensembles.
    pub priority: Option<Vec<FeatureInfluence>>,
    /// Whether every logistic regression fit converged.
    pub converged: bool,
}

/// Everything a training run produces.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub artifact: Artifact,
    pub meta: ModelMeta,
    pub report: TrainReport,
}

/// A pipeline fitted on one subset of rows.
struct FittedPipeline {
    pipeline: Pipeline,
    converged: bool,
}

/// Placement model trainer.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    fn solver(&self) -> LogisticRegression {
        LogisticRegression {
            c: self.config.c,
            tol: self.config.tol,
            max_iter: self.config.max_iter,
        }
    }

    /// Train on a labelled dataset.
    ///
    /// # Errors
    ///
    /// - [`TrainError::Split`] if the rows cannot be split or folded
    /// - [`TrainError::SingleClass`] if the train rows hold one class only
    pub fn train(&self, dataset: &Dataset) -> Result<TrainOutcome, TrainError> {
        if !dataset.has_both_classes() {
            return Err(TrainError::SingleClass { part: "training" });
        }
        let (train_idx, test_idx) =
            train_test_split(dataset.n_samples(), self.config.test_fraction, self.config.seed)?;
        let train = dataset.select(&train_idx);
        let test = dataset.select(&test_idx);
        if !train.has_both_classes() {
            return Err(TrainError::SingleClass { part: "train split" });
        }

        let mut logger = TrainingLogger::new(self.config.verbosity);
        logger.start_training(train.n_samples(), test.n_samples());

        let (artifact, converged) = match self.config.calibration {
            None => {
                let fitted = self.fit_pipeline(&train, &logger);
                (Artifact::Plain(fitted.pipeline), fitted.converged)
            }
            Some(calibration) => self.fit_calibrated(&train, calibration, &logger)?,
        };
        if !test.has_both_classes() {
            logger.warn("test split holds a single class; AUC is undefined");
        }

        let report = self.evaluate(&artifact, &test, train.n_samples(), converged);
        logger.log_metrics(report.accuracy, report.log_loss, report.auc, report.brier);
        logger.finish_training();

        Ok(TrainOutcome {
            artifact,
            meta: ModelMeta::canonical().with_train_samples(train.n_samples()),
            report,
        })
    }

    fn fit_pipeline(&self, rows: &Dataset, logger: &TrainingLogger) -> FittedPipeline {
        let scaler: StandardScaler = fit_scaler(rows.features());
        let scaled = scaler.transform_rows(rows.features());
        let labels = rows.labels().to_vec();
        let fit = self.solver().fit(scaled.view(), &labels, logger);
        FittedPipeline {
            pipeline: Pipeline::new(scaler, fit.model),
            converged: fit.converged,
        }
    }

    /// Sigmoid calibration over stratified folds of the train rows.
    ///
    /// Without `ensemble`, the held-out margins of every fold feed one
    /// calibrator, which wraps a pipeline refitted on all train rows. With
    /// `ensemble`, each fold keeps its own pipeline and calibrator.
    fn fit_calibrated(
        &self,
        train: &Dataset,
        calibration: CalibrationConfig,
        logger: &TrainingLogger,
    ) -> Result<(Artifact, bool), TrainError> {
        let labels = train.labels().to_vec();
        let folds = stratified_kfold(&labels, calibration.folds)?;

        let mut converged = true;
        let mut held_out_margins = vec![0.0; train.n_samples()];
        let mut members = Vec::with_capacity(folds.len());

        for (k, fold) in folds.iter().enumerate() {
            logger.log_fold(k, fold.train.len(), fold.test.len());
            let fitted = self.fit_pipeline(&train.select(&fold.train), logger);
            converged &= fitted.converged;

            let margins: Vec<f64> = fold
                .test
                .iter()
                .map(|&i| fitted.pipeline.decision_function(&train.vector(i).to_array()))
                .collect();

            if calibration.ensemble {
                let fold_labels: Vec<f64> = fold.test.iter().map(|&i| labels[i]).collect();
                let calibrator = fit_sigmoid(&margins, &fold_labels);
                logger.log_calibration(calibrator.a, calibrator.b);
                members.push(CalibratedModel::new(fitted.pipeline, calibrator));
            } else {
                for (&i, m) in fold.test.iter().zip(margins) {
                    held_out_margins[i] = m;
                }
            }
        }

        if calibration.ensemble {
            return Ok((Artifact::Ensemble(CalibratedEnsemble::new(members)), converged));
        }

        let calibrator = fit_sigmoid(&held_out_margins, &labels);
        logger.log_calibration(calibrator.a, calibrator.b);
        let full = self.fit_pipeline(train, logger);
        converged &= full.converged;
        Ok((
            Artifact::Calibrated(CalibratedModel::new(full.pipeline, calibrator)),
            converged,
        ))
    }

    fn evaluate(
        &self,
        artifact: &Artifact,
        test: &Dataset,
        n_train: usize,
        converged: bool,
    ) -> TrainReport {
        let labels = test.labels().to_vec();
        let probabilities: Vec<f64> = (0..test.n_samples())
            .map(|i| artifact.predict_proba(&test.vector(i).to_array()))
            .collect();

        TrainReport {
            n_train,
            n_test: test.n_samples(),
            accuracy: accuracy(&probabilities, &labels),
            log_loss: log_loss(&probabilities, &labels),
            auc: roc_auc(&probabilities, &labels),
            brier: brier_score(&probabilities, &labels),
            priority: rank_influences(artifact, &RankingPolicy::all()).ok(),
            converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Feature;
    use crate::testing::synthetic_students;
    use crate::training::Verbosity;

    fn config(calibration: Option<CalibrationConfig>) -> TrainerConfig {
        TrainerConfig::builder()
            .maybe_calibration(calibration)
            .verbosity(Verbosity::Silent)
            .build()
            .unwrap()
    }

    #[test]
    fn plain_pipeline_recovers_weight_signs() {
        let data = synthetic_students(400, 7);
        let outcome = Trainer::new(config(None)).train(&data).unwrap();

        let Artifact::Plain(pipeline) = &outcome.artifact else {
            panic!("expected a plain pipeline, got {}", outcome.artifact.kind());
        };
        let w = pipeline.classifier();
        for feature in [Feature::Cgpa, Feature::Attendance, Feature::Skills, Feature::Internships] {
            assert!(w.weight(feature.index()) > 0.0, "{feature} weight should be positive");
        }
        assert!(w.weight(Feature::Backlogs.index()) < 0.0);

        let report = &outcome.report;
        assert_eq!(report.n_train + report.n_test, 400);
        assert_eq!(report.n_test, 80);
        assert!(report.accuracy > 0.65, "accuracy {}", report.accuracy);
        assert!(report.auc.unwrap() > 0.75);
        assert!(report.converged);
        assert_eq!(report.priority.as_ref().unwrap()[0].feature, Feature::Cgpa);
        assert_eq!(outcome.meta.n_train_samples, Some(320));
    }

    #[test]
    fn training_is_deterministic() {
        let data = synthetic_students(200, 3);
        let trainer = Trainer::new(config(None));
        let a = trainer.train(&data).unwrap();
        let b = trainer.train(&data).unwrap();
        assert_eq!(a.artifact, b.artifact);
    }

    #[test]
    fn calibrated_model_keeps_one_boundary() {
        let data = synthetic_students(300, 11);
        let config = config(Some(CalibrationConfig { folds: 5, ensemble: false }));
        let outcome = Trainer::new(config).train(&data).unwrap();
        let Artifact::Calibrated(model) = &outcome.artifact else {
            panic!("expected a calibrated model");
        };
        // Higher margin means higher probability.
        assert!(model.calibrator().a < 0.0);
        assert!(outcome.report.priority.is_some());
    }

    #[test]
    fn ensemble_has_one_member_per_fold() {
        let data = synthetic_students(300, 5);
        let config = config(Some(CalibrationConfig { folds: 3, ensemble: true }));
        let outcome = Trainer::new(config).train(&data).unwrap();
        let Artifact::Ensemble(ensemble) = &outcome.artifact else {
            panic!("expected an ensemble");
        };
        assert_eq!(ensemble.members().len(), 3);
        assert_eq!(outcome.report.priority, None);
    }

    #[test]
    fn single_class_is_rejected() {
        let rows = vec![crate::features::FeatureVector::new(8.0, 90.0, 2.0, 1.0, 7.0, 0.0); 10];
        let data = Dataset::from_vectors(&rows, &[1.0; 10]).unwrap();
        let err = Trainer::default().train(&data).unwrap_err();
        assert_eq!(err, TrainError::SingleClass { part: "training" });
    }

    #[test]
    fn too_few_rows_per_fold() {
        let data = synthetic_students(12, 1);
        let config = config(Some(CalibrationConfig { folds: 10, ensemble: false }));
        assert!(matches!(
            Trainer::new(config).train(&data),
            Err(TrainError::Split(SplitError::TooFewPerClass { .. })) | Err(TrainError::SingleClass { .. })
        ));
    }
}
