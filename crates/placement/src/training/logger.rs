//! Training progress output, gated by verbosity.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// How much the trainer reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Silent,
    #[default]
    Warning,
    Info,
    Debug,
}

/// Emits trainer milestones as `tracing` events.
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    started: Option<Instant>,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            started: None,
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    #[inline]
    fn enabled(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }

    pub fn start_training(&mut self, n_train: usize, n_test: usize) {
        self.started = Some(Instant::now());
        if self.enabled(Verbosity::Info) {
            info!(n_train, n_test, "training placement model");
        }
    }

    pub fn log_sweep(&self, sweep: usize, max_delta: f64) {
        if self.enabled(Verbosity::Debug) {
            debug!(sweep, max_delta, "coordinate descent sweep");
        }
    }

    pub fn log_fit(&self, sweeps: usize, converged: bool) {
        if !converged && self.enabled(Verbosity::Warning) {
            warn!(sweeps, "logistic regression did not converge; raise max_iter or tol");
        } else if self.enabled(Verbosity::Debug) {
            debug!(sweeps, "logistic regression converged");
        }
    }

    pub fn log_fold(&self, fold: usize, n_fit: usize, n_held_out: usize) {
        if self.enabled(Verbosity::Debug) {
            debug!(fold, n_fit, n_held_out, "calibration fold");
        }
    }

    pub fn log_calibration(&self, a: f64, b: f64) {
        if self.enabled(Verbosity::Info) {
            info!(a, b, "fitted sigmoid calibrator");
        }
    }

    pub fn log_metrics(&self, accuracy: f64, log_loss: f64, auc: Option<f64>, brier: f64) {
        if self.enabled(Verbosity::Info) {
            info!(accuracy, log_loss, ?auc, brier, "test split metrics");
        }
    }

    pub fn warn(&self, message: &str) {
        if self.enabled(Verbosity::Warning) {
            warn!("{message}");
        }
    }

    pub fn finish_training(&mut self) {
        if let Some(started) = self.started.take() {
            if self.enabled(Verbosity::Info) {
                info!(elapsed_ms = started.elapsed().as_millis() as u64, "training finished");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_order() {
        assert!(Verbosity::Debug > Verbosity::Info);
        assert!(Verbosity::Info > Verbosity::Warning);
        assert!(Verbosity::Warning > Verbosity::Silent);
        assert_eq!(Verbosity::default(), Verbosity::Warning);
    }

    #[test]
    fn silent_logger_gates_everything() {
        let logger = TrainingLogger::new(Verbosity::Silent);
        assert!(!logger.enabled(Verbosity::Warning));
        assert!(TrainingLogger::new(Verbosity::Info).enabled(Verbosity::Warning));
    }
}
