//! L2-regularised logistic regression by Newton coordinate descent.
//!
//! Minimises `Σ loss(m_i, y_i) + (λ/2)·‖w‖²` with `λ = 1/C` and an
//! unpenalised intercept. Each sweep updates the intercept, then every
//! coordinate in column order, recomputing gradients after each step.

use ndarray::ArrayView2;

use super::logger::TrainingLogger;
use super::objective::{GradHess, LogisticLoss};
use crate::repr::LinearModel;

/// Armijo sufficient-decrease constant.
const ARMIJO: f64 = 1e-4;
const MAX_HALVINGS: usize = 20;

/// Solver settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticRegression {
    /// Inverse regularisation strength.
    pub c: f64,
    /// Stop once the largest coordinate step in a sweep is below this.
    pub tol: f64,
    /// Maximum number of full sweeps.
    pub max_iter: usize,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            c: 1.0,
            tol: 1e-4,
            max_iter: 100,
        }
    }
}

/// A fitted classifier plus solver diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit {
    pub model: LinearModel,
    pub sweeps: usize,
    pub converged: bool,
}

/// Per-fit working buffers.
struct State<'a> {
    x: ArrayView2<'a, f64>,
    y: &'a [f64],
    lambda: f64,
    model: LinearModel,
    margins: Vec<f64>,
    grads: Vec<GradHess>,
}

impl State<'_> {
    fn refresh_gradients(&mut self) {
        LogisticLoss::compute_gradients(&self.margins, self.y, &mut self.grads);
    }

    /// Value of `column` for every row; `None` for the intercept.
    fn value(&self, row: usize, column: Option<usize>) -> f64 {
        column.map_or(1.0, |j| self.x[[row, j]])
    }

    /// Newton step for one coordinate (or the intercept), line-searched.
    fn step(&mut self, column: Option<usize>) -> f64 {
        let (penalty, weight) = match column {
            Some(j) => (self.lambda, self.model.weight(j)),
            None => (0.0, self.model.bias()),
        };

        let mut grad = penalty * weight;
        let mut hess = penalty;
        for (row, gh) in self.grads.iter().enumerate() {
            let v = self.value(row, column);
            grad += gh.grad * v;
            hess += gh.hess * v * v;
        }
        if hess.abs() < 1e-10 {
            return 0.0;
        }
        let direction = -grad / hess;

        // Backtracking on the one-dimensional objective.
        let objective = |t: f64| -> f64 {
            let loss: f64 = (0..self.y.len())
                .map(|row| {
                    let m = self.margins[row] + t * direction * self.value(row, column);
                    LogisticLoss::loss(m, self.y[row])
                })
                .sum();
            let w = weight + t * direction;
            loss + 0.5 * penalty * w * w
        };
        let f0 = objective(0.0);
        let slope = grad * direction;
        let mut t = 1.0;
        let mut accepted = false;
        for _ in 0..MAX_HALVINGS {
            if objective(t) <= f0 + ARMIJO * t * slope {
                accepted = true;
                break;
            }
            t *= 0.5;
        }
        if !accepted {
            return 0.0;
        }

        let delta = t * direction;
        match column {
            Some(j) => self.model.add_weight(j, delta),
            None => self.model.add_bias(delta),
        }
        for row in 0..self.margins.len() {
            let v = self.value(row, column);
            self.margins[row] += delta * v;
        }
        self.refresh_gradients();
        delta
    }
}

impl LogisticRegression {
    /// Fit on standardised features `[n_samples, n_features]` and 0/1 labels.
    ///
    /// # Panics
    ///
    /// Panics if row counts differ.
    pub fn fit<'a>(
        &self,
        x: ArrayView2<'a, f64>,
        y: &'a [f64],
        logger: &TrainingLogger,
    ) -> LinearFit {
        assert_eq!(x.nrows(), y.len(), "feature rows and labels differ in length");
        let n_features = x.ncols();

        let mut model = LinearModel::zeros(n_features);
        let base = LogisticLoss::base_score(y);
        model.set_bias(base);

        let mut state = State {
            x,
            y,
            lambda: 1.0 / self.c,
            model,
            margins: vec![base; y.len()],
            grads: vec![GradHess::default(); y.len()],
        };
        state.refresh_gradients();

        let mut converged = false;
        let mut sweeps = 0;
        for sweep in 1..=self.max_iter {
            sweeps = sweep;
            let mut max_delta = state.step(None).abs();
            for j in 0..n_features {
                max_delta = max_delta.max(state.step(Some(j)).abs());
            }
            logger.log_sweep(sweep, max_delta);
            if max_delta < self.tol {
                converged = true;
                break;
            }
        }
        logger.log_fit(sweeps, converged);

        LinearFit {
            model: state.model,
            sweeps,
            converged,
        }
    }
}
