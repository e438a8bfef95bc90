//! Platt sigmoid fitting.
//!
//! Newton's method with backtracking on the regularised targets of Lin, Lin
//! and Weng, "A note on Platt's probabilistic outputs for support vector
//! machines" (2007).

use crate::repr::SigmoidCalibrator;

const MAX_ITER: usize = 100;
const MIN_STEP: f64 = 1e-10;
const SIGMA: f64 = 1e-12;
const EPS: f64 = 1e-5;

/// Negative log-likelihood term for one sample, stable for large `|fApB|`.
#[inline]
fn nll(f_apb: f64, target: f64) -> f64 {
    if f_apb >= 0.0 {
        target * f_apb + (-f_apb).exp().ln_1p()
    } else {
        (target - 1.0) * f_apb + f_apb.exp().ln_1p()
    }
}

fn objective(decisions: &[f64], targets: &[f64], a: f64, b: f64) -> f64 {
    decisions
        .iter()
        .zip(targets)
        .map(|(&f, &t)| nll(f * a + b, t))
        .sum()
}

/// Fit `p = 1 / (1 + exp(a·f + b))` to held-out margins and 0/1 labels.
///
/// Labels are smoothed to `(N+ + 1)/(N+ + 2)` and `1/(N- + 2)`, so the fit
/// stays finite on separable margins.
pub fn fit_sigmoid(decisions: &[f64], labels: &[f64]) -> SigmoidCalibrator {
    debug_assert_eq!(decisions.len(), labels.len());
    let n_pos = labels.iter().filter(|&&y| y > 0.5).count() as f64;
    let n_neg = labels.len() as f64 - n_pos;

    let hi = (n_pos + 1.0) / (n_pos + 2.0);
    let lo = 1.0 / (n_neg + 2.0);
    let targets: Vec<f64> = labels.iter().map(|&y| if y > 0.5 { hi } else { lo }).collect();

    let mut a = 0.0;
    let mut b = ((n_neg + 1.0) / (n_pos + 1.0)).ln();
    let mut fval = objective(decisions, &targets, a, b);

    for _ in 0..MAX_ITER {
        let (mut h11, mut h22, mut h21) = (SIGMA, SIGMA, 0.0);
        let (mut g1, mut g2) = (0.0, 0.0);
        for (&f, &t) in decisions.iter().zip(&targets) {
            let f_apb = f * a + b;
            let (p, q) = if f_apb >= 0.0 {
                let e = (-f_apb).exp();
                (e / (1.0 + e), 1.0 / (1.0 + e))
            } else {
                let e = f_apb.exp();
                (1.0 / (1.0 + e), e / (1.0 + e))
            };
            let d2 = p * q;
            h11 += f * f * d2;
            h22 += d2;
            h21 += f * d2;
            let d1 = t - p;
            g1 += f * d1;
            g2 += d1;
        }

        if g1.abs() < EPS && g2.abs() < EPS {
            break;
        }

        let det = h11 * h22 - h21 * h21;
        let da = -(h22 * g1 - h21 * g2) / det;
        let db = -(-h21 * g1 + h11 * g2) / det;
        let gd = g1 * da + g2 * db;

        let mut step = 1.0;
        while step >= MIN_STEP {
            let (new_a, new_b) = (a + step * da, b + step * db);
            let new_f = objective(decisions, &targets, new_a, new_b);
            if new_f < fval + 1e-4 * step * gd {
                a = new_a;
                b = new_b;
                fval = new_f;
                break;
            }
            step *= 0.5;
        }
        if step < MIN_STEP {
            // No sufficient decrease along the Newton direction.
            break;
        }
    }

    SigmoidCalibrator::new(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn constant_margins_recover_smoothed_prior() {
        // With no signal, the fit predicts the smoothed positive rate.
        let decisions = [0.0; 10];
        let labels = [1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let cal = fit_sigmoid(&decisions, &labels);
        let p = cal.predict(0.0);
        assert!(p > 0.25 && p < 0.4, "p = {p}");
    }

    #[test]
    fn informative_margins_give_increasing_map() {
        let decisions = [-3.0, -2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0, 3.0, 0.2];
        let labels = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0];
        let cal = fit_sigmoid(&decisions, &labels);
        assert!(cal.a < 0.0, "a = {}", cal.a);
        let mut previous = 0.0;
        for i in -50..=50 {
            let p = cal.predict(i as f64 * 0.1);
            assert!(p > 0.0 && p < 1.0);
            assert!(p >= previous);
            previous = p;
        }
    }

    #[test]
    fn separable_margins_stay_finite() {
        let decisions = [-2.0, -1.0, 1.0, 2.0];
        let labels = [0.0, 0.0, 1.0, 1.0];
        let cal = fit_sigmoid(&decisions, &labels);
        assert!(cal.a.is_finite() && cal.b.is_finite());
        assert!(cal.predict(2.0) < 1.0);
        assert!(cal.predict(2.0) > cal.predict(-2.0));
    }

    #[test]
    fn nll_branches_agree() {
        assert_abs_diff_eq!(nll(1e-9, 0.3), nll(-1e-9, 0.3), epsilon = 1e-8);
    }
}
