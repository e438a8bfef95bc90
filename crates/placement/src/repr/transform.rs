//! Margin-to-probability transforms.
//!
//! Both the logistic classifier and the sigmoid calibrator map a real-valued
//! margin into (0, 1) through [`sigmoid`].

/// Numerically stable logistic sigmoid.
///
/// Clamps input to [-500, 500] and branches on sign so `exp` never overflows.
/// NaN propagates.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    let clamped = x.clamp(-500.0, 500.0);
    if clamped >= 0.0 {
        1.0 / (1.0 + (-clamped).exp())
    } else {
        let e = clamped.exp();
        e / (1.0 + e)
    }
}

/// `ln(1 + exp(x))` without overflow.
#[inline]
pub fn softplus(x: f64) -> f64 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

/// Log-odds of a probability, clamped away from 0 and 1.
#[inline]
pub fn logit(p: f64) -> f64 {
    let p = p.clamp(1e-7, 1.0 - 1e-7);
    (p / (1.0 - p)).ln()
}
