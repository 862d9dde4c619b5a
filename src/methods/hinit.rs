//! Compute an initial step size guess

use crate::{
    core::{norm::scaled_rms_norm, ode::ODE, tolerance::Tolerance},
    Float,
};

/// Compute an initial step size magnitude for an explicit method.
///
/// Follows the heuristic of Hairer, Nørsett and Wanner, "Solving Ordinary
/// Differential Equations I", Sec. II.4: a first guess from the ratio of the
/// scaled state and derivative norms, refined by one explicit Euler trial step
/// that estimates the second derivative.
///
/// - `f0` must hold `f(x, y)`.
/// - `f1` and `y1` are scratch buffers of the state's length.
/// - `posneg` is the integration direction, `+1` or `-1`.
/// - `iord` is the order of the error estimator.
///
/// Costs exactly one evaluation of `f`. Returns `+infinity` for an empty
/// state, and a positive finite value otherwise.
pub fn hinit<F>(
    f: &F,
    x: Float,
    y: &[Float],
    posneg: Float,
    f0: &[Float],
    f1: &mut [Float],
    y1: &mut [Float],
    iord: usize,
    atol: &Tolerance,
    rtol: &Tolerance,
) -> Float
where
    F: ODE + ?Sized,
{
    let n = y.len();
    if n == 0 {
        return Float::INFINITY;
    }

    let scale: Vec<Float> = (0..n).map(|i| atol[i] + y[i].abs() * rtol[i]).collect();
    let d0 = scaled_rms_norm(y, &scale);
    let d1 = scaled_rms_norm(f0, &scale);

    let h0: Float = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    };

    // Explicit Euler step: y1 = y + h0 * f0
    for i in 0..n {
        y1[i] = y[i] + h0 * posneg * f0[i];
    }
    f.ode(x + h0 * posneg, y1, f1);

    // Estimate second derivative
    let mut der2: Float = 0.0;
    for i in 0..n {
        let df = (f1[i] - f0[i]) / scale[i];
        der2 += df * df;
    }
    let d2 = (der2 / n as Float).sqrt() / h0;

    let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
        (1e-6 as Float).max(h0 * 1e-3)
    } else {
        (0.01 / d1.max(d2)).powf(1.0 / (iord as Float + 1.0))
    };

    (100.0 * h0).min(h1)
}
