//! A single attempt of an explicit embedded Runge-Kutta step and the
//! step-size controller deciding whether to keep it.

use crate::{
    core::{ode::ODE, tolerance::Tolerance},
    methods::tableau::Tableau,
    Float,
};

/// Row-major `(s + 1) x n` storage for the stage derivatives of one attempt.
///
/// Row 0 holds the derivative at the start of the step, rows `1..s` the
/// intermediate stages and row `s` the derivative at the candidate point.
#[derive(Clone, Debug)]
pub struct StageBuffer {
    data: Vec<Float>,
    n: usize,
    rows: usize,
}

impl StageBuffer {
    pub fn new(stages: usize, n: usize) -> Self {
        Self {
            data: vec![0.0; (stages + 1) * n],
            n,
            rows: stages + 1,
        }
    }

    pub fn row(&self, i: usize) -> &[Float] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [Float] {
        &mut self.data[i * self.n..(i + 1) * self.n]
    }

    /// Number of rows, `s + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }
}

/// Performs one Runge-Kutta attempt of signed size `h` from `(t, y)` to
/// `t_new`, the end point of the step as committed by the caller.
///
/// `k` row 0 must already hold `f(t, y)`. On return `y_new` holds the
/// propagated solution at `t_new`, `k` row `s` holds `f(t_new, y_new)` and
/// `err` holds the embedded error estimate `h * sum_j e[j] * k[j]`. `y_stage`
/// is scratch space of the state's length.
///
/// Evaluates `f` exactly `s` times.
pub fn rk_step<F>(
    f: &F,
    t: Float,
    y: &[Float],
    h: Float,
    t_new: Float,
    tableau: &Tableau,
    k: &mut StageBuffer,
    y_stage: &mut [Float],
    y_new: &mut [Float],
    err: &mut [Float],
) where
    F: ODE + ?Sized,
{
    let n = y.len();
    let s = tableau.stages();
    let (a, b, c, e) = (tableau.a(), tableau.b(), tableau.c(), tableau.e());

    // Stages 1..s
    for stage in 1..s {
        y_stage.copy_from_slice(y);
        for (j, &aij) in a[stage][..stage].iter().enumerate() {
            if aij == 0.0 {
                continue;
            }
            let kj = k.row(j);
            for i in 0..n {
                y_stage[i] += h * aij * kj[i];
            }
        }
        f.ode(t + c[stage] * h, y_stage, k.row_mut(stage));
    }

    // Propagated solution
    y_new.copy_from_slice(y);
    for (j, &bj) in b.iter().enumerate() {
        if bj == 0.0 {
            continue;
        }
        let kj = k.row(j);
        for i in 0..n {
            y_new[i] += h * bj * kj[i];
        }
    }

    // Derivative at the new point, reused as stage 0 of the next step
    f.ode(t_new, y_new, k.row_mut(s));

    // Embedded error estimate
    err.fill(0.0);
    for (j, &ej) in e.iter().enumerate() {
        if ej == 0.0 {
            continue;
        }
        let kj = k.row(j);
        for i in 0..n {
            err[i] += ej * kj[i];
        }
    }
    for v in err.iter_mut() {
        *v *= h;
    }
}

/// Scaled RMS norm of the error estimate,
/// `RMS(err / (atol + max(|y|, |y_new|) * rtol))`.
///
/// An empty state has error norm `0`.
pub fn error_norm(
    err: &[Float],
    y: &[Float],
    y_new: &[Float],
    rtol: &Tolerance,
    atol: &Tolerance,
) -> Float {
    let n = err.len();
    if n == 0 {
        return 0.0;
    }
    let mut sum: Float = 0.0;
    for i in 0..n {
        let sk = atol[i] + y[i].abs().max(y_new[i].abs()) * rtol[i];
        let q = err[i] / sk;
        sum += q * q;
    }
    (sum / n as Float).sqrt()
}

/// Outcome of judging one attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Keep the step; the next step size is `h_abs * factor`.
    Accept { factor: Float },
    /// Discard the step and retry with `h_abs * factor`.
    Reject { factor: Float },
}

/// Step-size controller of the classic form
/// `factor = safety * error_norm ^ (-1 / (error_order + 1))`,
/// clamped to `[scale_min, scale_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controller {
    pub safety: Float,
    pub scale_min: Float,
    pub scale_max: Float,
    pub exponent: Float,
}

impl Controller {
    /// Decides on an attempt with the given error norm.
    pub fn decide(&self, error_norm: Float) -> Decision {
        if error_norm < 1.0 {
            let factor = if error_norm == 0.0 {
                self.scale_max
            } else {
                self.scale_max
                    .min(self.safety * error_norm.powf(self.exponent))
            };
            Decision::Accept { factor }
        } else {
            // A NaN norm lands here too; `max` then yields `scale_min`.
            let factor = self
                .scale_min
                .max(self.safety * error_norm.powf(self.exponent));
            Decision::Reject { factor }
        }
    }
}

/// Smallest meaningful step magnitude at `t` when moving in `direction`:
/// ten times the distance to the next representable number.
pub fn min_step(t: Float, direction: Float) -> Float {
    let toward = if direction >= 0.0 {
        Float::INFINITY
    } else {
        Float::NEG_INFINITY
    };
    10.0 * (next_after(t, toward) - t).abs()
}

/// Next representable value after `x` in the direction of `toward`.
fn next_after(x: Float, toward: Float) -> Float {
    if x.is_nan() || toward.is_nan() {
        return Float::NAN;
    }
    if x == toward {
        return toward;
    }
    if x == 0.0 {
        let tiny = Float::from_bits(1);
        return if toward > 0.0 { tiny } else { -tiny };
    }
    let bits = x.to_bits();
    let away_from_zero = (toward > x) == (x > 0.0);
    Float::from_bits(if away_from_zero { bits + 1 } else { bits - 1 })
}
