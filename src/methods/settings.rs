//! Settings for the Runge-Kutta integrator

use bon::Builder;

use crate::{
    core::tolerance::{validate_pair, Tolerance},
    error::Error,
    Float,
};

/// Safety factor applied to the optimal step-size prediction.
pub const SAFETY: Float = 0.9;
/// Smallest allowed ratio `h_new / h_old` after a rejected step.
pub const MIN_FACTOR: Float = 0.2;
/// Largest allowed ratio `h_new / h_old` after an accepted step.
pub const MAX_FACTOR: Float = 10.0;

#[derive(Builder, Clone, Debug)]
/// Options for the [`RungeKutta`](crate::RungeKutta) integrator
///
/// ```ignore
/// let options = Options::builder()
///     .rtol(1e-6)
///     .atol([1e-8, 1e-10])
///     .max_step(0.1)
///     .build();
/// ```
pub struct Options {
    /// Relative tolerance for error estimation. Default is 1e-3.
    #[builder(default = Tolerance::Scalar(1e-3), into)]
    pub rtol: Tolerance,
    /// Absolute tolerance for error estimation. Default is 1e-6.
    #[builder(default = Tolerance::Scalar(1e-6), into)]
    pub atol: Tolerance,
    /// Maximal step size. Default is unbounded.
    #[builder(default = Float::INFINITY)]
    pub max_step: Float,
    /// Initial step size. None will result in an initial guess
    /// provided by the [`crate::hinit`] function.
    pub first_step: Option<Float>,
    /// Safety factor in step-size prediction. Default is 0.9.
    #[builder(default = SAFETY)]
    pub safety_factor: Float,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    /// Default is 0.2.
    #[builder(default = MIN_FACTOR)]
    pub scale_min: Float,
    /// Parameter for step size selection where scale_min <= hnew/hold <= scale_max
    /// Default is 10.0.
    #[builder(default = MAX_FACTOR)]
    pub scale_max: Float,
}

impl Default for Options {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Options {
    /// Validates the options for a problem starting at `y0` and spanning `span = t_bound - t0`.
    pub(crate) fn validate(&self, y0: &[Float], span: Float, errors: &mut Vec<Error>) {
        let n = y0.len();
        self.rtol.validate("rtol", n, errors);
        self.atol.validate("atol", n, errors);
        validate_pair(&self.rtol, &self.atol, y0, errors);

        if !(self.max_step > 0.0) {
            errors.push(Error::MaxStepMustBePositive(self.max_step));
        }

        if let Some(h0) = self.first_step {
            if !(h0 > 0.0) || !h0.is_finite() {
                errors.push(Error::FirstStepMustBePositive(h0));
            } else if span.is_finite() && h0 > span.abs() {
                errors.push(Error::FirstStepExceedsBounds {
                    first_step: h0,
                    span: span.abs(),
                });
            }
        }

        if self.safety_factor >= 1.0 || !(self.safety_factor > 1e-4) {
            errors.push(Error::SafetyFactorOutOfRange(self.safety_factor));
        }

        if !(self.scale_min > 0.0 && self.scale_min < 1.0 && self.scale_max > 1.0) {
            errors.push(Error::InvalidScaleFactors(self.scale_min, self.scale_max));
        }
    }
}
