//! Root-mean-square norm used by the error estimator and step selection.

use crate::Float;

/// Root-mean-square magnitude `sqrt(sum(x_i^2) / n)`.
///
/// An empty vector has norm `0.0`, so a zero-length state is always
/// considered converged. NaN and infinity propagate.
pub fn rms_norm(x: &[Float]) -> Float {
    if x.is_empty() {
        return 0.0;
    }
    let sum: Float = x.iter().map(|v| v * v).sum();
    (sum / x.len() as Float).sqrt()
}

/// RMS norm of `x / scale` without materializing the quotient.
pub(crate) fn scaled_rms_norm(x: &[Float], scale: &[Float]) -> Float {
    if x.is_empty() {
        return 0.0;
    }
    let mut sum: Float = 0.0;
    for (xi, si) in x.iter().zip(scale) {
        let q = xi / si;
        sum += q * q;
    }
    (sum / x.len() as Float).sqrt()
}
