//! Tolerance abstraction to allow scalar or vector tolerances

use std::ops::Index;

use crate::{error::Error, Float};

/// Tolerance enum to allow scalar or vector tolerances
/// using [`Into`] trait for easy conversion from `Float`, `[Float; N]`, `&[Float]`
/// or `Vec<Float>`. A scalar applies to every state component, a vector must
/// match the state's length.
#[derive(Clone, Debug, PartialEq)]
pub enum Tolerance {
    Scalar(Float),
    Vector(Vec<Float>),
}

impl Tolerance {
    /// Checks the tolerance against a state of length `n`, pushing every
    /// violation into `errors`. `name` identifies the tolerance in messages.
    pub(crate) fn validate(&self, name: &'static str, n: usize, errors: &mut Vec<Error>) {
        match self {
            Tolerance::Scalar(v) => {
                if !(*v >= 0.0) {
                    errors.push(Error::NegativeTolerance { name, index: None, value: *v });
                }
            }
            Tolerance::Vector(vs) => {
                if vs.len() != n {
                    errors.push(Error::ToleranceLength { name, expected: n, got: vs.len() });
                }
                for (i, v) in vs.iter().enumerate() {
                    if !(*v >= 0.0) {
                        errors.push(Error::NegativeTolerance { name, index: Some(i), value: *v });
                    }
                }
            }
        }
    }
}

/// Checks that the error scale `atol + |y0| * rtol` is positive for every
/// component. Components with a negative or NaN tolerance are reported by
/// [`Tolerance::validate`] and skipped here.
pub(crate) fn validate_pair(rtol: &Tolerance, atol: &Tolerance, y0: &[Float], errors: &mut Vec<Error>) {
    let n = y0.len();
    let len_ok = |t: &Tolerance| match t {
        Tolerance::Scalar(_) => true,
        Tolerance::Vector(vs) => vs.len() == n,
    };
    if !len_ok(rtol) || !len_ok(atol) {
        return;
    }
    for (i, y) in y0.iter().enumerate() {
        let (r, a) = (rtol[i], atol[i]);
        if !(r >= 0.0 && a >= 0.0) {
            continue;
        }
        if r == 0.0 && a == 0.0 {
            errors.push(Error::ZeroTolerance(i));
        } else if !(a + y.abs() * r > 0.0) {
            errors.push(Error::ZeroErrorScale { index: i, y0: *y });
        }
    }
}

impl From<Float> for Tolerance {
    fn from(val: Float) -> Self {
        Tolerance::Scalar(val)
    }
}

impl From<&[Float]> for Tolerance {
    fn from(val: &[Float]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl<const N: usize> From<[Float; N]> for Tolerance {
    fn from(val: [Float; N]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl From<Vec<Float>> for Tolerance {
    fn from(val: Vec<Float>) -> Self {
        Tolerance::Vector(val)
    }
}

impl Index<usize> for Tolerance {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Tolerance::Scalar(v) => v,
            Tolerance::Vector(vs) => &vs[index],
        }
    }
}
