//! Errors for integration methods

use crate::Float;

/// Validation errors returned when constructing a [`Tableau`](crate::Tableau),
/// a [`RungeKutta`](crate::RungeKutta) integrator or calling
/// [`solve_ivp`](crate::solve_ivp).
///
/// Constructors check every rule and return all violations at once as a
/// `Vec<Error>`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{name} must be non-negative (got {value}{})", index_suffix(.index))]
    NegativeTolerance {
        name: &'static str,
        index: Option<usize>,
        value: Float,
    },
    #[error("{name} has length {got} but the state has length {expected}")]
    ToleranceLength {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("rtol and atol are both zero for component {0}")]
    ZeroTolerance(usize),
    #[error("atol + |y0| * rtol must be positive for component {index} (y0 = {y0})")]
    ZeroErrorScale { index: usize, y0: Float },
    #[error("max_step must be positive (got {0})")]
    MaxStepMustBePositive(Float),
    #[error("first_step must be positive and finite (got {0})")]
    FirstStepMustBePositive(Float),
    #[error("first_step {first_step} exceeds the integration span {span}")]
    FirstStepExceedsBounds { first_step: Float, span: Float },
    #[error("{name} must be finite (got {value})")]
    NonFiniteBound { name: &'static str, value: Float },
    #[error("safety_factor must be in (1e-4, 1.0) (got {0})")]
    SafetyFactorOutOfRange(Float),
    #[error("scale factors must satisfy 0 < scale_min < 1 < scale_max (got {0}, {1})")]
    InvalidScaleFactors(Float, Float),
    #[error("nmax must be positive (got {0})")]
    NMaxMustBePositive(usize),
    #[error("tableau must have at least one stage")]
    EmptyTableau,
    #[error("tableau coefficient {name} has length {got}, expected {expected}")]
    TableauShape {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("tableau matrix a must be strictly lower triangular (a[{0}][{1}] is non-zero)")]
    TableauNotExplicit(usize, usize),
    #[error("tableau node c[0] must be zero (got {0})")]
    TableauFirstNode(Float),
    #[error("tableau coefficient {0} contains a non-finite value")]
    TableauNonFinite(&'static str),
    #[error("tableau order must be positive (got {0})")]
    TableauOrder(usize),
}

fn index_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at component {}", i),
        None => String::new(),
    }
}
