//! Options and method selection for solve_ivp

use bon::Builder;

use crate::{
    core::tolerance::Tolerance,
    methods::{settings::Options, tableau::Tableau},
    Float,
};

/// Solver method selection (roughly mirroring scipy.integrate.solve_ivp)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Bogacki–Shampine 3(2) adaptive RK
    RK23,
    /// Dormand–Prince 5(4) adaptive RK
    RK45,
}

impl Method {
    /// Tableau implementing the method.
    pub fn tableau(self) -> Tableau {
        match self {
            Method::RK23 => Tableau::rk23(),
            Method::RK45 => Tableau::rk45(),
        }
    }
}

#[derive(Builder, Clone, Debug)]
/// Options for solve_ivp similar to SciPy
pub struct IVPOptions {
    /// Method to use. Default: RK45 (Dormand–Prince 5(4)).
    #[builder(default = Method::RK45)]
    pub method: Method,
    /// Relative tolerance for error estimation.
    #[builder(default = Tolerance::Scalar(1e-3), into)]
    pub rtol: Tolerance,
    /// Absolute tolerance for error estimation.
    #[builder(default = Tolerance::Scalar(1e-6), into)]
    pub atol: Tolerance,
    /// Maximum number of step attempts, accepted or rejected.
    #[builder(default = 100_000)]
    pub nmax: usize,
    /// Initial step suggestion; `None` uses the built-in heuristic.
    pub first_step: Option<Float>,
    /// Maximum step size. Default: unbounded.
    pub max_step: Option<Float>,
    /// Save step endpoints (initial point and each accepted step). Default: true.
    #[builder(default = true)]
    pub save_step_endpoints: bool,
}

impl Default for IVPOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl IVPOptions {
    /// Integrator options carried by these solve options.
    pub(crate) fn integrator_options(&self) -> Options {
        Options::builder()
            .rtol(self.rtol.clone())
            .atol(self.atol.clone())
            .max_step(self.max_step.unwrap_or(Float::INFINITY))
            .maybe_first_step(self.first_step)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = IVPOptions::default();
        assert_eq!(options.method, Method::RK45);
        assert_eq!(options.nmax, 100_000);
        assert!(options.save_step_endpoints);
    }

    #[test]
    fn integrator_options_carry_over() {
        let options = IVPOptions::builder()
            .rtol(1e-9)
            .atol([1e-12, 1e-10])
            .first_step(0.01)
            .max_step(0.5)
            .build();
        let inner = options.integrator_options();
        assert_eq!(inner.rtol, Tolerance::Scalar(1e-9));
        assert_eq!(inner.atol, Tolerance::Vector(vec![1e-12, 1e-10]));
        assert_eq!(inner.first_step, Some(0.01));
        assert_eq!(inner.max_step, 0.5);
    }

    #[test]
    fn method_selects_tableau() {
        assert_eq!(Method::RK23.tableau().order(), 3);
        assert_eq!(Method::RK45.tableau().order(), 5);
    }
}
