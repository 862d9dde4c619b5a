//! Adaptive explicit Runge-Kutta integration of initial value problems (IVPs)
//! for ordinary differential equations (ODEs).
//!
//! The kernel is split into an immutable [`Tableau`] describing the method,
//! a [`RungeKutta`] integrator owning the mutable state, and a SciPy-like
//! [`solve_ivp`] driver built on top of it.
//!
//! ```ignore
//! use rkode::prelude::*;
//!
//! let tableau = Tableau::rk45();
//! let f = |_t: f64, y: &[f64], dydt: &mut [f64]| dydt[0] = y[0];
//! let options = Options::builder().rtol(1e-8).atol(1e-8).build();
//! let mut solver = RungeKutta::new(&f, 0.0, &[1.0], 1.0, &tableau, options).unwrap();
//! while solver.step() == Status::Running {}
//! ```

pub mod core;
pub mod error;
pub mod methods;
pub mod prelude;
pub mod solve;

pub use crate::core::{norm::rms_norm, ode::ODE, status::Status, tolerance::Tolerance};
pub use error::Error;
pub use methods::{
    hinit::hinit,
    integrator::RungeKutta,
    settings::Options,
    tableau::Tableau,
};
pub use solve::{
    solve_ivp, solve_ivp_with, ControlFlag, ExitStatus, IVPOptions, IVPSolution, Method, SolOut,
};

// Prevent selecting two incompatible float precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; pick exactly one Float precision feature"
);

/// Floating point type used throughout the crate, selected by feature.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f64")]
pub type Float = f64;
