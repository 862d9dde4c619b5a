//! Convenience re-exports for common types and traits.
//!
//! Import this module to get quick access to the most-used items:
//!
//! ```
//! use rkode::prelude::*;
//! ```

pub use crate::{
    core::{norm::rms_norm, ode::ODE, status::Status, tolerance::Tolerance},
    error::Error,
    methods::{
        hinit::hinit,
        integrator::RungeKutta,
        settings::Options,
        tableau::Tableau,
    },
    solve::{
        solve_ivp, solve_ivp_with, ControlFlag, ExitStatus, IVPOptions, IVPSolution, Method,
        SolOut,
    },
};
