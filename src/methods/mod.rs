//! Explicit embedded Runge-Kutta method: tableau, initial step selection,
//! single-step engine and the stateful integrator.

pub mod hinit;
pub mod integrator;
pub mod settings;
pub mod step;
pub mod tableau;
