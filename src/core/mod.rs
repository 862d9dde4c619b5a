//! Core traits and types used throughout the library.

pub mod norm;
pub mod ode;
pub mod status;
pub mod tolerance;
