//! User-supplied ODE system.

use crate::Float;

/// User-supplied ODE system.
///
/// Implement this trait for your problem to provide the right-hand side
/// function y' = f(t, y). The integrator repeatedly calls `ode` with the
/// current time `t` and state `y` and expects you to fill `dydt` with the
/// derivative values. The integrator assumes repeated calls with the same
/// arguments produce the same derivative.
///
/// Closures of the form `Fn(Float, &[Float], &mut [Float])` implement the
/// trait as well.
///
/// # Example
///
/// ```ignore
/// struct VanDerPol { eps: f64 }
/// impl ODE for VanDerPol {
///     fn ode(&self, t: f64, y: &[f64], dydt: &mut [f64]) {
///         dydt[0] = y[1];
///         dydt[1] = ((1.0 - y[0]*y[0])*y[1] - y[0]) / self.eps;
///     }
/// }
/// ```
pub trait ODE {
    fn ode(&self, t: Float, y: &[Float], dydt: &mut [Float]);
}

impl<F> ODE for F
where
    F: Fn(Float, &[Float], &mut [Float]),
{
    fn ode(&self, t: Float, y: &[Float], dydt: &mut [Float]) {
        self(t, y, dydt)
    }
}
