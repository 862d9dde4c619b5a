//! # Example: Van der Pol oscillator
//!
//! Solve the stiff Van der Pol oscillator as a first-order system. An explicit
//! method stays stable only with small steps, which shows in the step counts.
//!
//! Equations:
//! dy0/dt = y1
//! dy1/dt = ((1 - y0^2) * y1 - y0) / eps
//!
//! Initial conditions: y0(0) = 2.0, y1(0) = 0.0
//!

use rkode::prelude::*;

struct VanDerPol {
    eps: f64,
}

impl ODE for VanDerPol {
    fn ode(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt[0] = y[1];
        dydt[1] = ((1.0 - y[0] * y[0]) * y[1] - y[0]) / self.eps;
    }
}

fn main() {
    let t0 = 0.0;
    let t_bound = 2.0;
    let y0 = [2.0, 0.0];

    for eps in [1.0, 1e-1, 1e-3] {
        let van_der_pol = VanDerPol { eps };
        let options = IVPOptions::builder()
            .rtol(1e-6)
            .atol(1e-9)
            .save_step_endpoints(false)
            .build();

        match solve_ivp(&van_der_pol, t0, t_bound, &y0, options) {
            Ok(sol) => println!(
                "eps = {:>6}: {:?}, nfev = {}, naccpt = {}, nrejct = {}",
                eps, sol.status, sol.nfev, sol.naccpt, sol.nrejct
            ),
            Err(e) => eprintln!("solve_ivp failed: {:?}", e),
        }
    }
}
