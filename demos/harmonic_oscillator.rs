//! Example demonstrating the use of RK23 with a callback for solving a harmonic oscillator.

use rkode::prelude::*;
use std::f64::consts::PI;

struct HarmonicOscillator;

impl ODE for HarmonicOscillator {
    fn ode(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt[0] = y[1];
        dydt[1] = -y[0];
    }
}

/// Tracks the largest drift of the energy `(y0^2 + y1^2) / 2` from its initial value.
struct EnergyDrift {
    e0: f64,
    max_drift: f64,
}

impl SolOut for EnergyDrift {
    fn solout(&mut self, _t_old: f64, _t: f64, y: &[f64]) -> ControlFlag {
        let e = 0.5 * (y[0] * y[0] + y[1] * y[1]);
        self.max_drift = self.max_drift.max((e - self.e0).abs());
        ControlFlag::Continue
    }
}

fn main() {
    let harmonic_oscillator = HarmonicOscillator;
    let t0 = 0.0;
    let t_bound = 2.0 * PI;
    let y0 = [1.0, 0.0];

    let options = IVPOptions::builder()
        .method(Method::RK23)
        .rtol(1e-6)
        .atol(1e-9)
        .save_step_endpoints(false)
        .build();
    let mut drift = EnergyDrift { e0: 0.5, max_drift: 0.0 };

    match solve_ivp_with(&harmonic_oscillator, t0, t_bound, &y0, options, &mut drift) {
        Ok(sol) => {
            println!("Finished status: {:?}", sol.status);
            println!("Number of function evaluations: {}", sol.nfev);
            println!("Number of accepted steps: {}", sol.naccpt);
            println!("Number of rejected steps: {}", sol.nrejct);
            println!("Maximum energy drift over one period: {:.3e}", drift.max_drift);
        }
        Err(e) => eprintln!("solve_ivp failed: {:?}", e),
    }
}
