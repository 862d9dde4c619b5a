//! # Example: Exponential Decay
//!
//! Solve the exponential decay equation with solve_ivp.
//!
//! Equations:
//! dy/dt = -y
//!
//! Initial condition: y(0) = 1.0
//!

use rkode::prelude::*;

struct SimpleODE;

impl ODE for SimpleODE {
    fn ode(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        for i in 0..y.len() {
            dydt[i] = -y[i];
        }
    }
}

fn main() {
    let f = SimpleODE;
    let t0 = 0.0;
    let t_bound = 5.0;
    let y0 = [1.0];

    let options = IVPOptions::builder()
        // Default method is RK45 (Dormand–Prince 5(4))
        .rtol(1e-6)
        .atol(1e-6)
        .build();

    match solve_ivp(&f, t0, t_bound, &y0, options) {
        Ok(sol) => {
            println!("Final status: {:?}", sol.status);
            if let Some((t_last, y_last)) = sol.last() {
                println!("Final state: t = {:.5}, y = {:?}, exact = {:.8}", t_last, y_last, (-t_last).exp());
            }
            println!("Number of function evaluations: {}", sol.nfev);
            println!("Number of steps taken: {}", sol.nstep);
            println!("Number of accepted steps: {}", sol.naccpt);
            println!("Number of rejected steps: {}", sol.nrejct);

            for (ti, yi) in sol.iter() {
                println!("t = {:.4}, y = {:?}", ti, yi);
            }
        }
        Err(e) => eprintln!("Integration failed: {:?}", e),
    }
}
