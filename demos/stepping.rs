//! # Example: Manual stepping
//!
//! Drive the integrator one accepted step at a time and watch the step size
//! adapt while integrating the Lotka-Volterra predator-prey model.
//!
//! Equations:
//! dx/dt = a*x - b*x*y
//! dy/dt = d*x*y - c*y
//!

use rkode::prelude::*;

struct LotkaVolterra {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl ODE for LotkaVolterra {
    fn ode(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt[0] = self.a * y[0] - self.b * y[0] * y[1];
        dydt[1] = self.d * y[0] * y[1] - self.c * y[1];
    }
}

fn main() -> Result<(), Vec<Error>> {
    let f = LotkaVolterra { a: 1.5, b: 1.0, c: 3.0, d: 1.0 };
    let tableau = Tableau::rk45();
    let options = Options::builder().rtol(1e-6).atol(1e-9).build();
    let mut solver = RungeKutta::new(&f, 0.0, &[10.0, 5.0], 15.0, &tableau, options)?;

    loop {
        let status = solver.step();
        if let Some(h) = solver.step_size() {
            println!(
                "t = {:>8.4}  h = {:.3e}  prey = {:>9.5}  predators = {:>9.5}",
                solver.t(),
                h,
                solver.y()[0],
                solver.y()[1]
            );
        }
        match status {
            Status::Running => continue,
            Status::Finished => break,
            Status::Failed => {
                eprintln!("step size too small at t = {}", solver.t());
                break;
            }
        }
    }

    println!(
        "nfev = {}, nstep = {}, naccpt = {}, nrejct = {}",
        solver.nfev(),
        solver.nstep(),
        solver.naccpt(),
        solver.nrejct()
    );
    Ok(())
}
