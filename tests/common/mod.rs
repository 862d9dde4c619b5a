#![allow(dead_code)]

use rkode::prelude::*;

/// Simple harmonic oscillator: y0' = y1, y1' = -y0.
#[derive(Debug)]
pub struct SHO;

impl ODE for SHO {
    fn ode(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt[0] = y[1];
        dydt[1] = -y[0];
    }
}

/// Componentwise exponential y' = rate * y.
#[derive(Debug)]
pub struct Exponential {
    pub rate: f64,
}

impl ODE for Exponential {
    fn ode(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        for (d, v) in dydt.iter_mut().zip(y) {
            *d = self.rate * v;
        }
    }
}

/// Van der Pol oscillator, stiff for small eps.
#[derive(Debug)]
pub struct VanDerPol {
    pub eps: f64,
}

impl ODE for VanDerPol {
    fn ode(&self, _t: f64, y: &[f64], dydt: &mut [f64]) {
        dydt[0] = y[1];
        dydt[1] = ((1.0 - y[0] * y[0]) * y[1] - y[0]) / self.eps;
    }
}

pub fn tight_opts(method: Method) -> IVPOptions {
    IVPOptions::builder()
        .method(method)
        .rtol(1e-9)
        .atol(1e-11)
        .build()
}

pub fn tight_integrator_opts() -> Options {
    Options::builder().rtol(1e-9).atol(1e-11).build()
}
