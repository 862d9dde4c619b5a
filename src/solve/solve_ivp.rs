//! SciPy-like solve_ivp entry point implementation

use log::debug;

use crate::{
    core::{ode::ODE, status::Status},
    error::Error,
    methods::integrator::{validate_inputs, RungeKutta},
    Float,
};

use super::{
    options::IVPOptions,
    solout::{ControlFlag, DefaultSolOut, DummySolOut, SolOut},
    solution::{ExitStatus, IVPSolution},
};

/// Solve an initial value problem with SciPy-like options.
///
/// Integrates `y' = f(t, y)`, `y(t0) = y0` from `t0` to `t_bound` (which may
/// lie before `t0`) with the method selected in `options`.
///
/// # Errors
/// All invalid inputs are reported together, see [`Error`]. Running out of
/// steps or step size is not an error; check [`IVPSolution::status`].
pub fn solve_ivp<F>(
    f: &F,
    t0: Float,
    t_bound: Float,
    y0: &[Float],
    options: IVPOptions,
) -> Result<IVPSolution, Vec<Error>>
where
    F: ODE + ?Sized,
{
    solve_ivp_with(f, t0, t_bound, y0, options, &mut DummySolOut)
}

/// Like [`solve_ivp`], calling `solout` at the initial point and after each
/// accepted step. Returning [`ControlFlag::Interrupt`] stops the integration
/// with [`ExitStatus::Interrupted`].
pub fn solve_ivp_with<F, S>(
    f: &F,
    t0: Float,
    t_bound: Float,
    y0: &[Float],
    options: IVPOptions,
    solout: &mut S,
) -> Result<IVPSolution, Vec<Error>>
where
    F: ODE + ?Sized,
    S: SolOut + ?Sized,
{
    // Validate everything before the first evaluation of f
    let mut errors: Vec<Error> = Vec::new();
    if options.nmax == 0 {
        errors.push(Error::NMaxMustBePositive(options.nmax));
    }
    let integrator_options = options.integrator_options();
    validate_inputs(t0, y0, t_bound, &integrator_options, &mut errors);
    if !errors.is_empty() {
        return Err(errors);
    }

    let tableau = options.method.tableau();
    let mut solver = RungeKutta::new(f, t0, y0, t_bound, &tableau, integrator_options)?;

    let mut output = DefaultSolOut::new(options.save_step_endpoints, solout);

    let mut status = match output.solout(t0, t0, y0) {
        ControlFlag::Interrupt => ExitStatus::Interrupted,
        ControlFlag::Continue => ExitStatus::Success,
    };

    if status == ExitStatus::Success {
        status = loop {
            if solver.status() == Status::Finished {
                break ExitStatus::Success;
            }
            if solver.nstep() >= options.nmax {
                break ExitStatus::NeedLargerNmax;
            }

            let accepted = solver.naccpt();
            let step_status = solver.step();
            if step_status == Status::Failed {
                break ExitStatus::StepSizeTooSmall;
            }
            if solver.naccpt() > accepted {
                let t_old = solver.t_old().unwrap_or(t0);
                if let ControlFlag::Interrupt = output.solout(t_old, solver.t(), solver.y()) {
                    break ExitStatus::Interrupted;
                }
            }
        };
    }

    debug!(
        "solve_ivp: {:?} at t = {} ({} evaluations, {} steps, {} accepted, {} rejected)",
        status,
        solver.t(),
        solver.nfev(),
        solver.nstep(),
        solver.naccpt(),
        solver.nrejct()
    );

    let (t, y) = output.into_data();
    Ok(IVPSolution {
        t,
        y,
        nfev: solver.nfev(),
        nstep: solver.nstep(),
        naccpt: solver.naccpt(),
        nrejct: solver.nrejct(),
        status,
    })
}
