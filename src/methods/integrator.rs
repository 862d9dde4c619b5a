//! Stateful adaptive explicit Runge-Kutta integrator.

use log::{debug, trace, warn};

use crate::{
    core::{ode::ODE, status::Status, tolerance::Tolerance},
    error::Error,
    methods::{
        hinit::hinit,
        settings::Options,
        step::{error_norm, min_step, rk_step, Controller, Decision, StageBuffer},
        tableau::Tableau,
    },
    Float,
};

/// Adaptive explicit Runge-Kutta integrator driven one step at a time.
///
/// The integrator borrows the right-hand side `f` and the [`Tableau`], and
/// owns the mutable integration state: the current time and solution, the
/// step-size guess and the stage buffer.
///
/// Invariant: `derivative()` always equals `f(t, y)`. The state only changes
/// through accepted steps, and the derivative at the end of an accepted step
/// becomes stage 0 of the next one without another evaluation.
///
/// # Example
///
/// ```ignore
/// let tableau = Tableau::rk45();
/// let f = |_t: f64, y: &[f64], dydt: &mut [f64]| dydt[0] = -y[0];
/// let mut solver = RungeKutta::new(&f, 0.0, &[1.0], 5.0, &tableau, Options::default())?;
/// loop {
///     match solver.step() {
///         Status::Running => println!("t = {}, y = {:?}", solver.t(), solver.y()),
///         Status::Finished => break,
///         Status::Failed => return Err("step size too small".into()),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct RungeKutta<'a, F: ?Sized> {
    f: &'a F,
    tableau: &'a Tableau,
    rtol: Tolerance,
    atol: Tolerance,
    max_step: Float,
    controller: Controller,

    t: Float,
    y: Vec<Float>,
    t_bound: Float,
    direction: Float,
    dydt: Vec<Float>,
    h_abs: Float,
    t_old: Option<Float>,
    h_previous: Option<Float>,
    status: Status,

    k: StageBuffer,
    y_stage: Vec<Float>,
    y_new: Vec<Float>,
    err: Vec<Float>,

    nfev: usize,
    nstep: usize,
    naccpt: usize,
    nrejct: usize,
}

impl<'a, F> RungeKutta<'a, F>
where
    F: ODE + ?Sized,
{
    /// Creates an integrator for `y' = f(t, y)`, `y(t0) = y0`, heading for `t_bound`.
    ///
    /// Evaluates `f(t0, y0)` and, unless `options.first_step` is given, picks
    /// the first step with [`hinit`] at the cost of one more evaluation.
    ///
    /// # Errors
    /// All invalid inputs are reported together, see [`Error`].
    pub fn new(
        f: &'a F,
        t0: Float,
        y0: &[Float],
        t_bound: Float,
        tableau: &'a Tableau,
        options: Options,
    ) -> Result<Self, Vec<Error>> {
        // --- Input Validation ---
        let mut errors: Vec<Error> = Vec::new();
        validate_inputs(t0, y0, t_bound, &options, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }

        // --- Declarations ---
        let n = y0.len();
        let s = tableau.stages();
        let direction = if t_bound != t0 {
            (t_bound - t0).signum()
        } else {
            1.0
        };
        let mut dydt = vec![0.0; n];
        let mut nfev = 0;

        // --- Initializations ---
        f.ode(t0, y0, &mut dydt);
        nfev += 1;

        let h_abs = match options.first_step {
            Some(h0) => h0,
            None => {
                let mut f1 = vec![0.0; n];
                let mut y1 = vec![0.0; n];
                nfev += 1;
                hinit(
                    f,
                    t0,
                    y0,
                    direction,
                    &dydt,
                    &mut f1,
                    &mut y1,
                    tableau.error_order(),
                    &options.atol,
                    &options.rtol,
                )
            }
        };
        debug!(
            "rk integrator: n = {}, stages = {}, t0 = {}, t_bound = {}, h_abs = {} ({})",
            n,
            s,
            t0,
            t_bound,
            h_abs,
            if options.first_step.is_some() { "given" } else { "hinit" }
        );

        Ok(Self {
            f,
            tableau,
            controller: Controller {
                safety: options.safety_factor,
                scale_min: options.scale_min,
                scale_max: options.scale_max,
                exponent: tableau.error_exponent(),
            },
            rtol: options.rtol,
            atol: options.atol,
            max_step: options.max_step,
            t: t0,
            y: y0.to_vec(),
            t_bound,
            direction,
            dydt,
            h_abs,
            t_old: None,
            h_previous: None,
            status: Status::Running,
            k: StageBuffer::new(s, n),
            y_stage: vec![0.0; n],
            y_new: vec![0.0; n],
            err: vec![0.0; n],
            nfev,
            nstep: 0,
            naccpt: 0,
            nrejct: 0,
        })
    }

    /// Advances the solution by one accepted step.
    ///
    /// Rejected attempts are retried internally with a smaller step. Returns
    /// `Finished` without doing anything once `t_bound` is reached, and
    /// `Failed` when the step size would drop below the spacing of floating
    /// point numbers at `t`. A failed call leaves the state untouched, so
    /// calling again from the same state fails again.
    pub fn step(&mut self) -> Status {
        if self.direction * (self.t - self.t_bound) >= 0.0 {
            self.status = Status::Finished;
            return self.status;
        }

        let t = self.t;
        let s = self.tableau.stages();
        let min_step = min_step(t, self.direction);
        let mut h_abs = self.h_abs.max(min_step);

        loop {
            h_abs = h_abs.min(self.max_step);
            let mut h = h_abs * self.direction;
            let mut t_new = t + h;
            if self.direction * (t_new - self.t_bound) > 0.0 {
                t_new = self.t_bound;
                h = t_new - t;
                h_abs = h.abs();
            }

            self.k.row_mut(0).copy_from_slice(&self.dydt);
            rk_step(
                self.f,
                t,
                &self.y,
                h,
                t_new,
                self.tableau,
                &mut self.k,
                &mut self.y_stage,
                &mut self.y_new,
                &mut self.err,
            );
            self.nfev += s;
            self.nstep += 1;

            let err_norm = error_norm(&self.err, &self.y, &self.y_new, &self.rtol, &self.atol);

            match self.controller.decide(err_norm) {
                Decision::Accept { factor } => {
                    std::mem::swap(&mut self.y, &mut self.y_new);
                    self.dydt.copy_from_slice(self.k.row(s));
                    self.t_old = Some(t);
                    self.t = t_new;
                    self.h_previous = Some(h);
                    self.h_abs = h_abs * factor;
                    self.naccpt += 1;

                    self.status = if self.direction * (self.t - self.t_bound) >= 0.0 {
                        Status::Finished
                    } else {
                        Status::Running
                    };
                    return self.status;
                }
                Decision::Reject { factor } => {
                    self.nrejct += 1;
                    trace!("step rejected: t = {}, h = {}, error norm = {}", t, h, err_norm);
                    h_abs *= factor;
                    if h_abs < min_step {
                        warn!(
                            "step size {} fell below the minimum {} at t = {}",
                            h_abs, min_step, t
                        );
                        self.status = Status::Failed;
                        return self.status;
                    }
                }
            }
        }
    }

    /// Calls [`step`](Self::step) until it returns `Finished` or `Failed`.
    pub fn run(&mut self) -> Status {
        loop {
            let status = self.step();
            if status.is_terminal() {
                return status;
            }
        }
    }

    /// Current time.
    pub fn t(&self) -> Float {
        self.t
    }

    /// Current solution.
    pub fn y(&self) -> &[Float] {
        &self.y
    }

    /// Derivative `f(t, y)` at the current point.
    pub fn derivative(&self) -> &[Float] {
        &self.dydt
    }

    /// Time the integration is heading for.
    pub fn t_bound(&self) -> Float {
        self.t_bound
    }

    /// `+1` or `-1`, fixed at construction.
    pub fn direction(&self) -> Float {
        self.direction
    }

    /// Magnitude of the step that the next call to [`step`](Self::step) will try first.
    pub fn h_abs(&self) -> Float {
        self.h_abs
    }

    /// Start of the last accepted step.
    pub fn t_old(&self) -> Option<Float> {
        self.t_old
    }

    /// Signed size of the last accepted step.
    pub fn step_size(&self) -> Option<Float> {
        self.h_previous
    }

    /// Status returned by the last call to [`step`](Self::step), `Running` before the first.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Tableau driving the integration.
    pub fn tableau(&self) -> &Tableau {
        self.tableau
    }

    /// Number of evaluations of the right-hand side, including the ones made
    /// during construction.
    pub fn nfev(&self) -> usize {
        self.nfev
    }

    /// Number of attempted steps.
    pub fn nstep(&self) -> usize {
        self.nstep
    }

    /// Number of accepted steps.
    pub fn naccpt(&self) -> usize {
        self.naccpt
    }

    /// Number of rejected attempts.
    pub fn nrejct(&self) -> usize {
        self.nrejct
    }
}

/// Checks the bounds and options of a problem without evaluating `f`.
pub(crate) fn validate_inputs(
    t0: Float,
    y0: &[Float],
    t_bound: Float,
    options: &Options,
    errors: &mut Vec<Error>,
) {
    if !t0.is_finite() {
        errors.push(Error::NonFiniteBound { name: "t0", value: t0 });
    }
    if !t_bound.is_finite() {
        errors.push(Error::NonFiniteBound { name: "t_bound", value: t_bound });
    }
    options.validate(y0, t_bound - t0, errors);
}
