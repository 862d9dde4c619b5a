use rkode::prelude::*;

mod common;
use common::{tight_integrator_opts, Exponential, VanDerPol, SHO};

#[test]
fn exponential_growth_reaches_e() {
    let tableau = Tableau::rk45();
    let options = Options::builder().rtol(1e-10).atol(1e-12).build();
    let mut solver =
        RungeKutta::new(&Exponential { rate: 1.0 }, 0.0, &[1.0], 1.0, &tableau, options).unwrap();
    let mut t_prev = solver.t();
    loop {
        match solver.step() {
            Status::Running => {
                assert!(solver.t() > t_prev);
                t_prev = solver.t();
            }
            Status::Finished => break,
            Status::Failed => panic!("integration failed at t = {}", solver.t()),
        }
    }
    assert_eq!(solver.t(), 1.0);
    assert!((solver.y()[0] - std::f64::consts::E).abs() < 1e-8);
}

#[test]
fn stiff_decay_is_stability_limited() {
    let tableau = Tableau::rk45();
    let mut solver = RungeKutta::new(
        &Exponential { rate: -1000.0 },
        0.0,
        &[1.0],
        1.0,
        &tableau,
        Options::default(),
    )
    .unwrap();
    assert_eq!(solver.run(), Status::Finished);
    assert!(solver.naccpt() > 100);
    assert_eq!(solver.nstep(), solver.naccpt() + solver.nrejct());
    assert!(solver.y()[0].abs() < 1e-3);
}

#[test]
fn zero_length_state_integrates_to_bound() {
    let f = |_t: f64, _y: &[f64], _dydt: &mut [f64]| {};
    let tableau = Tableau::rk23();
    let mut solver = RungeKutta::new(&f, 0.0, &[], 10.0, &tableau, Options::default()).unwrap();
    assert_eq!(solver.step(), Status::Finished);
    assert_eq!(solver.t(), 10.0);
    assert!(solver.y().is_empty());
    assert_eq!(solver.nrejct(), 0);
}

#[test]
fn derivative_matches_rhs_after_every_step() {
    let f = VanDerPol { eps: 1.0 };
    let tableau = Tableau::rk45();
    let mut solver =
        RungeKutta::new(&f, 0.0, &[2.0, 0.0], 5.0, &tableau, Options::default()).unwrap();
    let mut expected = [0.0; 2];
    while solver.step() == Status::Running {
        f.ode(solver.t(), solver.y(), &mut expected);
        assert_eq!(solver.derivative(), &expected);
    }
}

#[test]
fn evaluation_count_is_predictable() {
    // One evaluation at t0, one for the initial step heuristic, then s per attempt.
    for tableau in [Tableau::rk23(), Tableau::rk45()] {
        let mut solver =
            RungeKutta::new(&SHO, 0.0, &[1.0, 0.0], 4.0, &tableau, Options::default()).unwrap();
        solver.run();
        assert_eq!(solver.nfev(), 2 + tableau.stages() * solver.nstep());
    }
}

#[test]
fn integrators_share_a_tableau_across_threads() {
    let tableau = Tableau::rk45();
    let rates = [-2.0, -1.0, 0.5, 1.0];

    let sequential: Vec<f64> = rates
        .iter()
        .map(|&rate| {
            let f = Exponential { rate };
            let mut solver =
                RungeKutta::new(&f, 0.0, &[1.0], 2.0, &tableau, tight_integrator_opts()).unwrap();
            solver.run();
            solver.y()[0]
        })
        .collect();

    let parallel: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = rates
            .iter()
            .map(|&rate| {
                let tableau = &tableau;
                scope.spawn(move || {
                    let f = Exponential { rate };
                    let mut solver =
                        RungeKutta::new(&f, 0.0, &[1.0], 2.0, tableau, tight_integrator_opts())
                            .unwrap();
                    solver.run();
                    solver.y()[0]
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
    for (&rate, y) in rates.iter().zip(&parallel) {
        assert!((y - (2.0 * rate).exp()).abs() < 1e-7 * (2.0 * rate).exp().max(1.0));
    }
}

#[test]
fn non_finite_rhs_fails_without_touching_state() {
    let f = |t: f64, y: &[f64], dydt: &mut [f64]| {
        dydt[0] = if t > 0.5 { f64::NAN } else { -y[0] };
    };
    let tableau = Tableau::rk45();
    let options = Options::builder().max_step(0.1).build();
    let mut solver = RungeKutta::new(&f, 0.0, &[1.0], 2.0, &tableau, options).unwrap();

    let mut status = solver.step();
    while status == Status::Running {
        status = solver.step();
    }
    assert_eq!(status, Status::Failed);
    let (t, y, h_abs) = (solver.t(), solver.y().to_vec(), solver.h_abs());
    assert!(t <= 0.5 && y[0].is_finite());

    assert_eq!(solver.step(), Status::Failed);
    assert_eq!(solver.t(), t);
    assert_eq!(solver.y(), y.as_slice());
    assert_eq!(solver.h_abs(), h_abs);
}

#[test]
fn solve_ivp_agrees_with_manual_stepping() {
    let options = IVPOptions::builder().rtol(1e-6).atol(1e-8).build();
    let sol = solve_ivp(&SHO, 0.0, 3.0, &[1.0, 0.0], options).unwrap();

    let tableau = Tableau::rk45();
    let manual = Options::builder().rtol(1e-6).atol(1e-8).build();
    let mut solver = RungeKutta::new(&SHO, 0.0, &[1.0, 0.0], 3.0, &tableau, manual).unwrap();
    let mut samples = vec![(solver.t(), solver.y().to_vec())];
    loop {
        let status = solver.step();
        if samples.len() <= solver.naccpt() {
            samples.push((solver.t(), solver.y().to_vec()));
        }
        if status.is_terminal() {
            break;
        }
    }

    assert_eq!(sol.nfev, solver.nfev());
    assert_eq!(sol.naccpt, solver.naccpt());
    assert_eq!(sol.t.len(), samples.len());
    for ((t, y), (ts, ys)) in sol.iter().zip(&samples) {
        assert_eq!(t, *ts);
        assert_eq!(y, ys.as_slice());
    }
}
