//! Butcher tableau with an embedded error estimator.

use crate::{error::Error, Float};

/// Coefficients of an explicit embedded Runge-Kutta pair.
///
/// For a method with `s` stages:
/// - `a`: `s x s` strictly lower-triangular stage-coupling matrix,
/// - `b`: `s` weights combining the stages into the accepted increment,
/// - `c`: `s` nodes (fractions of the step) at which stages are evaluated,
///   with `c[0] == 0`,
/// - `e`: `s + 1` error weights; the extra last weight applies to the
///   derivative at the new point.
///
/// A tableau is immutable after construction and can be shared by reference
/// between any number of integrators and threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Tableau {
    a: Vec<Vec<Float>>,
    b: Vec<Float>,
    c: Vec<Float>,
    e: Vec<Float>,
    order: usize,
    error_order: usize,
    error_exponent: Float,
}

impl Tableau {
    /// Builds a tableau from its coefficients, checking shapes and that the
    /// method is explicit.
    pub fn new(
        a: Vec<Vec<Float>>,
        b: Vec<Float>,
        c: Vec<Float>,
        e: Vec<Float>,
        order: usize,
        error_order: usize,
    ) -> Result<Self, Vec<Error>> {
        let mut errors: Vec<Error> = Vec::new();
        let s = b.len();

        if s == 0 {
            return Err(vec![Error::EmptyTableau]);
        }
        if a.len() != s {
            errors.push(Error::TableauShape { name: "a", expected: s, got: a.len() });
        }
        for row in a.iter() {
            if row.len() != s {
                errors.push(Error::TableauShape { name: "a row", expected: s, got: row.len() });
            }
        }
        if c.len() != s {
            errors.push(Error::TableauShape { name: "c", expected: s, got: c.len() });
        }
        if e.len() != s + 1 {
            errors.push(Error::TableauShape { name: "e", expected: s + 1, got: e.len() });
        }

        for (i, row) in a.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                if j >= i && *v != 0.0 {
                    errors.push(Error::TableauNotExplicit(i, j));
                }
            }
        }
        if let Some(c0) = c.first() {
            if *c0 != 0.0 {
                errors.push(Error::TableauFirstNode(*c0));
            }
        }

        let finite = |v: &[Float]| v.iter().all(|x| x.is_finite());
        if !a.iter().all(|row| finite(row)) {
            errors.push(Error::TableauNonFinite("a"));
        }
        if !finite(&b) {
            errors.push(Error::TableauNonFinite("b"));
        }
        if !finite(&c) {
            errors.push(Error::TableauNonFinite("c"));
        }
        if !finite(&e) {
            errors.push(Error::TableauNonFinite("e"));
        }
        if order == 0 {
            errors.push(Error::TableauOrder(order));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            a,
            b,
            c,
            e,
            order,
            error_order,
            error_exponent: -1.0 / (error_order as Float + 1.0),
        })
    }

    /// Bogacki–Shampine 3(2) pair, 3 stages plus the derivative at the new point.
    pub fn rk23() -> Self {
        Self {
            a: vec![
                vec![0.0, 0.0, 0.0],
                vec![RK23_A21, 0.0, 0.0],
                vec![0.0, RK23_A32, 0.0],
            ],
            b: vec![RK23_B1, RK23_B2, RK23_B3],
            c: vec![0.0, RK23_C2, RK23_C3],
            e: vec![RK23_E1, RK23_E2, RK23_E3, RK23_E4],
            order: 3,
            error_order: 2,
            error_exponent: -1.0 / 3.0,
        }
    }

    /// Dormand–Prince 5(4) pair, 6 stages plus the derivative at the new point.
    pub fn rk45() -> Self {
        Self {
            a: vec![
                vec![0.0; 6],
                vec![DP_A21, 0.0, 0.0, 0.0, 0.0, 0.0],
                vec![DP_A31, DP_A32, 0.0, 0.0, 0.0, 0.0],
                vec![DP_A41, DP_A42, DP_A43, 0.0, 0.0, 0.0],
                vec![DP_A51, DP_A52, DP_A53, DP_A54, 0.0, 0.0],
                vec![DP_A61, DP_A62, DP_A63, DP_A64, DP_A65, 0.0],
            ],
            b: vec![DP_B1, 0.0, DP_B3, DP_B4, DP_B5, DP_B6],
            c: vec![0.0, DP_C2, DP_C3, DP_C4, DP_C5, 1.0],
            e: vec![DP_E1, 0.0, DP_E3, DP_E4, DP_E5, DP_E6, DP_E7],
            order: 5,
            error_order: 4,
            error_exponent: -1.0 / 5.0,
        }
    }

    /// Number of stages `s`.
    pub fn stages(&self) -> usize {
        self.b.len()
    }

    /// Formal order of the propagated solution.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Order of the embedded error estimator.
    pub fn error_order(&self) -> usize {
        self.error_order
    }

    /// `-1 / (error_order + 1)`, the exponent used by the step-size controller.
    pub fn error_exponent(&self) -> Float {
        self.error_exponent
    }

    /// Stage-coupling matrix, `s x s`, strictly lower triangular.
    pub fn a(&self) -> &[Vec<Float>] {
        &self.a
    }

    /// Weights of the propagated solution, length `s`.
    pub fn b(&self) -> &[Float] {
        &self.b
    }

    /// Nodes, length `s`, with `c[0] == 0`.
    pub fn c(&self) -> &[Float] {
        &self.c
    }

    /// Error weights, length `s + 1`.
    pub fn e(&self) -> &[Float] {
        &self.e
    }
}

// RK23 Butcher tableau coefficients
const RK23_C2: Float = 0.5;
const RK23_C3: Float = 0.75;

const RK23_A21: Float = 0.5;
const RK23_A32: Float = 0.75;

const RK23_B1: Float = 2.0 / 9.0;
const RK23_B2: Float = 1.0 / 3.0;
const RK23_B3: Float = 4.0 / 9.0;

const RK23_E1: Float = 5.0 / 72.0;
const RK23_E2: Float = -1.0 / 12.0;
const RK23_E3: Float = -1.0 / 9.0;
const RK23_E4: Float = 1.0 / 8.0;

// Dormand–Prince 5(4) Butcher tableau coefficients
const DP_C2: Float = 0.2;
const DP_C3: Float = 0.3;
const DP_C4: Float = 0.8;
const DP_C5: Float = 8.0 / 9.0;

const DP_A21: Float = 0.2;
const DP_A31: Float = 3.0 / 40.0;
const DP_A32: Float = 9.0 / 40.0;
const DP_A41: Float = 44.0 / 45.0;
const DP_A42: Float = -56.0 / 15.0;
const DP_A43: Float = 32.0 / 9.0;
const DP_A51: Float = 19372.0 / 6561.0;
const DP_A52: Float = -25360.0 / 2187.0;
const DP_A53: Float = 64448.0 / 6561.0;
const DP_A54: Float = -212.0 / 729.0;
const DP_A61: Float = 9017.0 / 3168.0;
const DP_A62: Float = -355.0 / 33.0;
const DP_A63: Float = 46732.0 / 5247.0;
const DP_A64: Float = 49.0 / 176.0;
const DP_A65: Float = -5103.0 / 18656.0;

const DP_B1: Float = 35.0 / 384.0;
const DP_B3: Float = 500.0 / 1113.0;
const DP_B4: Float = 125.0 / 192.0;
const DP_B5: Float = -2187.0 / 6784.0;
const DP_B6: Float = 11.0 / 84.0;

const DP_E1: Float = 71.0 / 57600.0;
const DP_E3: Float = -71.0 / 16695.0;
const DP_E4: Float = 71.0 / 1920.0;
const DP_E5: Float = -17253.0 / 339200.0;
const DP_E6: Float = 22.0 / 525.0;
const DP_E7: Float = -1.0 / 40.0;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_consistent(t: &Tableau) {
        // Row sums of a equal the nodes, weights sum to one, error weights to zero.
        for (row, c) in t.a().iter().zip(t.c()) {
            assert_abs_diff_eq!(row.iter().sum::<Float>(), *c, epsilon = 1e-14);
        }
        assert_abs_diff_eq!(t.b().iter().sum::<Float>(), 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(t.e().iter().sum::<Float>(), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn presets_are_consistent() {
        assert_consistent(&Tableau::rk23());
        assert_consistent(&Tableau::rk45());
    }

    #[test]
    fn presets_pass_validation() {
        for t in [Tableau::rk23(), Tableau::rk45()] {
            let rebuilt = Tableau::new(
                t.a().to_vec(),
                t.b().to_vec(),
                t.c().to_vec(),
                t.e().to_vec(),
                t.order(),
                t.error_order(),
            )
            .unwrap();
            assert_eq!(rebuilt, t);
        }
    }

    #[test]
    fn exponent_follows_error_order() {
        assert_abs_diff_eq!(Tableau::rk45().error_exponent(), -0.2);
        assert_abs_diff_eq!(Tableau::rk23().error_exponent(), -1.0 / 3.0);
        assert_eq!(Tableau::rk45().stages(), 6);
        assert_eq!(Tableau::rk23().stages(), 3);
    }

    #[test]
    fn empty_tableau_is_rejected() {
        let errors = Tableau::new(vec![], vec![], vec![], vec![], 1, 0).unwrap_err();
        assert_eq!(errors, vec![Error::EmptyTableau]);
    }

    #[test]
    fn implicit_and_misshapen_tableau_reports_everything() {
        let errors = Tableau::new(
            vec![vec![0.5, 0.0], vec![1.0, 0.0]],
            vec![0.5, 0.5],
            vec![0.1, 1.0],
            vec![0.0, 0.0],
            2,
            1,
        )
        .unwrap_err();
        assert!(errors.contains(&Error::TableauNotExplicit(0, 0)));
        assert!(errors.contains(&Error::TableauFirstNode(0.1)));
        assert!(errors.contains(&Error::TableauShape { name: "e", expected: 3, got: 2 }));
    }

    #[test]
    fn tableau_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Tableau>();
    }
}
