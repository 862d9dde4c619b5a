//! Callback executed after each accepted step, and the default recorder that
//! wraps it for solve_ivp.

use crate::Float;

/// Return flags for [`SolOut`].
///
/// - `Continue`: proceed with integration as normal.
/// - `Interrupt`: stop integration and return control to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlag {
    Continue,
    Interrupt,
}

/// Callback hook executed after each accepted step.
///
/// The callback is invoked once at the initial point (with `t_old == t`) and
/// after every accepted step with the previous time `t_old`, the new time `t`
/// and the solution `y` at `t`.
///
/// # Example
///
/// ```ignore
/// struct Printer;
/// impl SolOut for Printer {
///     fn solout(&mut self, _t_old: f64, t: f64, y: &[f64]) -> ControlFlag {
///         println!("t = {}, y = {:?}", t, y);
///         ControlFlag::Continue
///     }
/// }
/// ```
pub trait SolOut {
    fn solout(&mut self, t_old: Float, t: Float, y: &[Float]) -> ControlFlag;
}

/// No-op callback used when the caller does not supply one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DummySolOut;

impl SolOut for DummySolOut {
    fn solout(&mut self, _t_old: Float, _t: Float, _y: &[Float]) -> ControlFlag {
        ControlFlag::Continue
    }
}

/// Records step endpoints and forwards to a user callback.
pub(crate) struct DefaultSolOut<'a, S: SolOut + ?Sized> {
    save_endpoints: bool,
    t: Vec<Float>,
    y: Vec<Vec<Float>>,
    user: &'a mut S,
}

impl<'a, S: SolOut + ?Sized> DefaultSolOut<'a, S> {
    pub(crate) fn new(save_endpoints: bool, user: &'a mut S) -> Self {
        Self {
            save_endpoints,
            t: Vec::new(),
            y: Vec::new(),
            user,
        }
    }

    pub(crate) fn into_data(self) -> (Vec<Float>, Vec<Vec<Float>>) {
        (self.t, self.y)
    }
}

impl<'a, S: SolOut + ?Sized> SolOut for DefaultSolOut<'a, S> {
    fn solout(&mut self, t_old: Float, t: Float, y: &[Float]) -> ControlFlag {
        if self.save_endpoints {
            self.t.push(t);
            self.y.push(y.to_vec());
        }
        self.user.solout(t_old, t, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StopAfter(usize);

    impl SolOut for StopAfter {
        fn solout(&mut self, _t_old: Float, _t: Float, _y: &[Float]) -> ControlFlag {
            self.0 = self.0.saturating_sub(1);
            if self.0 == 0 {
                ControlFlag::Interrupt
            } else {
                ControlFlag::Continue
            }
        }
    }

    #[test]
    fn records_and_forwards() {
        let mut user = StopAfter(2);
        let mut out = DefaultSolOut::new(true, &mut user);
        assert_eq!(out.solout(0.0, 0.0, &[1.0]), ControlFlag::Continue);
        assert_eq!(out.solout(0.0, 0.5, &[2.0]), ControlFlag::Interrupt);
        let (t, y) = out.into_data();
        assert_eq!(t, vec![0.0, 0.5]);
        assert_eq!(y, vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn recording_can_be_disabled() {
        let mut user = DummySolOut;
        let mut out = DefaultSolOut::new(false, &mut user);
        out.solout(0.0, 1.0, &[1.0]);
        assert!(out.into_data().0.is_empty());
    }
}
