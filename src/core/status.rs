//! Outcome of a single advancing call on an integrator.

/// Result of [`RungeKutta::step`](crate::RungeKutta::step).
///
/// - `Running`: a step was accepted and `t_bound` has not been reached yet.
/// - `Finished`: the integrator sits exactly at `t_bound`.
/// - `Failed`: the step size fell below the smallest representable increment
///   at the current time. The state is left at the last accepted point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Finished,
    Failed,
}

impl Status {
    /// `true` for `Finished` and `Failed`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }
}
