//! Solution type for solve_ivp: sampled data and basic stats.

use crate::Float;

/// Reason solve_ivp stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Reached `t_bound`.
    Success,
    /// The callback returned [`ControlFlag::Interrupt`](crate::solve::ControlFlag::Interrupt).
    Interrupted,
    /// The step-attempt budget `nmax` ran out before reaching `t_bound`.
    NeedLargerNmax,
    /// The step size fell below the smallest meaningful value.
    StepSizeTooSmall,
}

/// Solution of solve_ivp: sampled data plus basic stats
#[derive(Debug, Clone)]
pub struct IVPSolution {
    /// Initial time followed by the end of every accepted step, if saved.
    pub t: Vec<Float>,
    /// Solution at the matching entries of `t`.
    pub y: Vec<Vec<Float>>,
    pub nfev: usize,
    pub nstep: usize,
    pub naccpt: usize,
    pub nrejct: usize,
    pub status: ExitStatus,
}

impl IVPSolution {
    /// Whether the integration reached `t_bound`.
    pub fn success(&self) -> bool {
        self.status == ExitStatus::Success
    }

    /// Last stored sample, if any.
    pub fn last(&self) -> Option<(Float, &[Float])> {
        Some((*self.t.last()?, self.y.last()?.as_slice()))
    }

    /// Iterate over stored sample pairs (t_i, y_i).
    pub fn iter(&self) -> SolutionIter<'_> {
        SolutionIter {
            t_iter: self.t.iter(),
            y_iter: self.y.iter(),
        }
    }
}

/// Iterator over (t, y) pairs of stored samples in an IVPSolution.
pub struct SolutionIter<'a> {
    t_iter: std::slice::Iter<'a, Float>,
    y_iter: std::slice::Iter<'a, Vec<Float>>,
}

impl<'a> Iterator for SolutionIter<'a> {
    type Item = (Float, &'a [Float]);

    fn next(&mut self) -> Option<Self::Item> {
        match (self.t_iter.next(), self.y_iter.next()) {
            (Some(&t), Some(y)) => Some((t, y.as_slice())),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a IVPSolution {
    type Item = (Float, &'a [Float]);
    type IntoIter = SolutionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
