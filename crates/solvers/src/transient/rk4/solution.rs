/// A state on the output grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<S> {
    pub time: f64,
    pub state: S,
}

/// The result of a Runge–Kutta integration.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    /// States on the output grid, starting with the initial state.
    pub points: Vec<Point<S>>,

    /// Number of steps taken.
    pub steps: usize,

    /// Number of derivative evaluations performed.
    pub evaluations: usize,
}

impl<S> Solution<S> {
    /// Returns the state at the end of the span.
    #[must_use]
    pub fn final_state(&self) -> &S {
        // `solve` always records the initial point.
        &self.points[self.points.len() - 1].state
    }
}
