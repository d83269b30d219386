//! Classical fourth-order Runge–Kutta on a uniform output grid.
//!
//! Each step evaluates the derivative four times:
//!
//! ```text
//! k1 = f(t,       y)
//! k2 = f(t + h/2, y + k1·h/2)
//! k3 = f(t + h/2, y + k2·h/2)
//! k4 = f(t + h,   y + k3·h)
//! y_{n+1} = y_n + (k1 + 2·k2 + 2·k3 + k4)·h/6
//! ```
//!
//! # Output grid
//!
//! The solver takes `n = max(1, ceil(L/h − ε))` steps over a span of length
//! `L`, with `ε` = [`GRID_TOLERANCE`] absorbing round-off in `L/h`. Sample
//! times are `start + k·h` for `k < n` and exactly `end` for the last
//! sample, so both endpoints are always present. When `L` is not a multiple
//! of `h` the final step is shorter than `h`.
//!
//! # Example
//!
//! ```ignore
//! use contagion_solvers::transient::rk4;
//!
//! let solution = rk4::solve(initial, span, step, |t, state: &SirState| {
//!     dynamics.checked_derivative(t, state, beta)
//! })?;
//! ```

mod error;
mod solution;

pub use error::Error;
pub use solution::{Point, Solution};

use std::ops::{Add, Mul};

use contagion_core::{DerivativeOf, StepIntegrable, TimeIncrement, TimeSpan};

/// Slack, in units of one step, allowed when deciding how many steps fit in
/// a span.
pub const GRID_TOLERANCE: f64 = 1e-9;

/// Largest number of steps [`solve`] will take over one span.
pub const MAX_STEPS: usize = 10_000_000;

/// Returns the number of steps [`solve`] takes over `span`.
///
/// # Errors
///
/// Returns [`Error::TooManySteps`] if the span holds more than [`MAX_STEPS`]
/// steps, or if the ratio of span to step is not finite.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn step_count(span: TimeSpan, step: TimeIncrement) -> Result<usize, Error> {
    let steps = (span.length() / step.get() - GRID_TOLERANCE).ceil().max(1.0);

    if !steps.is_finite() || steps > MAX_STEPS as f64 {
        return Err(Error::TooManySteps {
            steps,
            max: MAX_STEPS,
        });
    }

    Ok(steps as usize)
}

/// Integrates from `initial` across `span` with step size `step`.
///
/// The derivative closure receives the time and state for each stage
/// evaluation; it may be called four times per step at times that are not on
/// the output grid.
///
/// # Errors
///
/// Returns [`Error::TooManySteps`] before integrating if the grid would exceed
/// [`MAX_STEPS`], or [`Error::Derivative`] with the failing stage time if the
/// closure returns an error. No partial solution is returned.
pub fn solve<S, F, E>(
    initial: S,
    span: TimeSpan,
    step: TimeIncrement,
    mut derivative: F,
) -> Result<Solution<S>, Error>
where
    S: StepIntegrable<f64> + Clone,
    DerivativeOf<S, f64>: Clone + Add<Output = DerivativeOf<S, f64>> + Mul<f64, Output = DerivativeOf<S, f64>>,
    F: FnMut(f64, &S) -> Result<DerivativeOf<S, f64>, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let steps = step_count(span, step)?;
    let h = step.get();

    let mut points = Vec::with_capacity(steps + 1);
    points.push(Point {
        time: span.start(),
        state: initial.clone(),
    });

    let mut time = span.start();
    let mut state = initial;

    for k in 1..=steps {
        #[allow(clippy::cast_precision_loss)]
        let next_time = if k == steps {
            span.end()
        } else {
            span.start() + k as f64 * h
        };

        state = advance(&mut derivative, time, next_time - time, &state)?;
        time = next_time;

        points.push(Point {
            time,
            state: state.clone(),
        });
    }

    Ok(Solution {
        points,
        steps,
        evaluations: 4 * steps,
    })
}

/// Takes one RK4 step of size `dt` from `(time, state)`.
fn advance<S, F, E>(derivative: &mut F, time: f64, dt: f64, state: &S) -> Result<S, Error>
where
    S: StepIntegrable<f64>,
    DerivativeOf<S, f64>: Clone + Add<Output = DerivativeOf<S, f64>> + Mul<f64, Output = DerivativeOf<S, f64>>,
    F: FnMut(f64, &S) -> Result<DerivativeOf<S, f64>, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let half = 0.5 * dt;
    let mut eval = |t: f64, y: &S| derivative(t, y).map_err(|err| Error::derivative(t, err));

    let k1 = eval(time, state)?;
    let k2 = eval(time + half, &state.step(k1.clone(), half))?;
    let k3 = eval(time + half, &state.step(k2.clone(), half))?;
    let k4 = eval(time + dt, &state.step(k3.clone(), dt))?;

    let slope = (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (1.0 / 6.0);

    Ok(state.step(slope, dt))
}
