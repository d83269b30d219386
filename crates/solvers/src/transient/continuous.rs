//! Integration of the SIR equations over a single continuous span.

use contagion_core::{
    Sample, SirDynamics, SirState, TimeIncrement, TimeSpan, Trajectory, policy::RateSource,
};

use super::{Error, rk4};

/// Integrates the SIR equations across `span` under a read-only rate source.
///
/// The returned trajectory is sampled on the [`rk4`] output grid, including
/// both endpoints. Each sample's rate is looked up from `rates` at the sample
/// time; because [`RateSource`] takes `&self`, neither the solver's stage
/// evaluations nor this lookup can change the policy.
///
/// # Errors
///
/// Returns [`Error::Integration`] if the state or rate becomes non-finite, or
/// if the rate is negative, at any stage evaluation.
pub fn integrate<R>(
    span: TimeSpan,
    initial: SirState,
    rates: &R,
    dynamics: &SirDynamics,
    step: TimeIncrement,
) -> Result<Trajectory, Error>
where
    R: RateSource + ?Sized,
{
    let solution = rk4::solve(initial, span, step, |time, state: &SirState| {
        dynamics.checked_derivative(time, state, rates.rate_at(time))
    })?;

    let samples = solution
        .points
        .into_iter()
        .map(|point| Sample {
            time: point.time,
            state: point.state,
            rate: rates.rate_at(point.time),
        })
        .collect();

    Ok(Trajectory::new(samples)?)
}
