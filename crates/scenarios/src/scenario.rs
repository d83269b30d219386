//! Run one scenario by name.
//!
//! [`run_scenario`] validates every input before integrating, dispatches to
//! the integrator that matches the scenario kind, checks the result for
//! numerical blow-up, and attaches summary statistics.

mod error;
mod kind;

pub use error::ScenarioError;
pub use kind::ScenarioKind;

use log::info;

use contagion_core::{
    SirDynamics, SirState, TimeIncrement, TimeSpan, Trajectory, policy::RatePolicy,
};
use contagion_solvers::transient::{self, segmented};

use crate::SummaryStatistics;

/// Allowed deviation of the initial compartments' sum from one.
pub const POPULATION_TOLERANCE: f64 = 1e-6;

/// Allowed overshoot of any compartment outside `[0, 1]` after integration.
pub const BOUNDS_TOLERANCE: f64 = 1e-6;

/// Timing options for a scenario run.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunOptions {
    /// Length of a feedback control interval, in days. Only the adaptive
    /// scenario uses it.
    pub control_interval: f64,

    /// Integration step, in days.
    pub step: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            control_interval: 5.0,
            step: 0.1,
        }
    }
}

/// A completed scenario: the trajectory and its summary statistics.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScenarioResult {
    pub kind: ScenarioKind,
    pub trajectory: Trajectory,
    pub stats: SummaryStatistics,
}

/// Runs a scenario of the given kind.
///
/// `policy` must be the variant that matches `kind`: a constant rate for
/// [`ScenarioKind::Static`], a scheduled rate for [`ScenarioKind::Scheduled`],
/// and an adaptive controller for [`ScenarioKind::Adaptive`]. An adaptive
/// controller is reset before the run and left at its final rate afterwards.
///
/// # Errors
///
/// Fails before any integration with a [`ScenarioError`] if the time span,
/// step, control interval, recovery rate, or initial state is invalid, or if
/// the policy does not match `kind`. Fails after integration with
/// [`ScenarioError::NumericalInstability`] if any compartment leaves
/// `[-BOUNDS_TOLERANCE, 1 + BOUNDS_TOLERANCE]`.
pub fn run_scenario(
    kind: ScenarioKind,
    time_span: (f64, f64),
    initial: SirState,
    policy: &mut RatePolicy,
    gamma: f64,
    options: &RunOptions,
) -> Result<ScenarioResult, ScenarioError> {
    let span = TimeSpan::try_from(time_span).map_err(ScenarioError::TimeSpan)?;
    let step = TimeIncrement::new(options.step).map_err(ScenarioError::Step)?;
    let dynamics = SirDynamics::new(gamma)?;
    initial.check_population(POPULATION_TOLERANCE)?;

    info!(
        "running {kind} scenario over [{}, {}] with step {step}",
        span.start(),
        span.end()
    );

    let trajectory = match (kind, policy) {
        (ScenarioKind::Static, RatePolicy::Constant(rate)) => {
            transient::integrate(span, initial, &*rate, &dynamics, step)?
        }
        (ScenarioKind::Scheduled, RatePolicy::Scheduled(schedule)) => {
            transient::integrate(span, initial, &*schedule, &dynamics, step)?
        }
        (ScenarioKind::Adaptive, RatePolicy::Adaptive(controller)) => {
            let interval = TimeIncrement::new(options.control_interval)
                .map_err(ScenarioError::ControlInterval)?;
            let config = segmented::Config::new(interval, step);
            segmented::run(span, initial, controller, &dynamics, &config)?
        }
        (kind, policy) => {
            return Err(ScenarioError::PolicyMismatch {
                kind,
                policy: policy.kind(),
            });
        }
    };

    if let Some(sample) = trajectory.first_out_of_bounds(BOUNDS_TOLERANCE) {
        return Err(ScenarioError::NumericalInstability {
            time: sample.time,
            state: sample.state,
        });
    }

    let stats = SummaryStatistics::from_trajectory(&trajectory);

    info!(
        "{kind} scenario: peak I = {:.4} at t = {:.1}, final size = {:.4}, duration = {:.1}",
        stats.peak_infection, stats.peak_time, stats.final_size, stats.duration
    );

    Ok(ScenarioResult {
        kind,
        trajectory,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use contagion_core::{
        StateError, TimeError,
        policy::{AdaptiveConfig, AdaptiveController, ConstantRate, PolicyKind, RateSource},
    };
    use contagion_solvers::transient::rk4;

    fn initial() -> SirState {
        SirState::new(0.99, 0.01, 0.0)
    }

    fn constant() -> RatePolicy {
        RatePolicy::from(ConstantRate::new(0.5).unwrap())
    }

    fn adaptive() -> RatePolicy {
        RatePolicy::from(AdaptiveController::new(AdaptiveConfig::default()).unwrap())
    }

    #[test]
    fn static_scenario_reports_stats() {
        let result = run_scenario(
            ScenarioKind::Static,
            (0.0, 200.0),
            initial(),
            &mut constant(),
            0.1,
            &RunOptions::default(),
        )
        .unwrap();

        assert_eq!(result.kind, ScenarioKind::Static);
        assert_eq!(result.trajectory.len(), 2001);
        assert_relative_eq!(result.stats.peak_infection, 0.480_113_72, epsilon = 1e-6);
    }

    #[test]
    fn mismatched_policy_fails() {
        let err = run_scenario(
            ScenarioKind::Adaptive,
            (0.0, 200.0),
            initial(),
            &mut constant(),
            0.1,
            &RunOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ScenarioError::PolicyMismatch {
                kind: ScenarioKind::Adaptive,
                policy: PolicyKind::Constant
            }
        ));
    }

    #[test]
    fn zero_step_fails_fast() {
        let err = run_scenario(
            ScenarioKind::Static,
            (0.0, 200.0),
            initial(),
            &mut constant(),
            0.1,
            &RunOptions {
                step: 0.0,
                ..RunOptions::default()
            },
        )
        .unwrap_err();

        assert!(matches!(err, ScenarioError::Step(TimeError::NotPositive(_))));
    }

    #[test]
    fn negative_control_interval_fails_fast() {
        let mut policy = adaptive();

        let err = run_scenario(
            ScenarioKind::Adaptive,
            (0.0, 200.0),
            initial(),
            &mut policy,
            0.1,
            &RunOptions {
                control_interval: -5.0,
                ..RunOptions::default()
            },
        )
        .unwrap_err();

        assert!(matches!(err, ScenarioError::ControlInterval(_)));
    }

    #[test]
    fn unnormalized_initial_state_fails_fast() {
        let err = run_scenario(
            ScenarioKind::Static,
            (0.0, 200.0),
            SirState::new(0.9, 0.2, 0.0),
            &mut constant(),
            0.1,
            &RunOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ScenarioError::InitialState(StateError::NotNormalized { .. })
        ));
    }

    #[test]
    fn backwards_span_fails_fast() {
        let err = run_scenario(
            ScenarioKind::Static,
            (200.0, 0.0),
            initial(),
            &mut constant(),
            0.1,
            &RunOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ScenarioError::TimeSpan(_)));
    }

    #[test]
    fn oversized_step_is_reported_as_instability() {
        let mut policy = RatePolicy::from(ConstantRate::new(50.0).unwrap());

        let err = run_scenario(
            ScenarioKind::Static,
            (0.0, 50.0),
            SirState::new(0.5, 0.5, 0.0),
            &mut policy,
            0.1,
            &RunOptions {
                step: 10.0,
                ..RunOptions::default()
            },
        )
        .unwrap_err();

        let ScenarioError::NumericalInstability { time, state } = err else {
            panic!("expected numerical instability, got {err:?}");
        };
        assert!(time > 0.0 && time <= 50.0);
        assert!(!state.is_finite());
    }

    /// A rate source that returns NaN while the state is still finite.
    struct NanRate;

    impl RateSource for NanRate {
        fn rate_at(&self, _time: f64) -> f64 {
            f64::NAN
        }
    }

    #[test]
    fn invalid_rate_is_not_reported_as_instability() {
        let span = TimeSpan::new(0.0, 1.0).unwrap();
        let step = TimeIncrement::new(0.1).unwrap();
        let dynamics = SirDynamics::new(0.1).unwrap();

        let err = ScenarioError::from(
            transient::integrate(span, initial(), &NanRate, &dynamics, step).unwrap_err(),
        );

        assert!(matches!(err, ScenarioError::Integration(_)));
    }

    #[test]
    fn unrepresentable_grid_is_an_error_not_a_panic() {
        let err = run_scenario(
            ScenarioKind::Static,
            (0.0, 1e300),
            initial(),
            &mut constant(),
            0.1,
            &RunOptions {
                step: 1e-10,
                ..RunOptions::default()
            },
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ScenarioError::Integration(transient::Error::Integration(
                rk4::Error::TooManySteps { .. }
            ))
        ));
    }
}
