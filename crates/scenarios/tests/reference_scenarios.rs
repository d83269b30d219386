//! End-to-end checks of the reference experiment: β₀ = 0.5, γ = 0.1,
//! (S, I, R) = (0.99, 0.01, 0) over [0, 200] with a 0.1-day step.

use approx::assert_relative_eq;

use contagion::{
    ExperimentConfig, RunOptions, ScenarioKind, ScenarioResult, run_all, run_scenario,
};
use contagion_core::{
    SirState,
    policy::{AdaptiveConfig, AdaptiveController, RatePolicy},
};

fn run(kind: ScenarioKind) -> ScenarioResult {
    let config = ExperimentConfig::default();
    let mut policy = config.policy_for(kind).unwrap();
    run_scenario(
        kind,
        (0.0, 200.0),
        SirState::new(0.99, 0.01, 0.0),
        &mut policy,
        0.1,
        &RunOptions::default(),
    )
    .unwrap()
}

#[test]
fn static_epidemic_matches_reference_values() {
    let result = run(ScenarioKind::Static);
    let stats = result.stats;

    assert_eq!(result.trajectory.len(), 2001);
    assert_relative_eq!(stats.peak_infection, 0.480_113_721_8, epsilon = 1e-9);
    assert_relative_eq!(stats.peak_time, 15.3, epsilon = 1e-9);
    assert_relative_eq!(stats.final_size, 0.993_095_099_2, epsilon = 1e-9);
    assert_relative_eq!(stats.duration, 91.6, epsilon = 1e-9);
}

#[test]
fn scheduled_epidemic_matches_reference_values() {
    let result = run(ScenarioKind::Scheduled);
    let stats = result.stats;

    // The intervention starts after the peak, so the peak is unchanged.
    assert_relative_eq!(stats.peak_infection, 0.480_113_721_8, epsilon = 1e-9);
    assert_relative_eq!(stats.peak_time, 15.3, epsilon = 1e-9);
    assert_relative_eq!(stats.final_size, 0.992_496_255_4, epsilon = 1e-9);
    assert_relative_eq!(stats.duration, 90.7, epsilon = 1e-9);
}

#[test]
fn scheduled_rate_steps_at_breakpoints() {
    let result = run(ScenarioKind::Scheduled);

    for sample in &result.trajectory {
        let expected = if sample.time < 50.0 {
            0.5
        } else if sample.time < 100.0 {
            0.2
        } else {
            0.35
        };
        assert_relative_eq!(sample.rate, expected, epsilon = 1e-12);
    }
}

#[test]
fn adaptive_epidemic_matches_reference_values() {
    let result = run(ScenarioKind::Adaptive);
    let stats = result.stats;

    assert_eq!(result.trajectory.len(), 2001);
    assert_relative_eq!(stats.peak_infection, 0.473_559_024_7, epsilon = 1e-9);
    assert_relative_eq!(stats.peak_time, 12.0, epsilon = 1e-9);
    assert_relative_eq!(stats.final_size, 0.927_035_782_0, epsilon = 1e-9);
    assert_relative_eq!(stats.duration, 103.0, epsilon = 1e-9);
}

#[test]
fn adaptive_rate_sequence_follows_feedback() {
    let result = run(ScenarioKind::Adaptive);
    let samples = result.trajectory.samples();
    let rate_at = |time: f64| samples[(time * 10.0).round() as usize].rate;

    assert_relative_eq!(rate_at(0.0), 0.6, epsilon = 1e-12);
    assert_relative_eq!(rate_at(7.5), 0.6, epsilon = 1e-12);
    assert_relative_eq!(rate_at(12.5), 0.36, epsilon = 1e-12);
    assert_relative_eq!(rate_at(17.5), 0.216, epsilon = 1e-12);
    assert_relative_eq!(rate_at(22.5), 0.1296, epsilon = 1e-12);
    assert_relative_eq!(rate_at(27.5), 0.1, epsilon = 1e-12);
    assert_relative_eq!(rate_at(200.0), 0.7, epsilon = 1e-12);
}

#[test]
fn every_trajectory_conserves_population_and_stays_in_bounds() {
    for kind in ScenarioKind::ALL {
        let result = run(kind);

        for state in result.trajectory.states() {
            assert_relative_eq!(state.total(), 1.0, epsilon = 1e-9);
            assert!(state.within_bounds(1e-9), "{kind}: {state:?}");
        }
    }
}

#[test]
fn recovered_never_decreases() {
    for kind in ScenarioKind::ALL {
        let result = run(kind);
        let recovered: Vec<f64> = result.trajectory.states().map(|state| state.r).collect();

        for pair in recovered.windows(2) {
            assert!(pair[1] >= pair[0], "{kind}: R fell from {} to {}", pair[0], pair[1]);
        }
    }
}

#[test]
fn adaptive_runs_are_reproducible_with_one_controller() {
    let mut policy = RatePolicy::from(AdaptiveController::new(AdaptiveConfig::default()).unwrap());
    let mut run_once = || {
        run_scenario(
            ScenarioKind::Adaptive,
            (0.0, 200.0),
            SirState::new(0.99, 0.01, 0.0),
            &mut policy,
            0.1,
            &RunOptions::default(),
        )
        .unwrap()
    };

    let first = run_once();
    let second = run_once();

    assert_eq!(first, second);
}

#[test]
fn high_threshold_keeps_relaxing_to_the_ceiling() {
    let config = ExperimentConfig::from_toml_str(
        r"
        [adaptive]
        upper_threshold = 0.9
        ",
    )
    .unwrap();
    let mut policy = config.policy_for(ScenarioKind::Adaptive).unwrap();

    let result = run_scenario(
        ScenarioKind::Adaptive,
        (0.0, 50.0),
        config.initial_state(),
        &mut policy,
        config.model.gamma,
        &config.run_options(),
    )
    .unwrap();

    let rates: Vec<f64> = result.trajectory.rates().collect();
    for pair in rates.windows(2) {
        assert!(pair[1] >= pair[0]);
    }
    assert_relative_eq!(*rates.last().unwrap(), 0.7);
}

#[test]
fn comparison_agrees_with_individual_runs() {
    let comparison = run_all(&ExperimentConfig::default()).unwrap();

    for kind in ScenarioKind::ALL {
        assert_eq!(comparison.get(kind).unwrap(), &run(kind));
    }
}
