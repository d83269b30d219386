use std::fmt;

use log::info;

use crate::{ExperimentConfig, ScenarioError, ScenarioKind, ScenarioResult, run_scenario};

/// Results of every scenario run from one configuration, in
/// [`ScenarioKind::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    results: Vec<ScenarioResult>,
}

impl Comparison {
    #[must_use]
    pub fn results(&self) -> &[ScenarioResult] {
        &self.results
    }

    /// Returns the result for a scenario kind.
    #[must_use]
    pub fn get(&self, kind: ScenarioKind) -> Option<&ScenarioResult> {
        self.results.iter().find(|result| result.kind == kind)
    }

    #[must_use]
    pub fn into_results(self) -> Vec<ScenarioResult> {
        self.results
    }
}

/// Runs the static, scheduled, and adaptive scenarios from one configuration.
///
/// # Errors
///
/// Returns the first [`ScenarioError`] raised while building a policy or
/// running a scenario.
pub fn run_all(config: &ExperimentConfig) -> Result<Comparison, ScenarioError> {
    let options = config.run_options();

    let results = ScenarioKind::ALL
        .into_iter()
        .map(|kind| {
            let mut policy = config.policy_for(kind)?;
            run_scenario(
                kind,
                config.model.time_span,
                config.initial_state(),
                &mut policy,
                config.model.gamma,
                &options,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!("compared {} scenarios", results.len());

    Ok(Comparison { results })
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<12} {:>15} {:>10} {:>18} {:>19}",
            "Scenario", "Peak Infection", "Peak Time", "Final Attack Rate", "Epidemic Duration"
        )?;
        writeln!(f, "{}", "-".repeat(78))?;

        for result in &self.results {
            let stats = &result.stats;
            writeln!(
                f,
                "{:<12} {:>15.4} {:>10.1} {:>18.4} {:>19.1}",
                result.kind.name(),
                stats.peak_infection,
                stats.peak_time,
                stats.final_size,
                stats.duration
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use contagion_core::policy::PolicyError;

    #[test]
    fn runs_every_kind_in_order() {
        let comparison = run_all(&ExperimentConfig::default()).unwrap();

        let kinds: Vec<_> = comparison.results().iter().map(|r| r.kind).collect();
        assert_eq!(kinds, ScenarioKind::ALL.to_vec());
        assert!(comparison.get(ScenarioKind::Adaptive).is_some());
    }

    #[test]
    fn interventions_shrink_the_epidemic() {
        let comparison = run_all(&ExperimentConfig::default()).unwrap();
        let final_size = |kind| comparison.get(kind).unwrap().stats.final_size;

        assert!(final_size(ScenarioKind::Scheduled) < final_size(ScenarioKind::Static));
        assert!(final_size(ScenarioKind::Adaptive) < final_size(ScenarioKind::Scheduled));
    }

    #[test]
    fn table_has_a_row_per_scenario() {
        let comparison = run_all(&ExperimentConfig::default()).unwrap();
        let table = comparison.to_string();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2 + ScenarioKind::ALL.len());
        assert!(lines[0].starts_with("Scenario"));
        assert!(lines[2].starts_with("static"));
        assert!(lines[2].contains("0.4801"));
        assert!(lines[4].starts_with("adaptive"));
    }

    #[test]
    fn invalid_policy_stops_the_comparison() {
        let mut config = ExperimentConfig::default();
        config.schedule.intervention_reduction = 1.5;

        assert!(matches!(
            run_all(&config),
            Err(ScenarioError::Policy(PolicyError::InvalidFraction { .. }))
        ));
    }
}
