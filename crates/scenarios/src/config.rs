//! Experiment configuration.
//!
//! Every scalar input of a comparison run lives in one [`ExperimentConfig`],
//! which can be read from TOML. Missing keys take the reference values, so an
//! empty file describes the reference experiment:
//!
//! ```toml
//! [model]
//! gamma = 0.1
//! beta_0 = 0.5
//! time_span = [0.0, 200.0]
//! initial = { s = 0.99, i = 0.01, r = 0.0 }
//!
//! [schedule]
//! intervention_time = 50.0
//! intervention_reduction = 0.6
//! rebound_time = 100.0
//! rebound_factor = 0.5
//!
//! [adaptive]
//! upper_threshold = 0.15
//! lower_threshold = 0.05
//! reduction_factor = 0.4
//! increase_factor = 0.2
//! beta_min = 0.1
//! beta_max = 0.7
//!
//! [integration]
//! control_interval = 5.0
//! step = 0.1
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use contagion_core::{
    SirState,
    policy::{
        AdaptiveConfig, AdaptiveController, ConstantRate, PolicyError, RatePolicy, Rebound,
        ScheduleConfig, ScheduledRate,
    },
};

use crate::{RunOptions, ScenarioKind};

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// All inputs of a scenario comparison.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    pub model: ModelConfig,
    pub schedule: ScheduleSection,
    pub adaptive: AdaptiveSection,
    pub integration: RunOptions,
}

/// Epidemic parameters shared by every scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Recovery rate per day.
    pub gamma: f64,
    /// Baseline transmission rate per day.
    pub beta_0: f64,
    pub time_span: (f64, f64),
    pub initial: SirState,
}

/// Scheduled-intervention parameters; the baseline rate comes from
/// [`ModelConfig::beta_0`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleSection {
    pub intervention_time: f64,
    pub intervention_reduction: f64,
    /// Omit to hold the intervention rate for the rest of the run.
    pub rebound_time: Option<f64>,
    pub rebound_factor: f64,
}

/// Feedback-law parameters; the baseline rate comes from
/// [`ModelConfig::beta_0`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdaptiveSection {
    pub upper_threshold: f64,
    pub lower_threshold: f64,
    pub reduction_factor: f64,
    pub increase_factor: f64,
    pub beta_min: f64,
    pub beta_max: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            gamma: 0.1,
            beta_0: 0.5,
            time_span: (0.0, 200.0),
            initial: SirState::new(0.99, 0.01, 0.0),
        }
    }
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            intervention_time: 50.0,
            intervention_reduction: 0.6,
            rebound_time: Some(100.0),
            rebound_factor: 0.5,
        }
    }
}

impl Default for AdaptiveSection {
    fn default() -> Self {
        let defaults = AdaptiveConfig::default();
        Self {
            upper_threshold: defaults.upper_threshold,
            lower_threshold: defaults.lower_threshold,
            reduction_factor: defaults.reduction_factor,
            increase_factor: defaults.increase_factor,
            beta_min: defaults.beta_min,
            beta_max: defaults.beta_max,
        }
    }
}

impl ExperimentConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML or contains
    /// unknown keys or mistyped values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it cannot be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    #[must_use]
    pub fn initial_state(&self) -> SirState {
        self.model.initial
    }

    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        self.integration
    }

    /// Builds the constant-rate policy at the baseline rate.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] if `beta_0` is invalid.
    pub fn constant_policy(&self) -> Result<ConstantRate, PolicyError> {
        ConstantRate::new(self.model.beta_0)
    }

    /// Builds the scheduled-intervention policy.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] if the schedule is invalid.
    pub fn scheduled_policy(&self) -> Result<ScheduledRate, PolicyError> {
        let schedule = &self.schedule;
        ScheduledRate::new(ScheduleConfig {
            beta_0: self.model.beta_0,
            intervention_time: schedule.intervention_time,
            intervention_reduction: schedule.intervention_reduction,
            rebound: schedule.rebound_time.map(|time| Rebound {
                time,
                factor: schedule.rebound_factor,
            }),
        })
    }

    /// Builds the feedback controller at its baseline rate.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] if the feedback parameters are invalid.
    pub fn adaptive_policy(&self) -> Result<AdaptiveController, PolicyError> {
        let adaptive = &self.adaptive;
        AdaptiveController::new(AdaptiveConfig {
            beta_0: self.model.beta_0,
            upper_threshold: adaptive.upper_threshold,
            lower_threshold: adaptive.lower_threshold,
            reduction_factor: adaptive.reduction_factor,
            increase_factor: adaptive.increase_factor,
            beta_min: adaptive.beta_min,
            beta_max: adaptive.beta_max,
        })
    }

    /// Builds the policy that matches a scenario kind.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] if the policy's parameters are invalid.
    pub fn policy_for(&self, kind: ScenarioKind) -> Result<RatePolicy, PolicyError> {
        Ok(match kind {
            ScenarioKind::Static => self.constant_policy()?.into(),
            ScenarioKind::Scheduled => self.scheduled_policy()?.into(),
            ScenarioKind::Adaptive => self.adaptive_policy()?.into(),
        })
    }
}
