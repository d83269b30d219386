//! Transmission-rate policies.
//!
//! Three policies are provided:
//!
//! - [`ConstantRate`]: a fixed rate
//! - [`ScheduledRate`]: a rate that steps at fixed breakpoints in time
//! - [`AdaptiveController`]: a rate driven by feedback on the infection level
//!
//! Integrators only see the [`RateSource`] trait, which cannot mutate
//! anything. The adaptive policy is stateful, so it is not a `RateSource`;
//! the segmented driver advances it explicitly and integrates each control
//! interval with a [`FrozenRate`].

mod adaptive;
mod constant;
mod scheduled;

pub use adaptive::{AdaptiveConfig, AdaptiveController, Feedback, Transition};
pub use constant::ConstantRate;
pub use scheduled::{Phase, Rebound, ScheduleConfig, ScheduledRate};

use std::fmt;

use thiserror::Error;

/// A read-only lookup of the transmission rate at a point in time.
pub trait RateSource {
    /// Returns the transmission rate in effect at `time`.
    fn rate_at(&self, time: f64) -> f64;
}

/// A rate held fixed for the duration of one control interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrozenRate(pub f64);

impl RateSource for FrozenRate {
    fn rate_at(&self, _time: f64) -> f64 {
        self.0
    }
}

/// Errors returned when policy parameters are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PolicyError {
    #[error("{name} must be finite and positive, got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("{name} must lie in its allowed fraction range, got {value}")]
    InvalidFraction { name: &'static str, value: f64 },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidFactor { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    InvalidTime { name: &'static str, value: f64 },

    #[error("rate bounds are inverted: min {min} > max {max}")]
    InvertedBounds { min: f64, max: f64 },

    #[error("baseline rate {beta_0} lies outside [{min}, {max}]")]
    BaselineOutOfBounds { beta_0: f64, min: f64, max: f64 },

    #[error("rebound time {rebound_time} must come after intervention time {intervention_time}")]
    ReboundBeforeIntervention {
        intervention_time: f64,
        rebound_time: f64,
    },
}

/// Which of the three policies a [`RatePolicy`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Constant,
    Scheduled,
    Adaptive,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Constant => "constant",
            Self::Scheduled => "scheduled",
            Self::Adaptive => "adaptive",
        };
        f.write_str(name)
    }
}

/// Any one of the transmission-rate policies.
#[derive(Debug, Clone, PartialEq)]
pub enum RatePolicy {
    Constant(ConstantRate),
    Scheduled(ScheduledRate),
    Adaptive(AdaptiveController),
}

impl RatePolicy {
    #[must_use]
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Constant(_) => PolicyKind::Constant,
            Self::Scheduled(_) => PolicyKind::Scheduled,
            Self::Adaptive(_) => PolicyKind::Adaptive,
        }
    }

    /// Returns the rate for time `time` and infection level `infected`.
    ///
    /// Constant and scheduled policies ignore `infected` and have no state.
    /// For the adaptive policy every call is one feedback step, so calling
    /// this twice with the same arguments can return two different rates.
    pub fn rate(&mut self, time: f64, infected: f64) -> f64 {
        match self {
            Self::Constant(policy) => policy.rate_at(time),
            Self::Scheduled(policy) => policy.rate_at(time),
            Self::Adaptive(controller) => controller.update(infected).rate,
        }
    }

    /// Restores the adaptive policy to its baseline; a no-op otherwise.
    pub fn reset(&mut self) {
        if let Self::Adaptive(controller) = self {
            controller.reset();
        }
    }
}

impl From<ConstantRate> for RatePolicy {
    fn from(policy: ConstantRate) -> Self {
        Self::Constant(policy)
    }
}

impl From<ScheduledRate> for RatePolicy {
    fn from(policy: ScheduledRate) -> Self {
        Self::Scheduled(policy)
    }
}

impl From<AdaptiveController> for RatePolicy {
    fn from(controller: AdaptiveController) -> Self {
        Self::Adaptive(controller)
    }
}
