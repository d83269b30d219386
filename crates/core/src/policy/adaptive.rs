//! Feedback control of the transmission rate.
//!
//! The control law is split in two:
//!
//! - [`AdaptiveConfig::observe`] is a pure transition from the current rate
//!   and an observed infection level to the next rate.
//! - [`AdaptiveController`] owns the current rate and applies exactly one
//!   transition per call to [`AdaptiveController::update`].
//!
//! Keeping the transition pure means nothing but an explicit `update` call
//! can move the controller's state, no matter how many times a solver
//! evaluates the rate inside a control interval.

use log::warn;

use super::PolicyError;

/// Parameters of the threshold feedback law.
///
/// The defaults describe a capacity-style response: above 15% infected the
/// rate is cut by 40% per control step, below 5% it is raised by 20%, and it
/// always stays within `[0.1, 0.7]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdaptiveConfig {
    /// Rate restored by [`AdaptiveController::reset`].
    pub beta_0: f64,
    pub upper_threshold: f64,
    pub lower_threshold: f64,
    /// Fractional cut applied when infection exceeds `upper_threshold`.
    pub reduction_factor: f64,
    /// Fractional raise applied when infection is below `lower_threshold`.
    pub increase_factor: f64,
    pub beta_min: f64,
    pub beta_max: f64,
}

/// Direction of a single feedback step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feedback {
    /// Infection above the upper threshold; the rate was cut.
    Tighten,
    /// Infection below the lower threshold; the rate was raised.
    Relax,
    /// Infection inside the band; the rate was left alone.
    Hold,
}

/// The outcome of one feedback step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub feedback: Feedback,
    /// The clamped rate after the step.
    pub rate: f64,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            beta_0: 0.5,
            upper_threshold: 0.15,
            lower_threshold: 0.05,
            reduction_factor: 0.4,
            increase_factor: 0.2,
            beta_min: 0.1,
            beta_max: 0.7,
        }
    }
}

impl AdaptiveConfig {
    /// Checks that the parameters keep the rate positive and bounded.
    ///
    /// Thresholds are not required to be ordered. With
    /// `lower_threshold >= upper_threshold` the upper test still runs first,
    /// so the law tightens above `upper_threshold`, otherwise relaxes below
    /// `lower_threshold`, and the hold band is empty. That case is logged as a
    /// warning rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] if a rate or bound is not positive and finite,
    /// if `beta_min > beta_max`, if `beta_0` lies outside the bounds, if
    /// `reduction_factor` is outside `[0, 1)`, if `increase_factor` is negative,
    /// or if a threshold is not finite.
    pub fn validate(&self) -> Result<(), PolicyError> {
        for (name, value) in [
            ("beta_0", self.beta_0),
            ("beta_min", self.beta_min),
            ("beta_max", self.beta_max),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PolicyError::InvalidRate { name, value });
            }
        }
        if self.beta_min > self.beta_max {
            return Err(PolicyError::InvertedBounds {
                min: self.beta_min,
                max: self.beta_max,
            });
        }
        if self.beta_0 < self.beta_min || self.beta_0 > self.beta_max {
            return Err(PolicyError::BaselineOutOfBounds {
                beta_0: self.beta_0,
                min: self.beta_min,
                max: self.beta_max,
            });
        }
        if !(0.0..1.0).contains(&self.reduction_factor) {
            return Err(PolicyError::InvalidFraction {
                name: "reduction_factor",
                value: self.reduction_factor,
            });
        }
        if !self.increase_factor.is_finite() || self.increase_factor < 0.0 {
            return Err(PolicyError::InvalidFactor {
                name: "increase_factor",
                value: self.increase_factor,
            });
        }
        for (name, value) in [
            ("upper_threshold", self.upper_threshold),
            ("lower_threshold", self.lower_threshold),
        ] {
            if !value.is_finite() {
                return Err(PolicyError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }

    /// Applies one step of the feedback law.
    ///
    /// This is a pure function of its arguments.
    #[must_use]
    pub fn observe(&self, current_rate: f64, infected: f64) -> Transition {
        let (feedback, rate) = if infected > self.upper_threshold {
            (Feedback::Tighten, current_rate * (1.0 - self.reduction_factor))
        } else if infected < self.lower_threshold {
            (Feedback::Relax, current_rate * (1.0 + self.increase_factor))
        } else {
            (Feedback::Hold, current_rate)
        };

        Transition {
            feedback,
            rate: rate.clamp(self.beta_min, self.beta_max),
        }
    }
}

/// The stateful side of the feedback law.
///
/// A controller is created once per configuration and must be
/// [`reset`](Self::reset) before every independent run; the segmented driver
/// does this itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveController {
    config: AdaptiveConfig,
    current_rate: f64,
}

impl AdaptiveController {
    /// Creates a controller at its baseline rate.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] if `config` fails [`AdaptiveConfig::validate`].
    pub fn new(config: AdaptiveConfig) -> Result<Self, PolicyError> {
        config.validate()?;

        if config.lower_threshold >= config.upper_threshold {
            warn!(
                "adaptive thresholds overlap (lower {} >= upper {}); the hold band is empty",
                config.lower_threshold, config.upper_threshold
            );
        }

        Ok(Self {
            config,
            current_rate: config.beta_0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }

    #[must_use]
    pub fn current_rate(&self) -> f64 {
        self.current_rate
    }

    /// Restores the baseline rate.
    pub fn reset(&mut self) {
        self.current_rate = self.config.beta_0;
    }

    /// Applies exactly one feedback step for an observed infection level and
    /// stores the resulting rate.
    pub fn update(&mut self, infected: f64) -> Transition {
        let transition = self.config.observe(self.current_rate, infected);
        self.current_rate = transition.rate;
        transition
    }
}
