use contagion_core::{TimeError, TimeIncrement};

/// Timing of a segmented run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    control_interval: TimeIncrement,
    step: TimeIncrement,
}

impl Default for Config {
    /// Five-day control intervals integrated in steps of a tenth of a day.
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::from_days(5.0, 0.1).unwrap()
    }
}

impl Config {
    /// Creates a config from already-validated increments.
    #[must_use]
    pub fn new(control_interval: TimeIncrement, step: TimeIncrement) -> Self {
        Self {
            control_interval,
            step,
        }
    }

    /// Creates a config from raw durations in days.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::NotPositive`] if either duration is zero,
    /// negative, or non-finite.
    pub fn from_days(control_interval: f64, step: f64) -> Result<Self, TimeError> {
        Ok(Self::new(
            TimeIncrement::new(control_interval)?,
            TimeIncrement::new(step)?,
        ))
    }

    #[must_use]
    pub fn control_interval(&self) -> TimeIncrement {
        self.control_interval
    }

    #[must_use]
    pub fn step(&self) -> TimeIncrement {
        self.step
    }
}
