//! Validated time values.
//!
//! Simulation time is a plain `f64` measured in days. The types here carry the
//! two invariants the integrators rely on: spans run forward, and increments
//! are strictly positive.

use std::fmt;

use thiserror::Error;

/// Errors returned when constructing an invalid time value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TimeError {
    #[error("time span must be finite with start < end, got ({start}, {end})")]
    InvalidSpan { start: f64, end: f64 },

    #[error("time increment must be finite and greater than zero, got {0}")]
    NotPositive(f64),
}

/// A closed, forward-running interval `[start, end]` of simulation time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeSpan {
    start: f64,
    end: f64,
}

impl TimeSpan {
    /// Creates a span from its endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::InvalidSpan`] if either endpoint is non-finite or
    /// if `start >= end`.
    pub fn new(start: f64, end: f64) -> Result<Self, TimeError> {
        if start.is_finite() && end.is_finite() && start < end {
            Ok(Self { start, end })
        } else {
            Err(TimeError::InvalidSpan { start, end })
        }
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

impl TryFrom<(f64, f64)> for TimeSpan {
    type Error = TimeError;

    fn try_from((start, end): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

/// A strictly positive duration, used for both solver steps and control
/// intervals.
///
/// Zero, negative, and non-finite values are rejected at construction, so a
/// loop that advances time by a `TimeIncrement` always makes progress.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeIncrement(f64);

impl TimeIncrement {
    /// Creates an increment of `value` days.
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::NotPositive`] if `value` is zero, negative, or
    /// non-finite.
    pub fn new(value: f64) -> Result<Self, TimeError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(TimeError::NotPositive(value))
        }
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for TimeIncrement {
    type Error = TimeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for TimeIncrement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} d", self.0)
    }
}
