use super::{PolicyError, RateSource};

/// A transmission rate that never changes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstantRate {
    beta: f64,
}

impl ConstantRate {
    /// Creates a constant rate of `beta` per day.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidRate`] if `beta` is negative or non-finite.
    pub fn new(beta: f64) -> Result<Self, PolicyError> {
        if beta.is_finite() && beta >= 0.0 {
            Ok(Self { beta })
        } else {
            Err(PolicyError::InvalidRate {
                name: "beta",
                value: beta,
            })
        }
    }

    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl RateSource for ConstantRate {
    fn rate_at(&self, _time: f64) -> f64 {
        self.beta
    }
}
