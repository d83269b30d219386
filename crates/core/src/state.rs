use std::ops::{Add, Mul};

use thiserror::Error;

use crate::StepIntegrable;

/// Population fractions in the susceptible, infected, and recovered compartments.
///
/// The three fractions describe a closed population, so `s + i + r` stays at
/// one for every state the dynamics produce. Construction is unchecked; use
/// [`SirState::check_population`] when a state comes from outside the crate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SirState {
    pub s: f64,
    pub i: f64,
    pub r: f64,
}

/// Time derivative of a [`SirState`], in fractions per day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SirDerivative {
    pub ds: f64,
    pub di: f64,
    pub dr: f64,
}

/// Errors returned when a state is not a valid population split.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StateError {
    #[error("compartment fractions must be finite, got {0:?}")]
    NotFinite(SirState),

    #[error("compartment fractions must lie in [0, 1], got {0:?}")]
    OutOfRange(SirState),

    #[error("compartment fractions must sum to 1, got {total}")]
    NotNormalized { total: f64 },
}

impl SirState {
    #[must_use]
    pub const fn new(s: f64, i: f64, r: f64) -> Self {
        Self { s, i, r }
    }

    /// Returns `s + i + r`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.s + self.i + self.r
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.s.is_finite() && self.i.is_finite() && self.r.is_finite()
    }

    /// Returns `true` if every compartment lies in `[-epsilon, 1 + epsilon]`.
    #[must_use]
    pub fn within_bounds(&self, epsilon: f64) -> bool {
        let ok = |x: f64| x >= -epsilon && x <= 1.0 + epsilon;
        ok(self.s) && ok(self.i) && ok(self.r)
    }

    /// Checks that the state describes a whole population.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if any fraction is non-finite or outside
    /// `[0, 1]`, or if the fractions do not sum to one within `tolerance`.
    pub fn check_population(&self, tolerance: f64) -> Result<(), StateError> {
        if !self.is_finite() {
            return Err(StateError::NotFinite(*self));
        }
        if !self.within_bounds(0.0) {
            return Err(StateError::OutOfRange(*self));
        }
        let total = self.total();
        if (total - 1.0).abs() > tolerance {
            return Err(StateError::NotNormalized { total });
        }
        Ok(())
    }
}

impl Add for SirDerivative {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            ds: self.ds + rhs.ds,
            di: self.di + rhs.di,
            dr: self.dr + rhs.dr,
        }
    }
}

impl Mul<f64> for SirDerivative {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            ds: self.ds * rhs,
            di: self.di * rhs,
            dr: self.dr * rhs,
        }
    }
}

impl StepIntegrable<f64> for SirState {
    type Derivative = SirDerivative;

    fn step(&self, derivative: SirDerivative, delta: f64) -> Self {
        Self {
            s: self.s + derivative.ds * delta,
            i: self.i + derivative.di * delta,
            r: self.r + derivative.dr * delta,
        }
    }
}
