use thiserror::Error;

use crate::{SirDerivative, SirState};

/// Errors raised while evaluating the SIR right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DynamicsError {
    #[error("recovery rate must be finite and non-negative, got {0}")]
    InvalidGamma(f64),

    #[error("non-finite value at t = {time}: state {state:?}, beta = {beta}")]
    NonFinite {
        time: f64,
        state: SirState,
        beta: f64,
    },

    #[error("transmission rate must be non-negative, got {beta} at t = {time}")]
    NegativeRate { time: f64, beta: f64 },
}

/// Computes the SIR derivatives for a state, transmission rate, and recovery rate.
///
/// ```text
/// dS = -β·S·I
/// dI =  β·S·I - γ·I
/// dR =  γ·I
/// ```
#[must_use]
pub fn sir_derivatives(state: &SirState, beta: f64, gamma: f64) -> SirDerivative {
    let infections = beta * state.s * state.i;
    let recoveries = gamma * state.i;

    SirDerivative {
        ds: -infections,
        di: infections - recoveries,
        dr: recoveries,
    }
}

/// SIR dynamics with a fixed recovery rate `γ`.
///
/// The transmission rate is supplied per evaluation, since it is the quantity
/// the rate policies control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SirDynamics {
    gamma: f64,
}

impl SirDynamics {
    /// Creates dynamics with recovery rate `gamma` (per day).
    ///
    /// # Errors
    ///
    /// Returns [`DynamicsError::InvalidGamma`] if `gamma` is negative or non-finite.
    pub fn new(gamma: f64) -> Result<Self, DynamicsError> {
        if gamma.is_finite() && gamma >= 0.0 {
            Ok(Self { gamma })
        } else {
            Err(DynamicsError::InvalidGamma(gamma))
        }
    }

    #[must_use]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    #[must_use]
    pub fn derivative(&self, state: &SirState, beta: f64) -> SirDerivative {
        sir_derivatives(state, beta, self.gamma)
    }

    /// Like [`derivative`](Self::derivative), but rejects inputs that would
    /// poison an integration step.
    ///
    /// # Errors
    ///
    /// Returns [`DynamicsError::NonFinite`] if the state or `beta` is not
    /// finite, or [`DynamicsError::NegativeRate`] if `beta` is negative.
    pub fn checked_derivative(
        &self,
        time: f64,
        state: &SirState,
        beta: f64,
    ) -> Result<SirDerivative, DynamicsError> {
        if !state.is_finite() || !beta.is_finite() {
            return Err(DynamicsError::NonFinite {
                time,
                state: *state,
                beta,
            });
        }
        if beta < 0.0 {
            return Err(DynamicsError::NegativeRate { time, beta });
        }
        Ok(self.derivative(state, beta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn derivatives_match_closed_form() {
        let state = SirState::new(0.99, 0.01, 0.0);

        let d = sir_derivatives(&state, 0.5, 0.1);

        assert_relative_eq!(d.ds, -0.00495);
        assert_relative_eq!(d.di, 0.00395);
        assert_relative_eq!(d.dr, 0.001);
    }

    #[test]
    fn derivatives_conserve_population() {
        let state = SirState::new(0.6, 0.3, 0.1);

        let d = sir_derivatives(&state, 0.8, 0.25);

        assert_relative_eq!(d.ds + d.di + d.dr, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn no_infected_means_no_change() {
        let state = SirState::new(0.7, 0.0, 0.3);

        let d = sir_derivatives(&state, 0.5, 0.1);

        assert_eq!(d.ds, 0.0);
        assert_eq!(d.di, 0.0);
        assert_eq!(d.dr, 0.0);
    }

    #[test]
    fn negative_gamma_is_rejected() {
        assert_eq!(SirDynamics::new(-0.1), Err(DynamicsError::InvalidGamma(-0.1)));
    }

    #[test]
    fn checked_derivative_rejects_nan_state() {
        let dynamics = SirDynamics::new(0.1).unwrap();
        let state = SirState::new(f64::NAN, 0.1, 0.0);

        let err = dynamics.checked_derivative(3.0, &state, 0.5).unwrap_err();

        assert!(matches!(err, DynamicsError::NonFinite { time, .. } if time == 3.0));
    }

    #[test]
    fn checked_derivative_rejects_negative_rate() {
        let dynamics = SirDynamics::new(0.1).unwrap();
        let state = SirState::new(0.9, 0.1, 0.0);

        assert_eq!(
            dynamics.checked_derivative(1.0, &state, -0.5),
            Err(DynamicsError::NegativeRate {
                time: 1.0,
                beta: -0.5
            })
        );
    }
}
