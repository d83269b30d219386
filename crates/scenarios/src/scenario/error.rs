use contagion_core::{
    DynamicsError, SirState, StateError, TimeError,
    policy::{PolicyError, PolicyKind},
};
use contagion_solvers::transient::{self, rk4};

use super::ScenarioKind;

/// Errors that can occur when running a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("unknown scenario kind {0:?}; expected static, scheduled, or adaptive")]
    UnknownKind(String),

    #[error("{kind} scenario requires a matching policy, got a {policy} policy")]
    PolicyMismatch { kind: ScenarioKind, policy: PolicyKind },

    #[error("invalid policy parameters: {0}")]
    Policy(#[from] PolicyError),

    #[error("invalid time span: {0}")]
    TimeSpan(#[source] TimeError),

    #[error("invalid integration step: {0}")]
    Step(#[source] TimeError),

    #[error("invalid control interval: {0}")]
    ControlInterval(#[source] TimeError),

    #[error("invalid recovery rate: {0}")]
    Gamma(#[from] DynamicsError),

    #[error("invalid initial state: {0}")]
    InitialState(#[from] StateError),

    #[error(transparent)]
    Integration(transient::Error),

    #[error("numerical instability at t = {time}: state {state:?} left the unit interval; reduce the step size")]
    NumericalInstability { time: f64, state: SirState },
}

impl From<transient::Error> for ScenarioError {
    /// Reports a state that went non-finite mid-step as numerical instability;
    /// every other integration failure passes through unchanged.
    fn from(err: transient::Error) -> Self {
        if let transient::Error::Integration(rk4::Error::Derivative { source, .. }) = &err {
            if let Some(&DynamicsError::NonFinite { time, state, .. }) = source.downcast_ref::<DynamicsError>() {
                if !state.is_finite() {
                    return Self::NumericalInstability { time, state };
                }
            }
        }
        Self::Integration(err)
    }
}
