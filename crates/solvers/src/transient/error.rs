use contagion_core::{TimeError, TrajectoryError};

use super::rk4;

/// Errors that can occur while integrating an SIR trajectory.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("integration failed: {0}")]
    Integration(#[from] rk4::Error),

    #[error("invalid segment span: {0}")]
    Time(#[from] TimeError),

    #[error("integrator produced an invalid trajectory: {0}")]
    Trajectory(#[from] TrajectoryError),
}
