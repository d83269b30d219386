//! Core types for simulating SIR epidemics under controlled transmission.
//!
//! This crate defines the shared pieces that the solvers and scenarios build on:
//!
//! - [`SirState`] / [`SirDerivative`]: compartment fractions and their rates of change
//! - [`StepIntegrable`]: how a state is advanced by a derivative and a step size
//! - [`SirDynamics`]: the SIR right-hand side with a fixed recovery rate
//! - [`policy`]: constant, scheduled, and feedback-adaptive transmission rates
//! - [`Trajectory`]: a validated, time-ordered sequence of [`Sample`]s
//! - [`TimeSpan`] / [`TimeIncrement`]: validated time values
//! - [`Observer`]: receives solver events

mod dynamics;
mod observer;
mod state;
mod step;
mod time;
mod trajectory;

pub mod policy;

pub use dynamics::{DynamicsError, SirDynamics, sir_derivatives};
pub use observer::Observer;
pub use state::{SirDerivative, SirState, StateError};
pub use step::{DerivativeOf, StepIntegrable};
pub use time::{TimeError, TimeIncrement, TimeSpan};
pub use trajectory::{Sample, Trajectory, TrajectoryError};
