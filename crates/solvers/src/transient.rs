//! Time integration of SIR trajectories.
//!
//! - [`rk4`]: a generic fixed-step Runge–Kutta stepper
//! - [`continuous`]: one uninterrupted span under a read-only rate source
//! - [`segmented`]: feedback control re-evaluated at fixed intervals

pub mod continuous;
pub mod rk4;
pub mod segmented;

mod error;

pub use continuous::integrate;
pub use error::Error;
