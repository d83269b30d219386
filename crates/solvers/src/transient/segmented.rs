//! Feedback-controlled integration in fixed control intervals.
//!
//! The adaptive policy's rate depends on the infection level, which is part
//! of the state being integrated. The driver therefore integrates in short
//! segments and re-evaluates the control law only at segment boundaries:
//!
//! 1. Reset the controller to its baseline rate.
//! 2. For each control interval `[start, min(start + interval, end)]`:
//!    - Freeze the infection level observed at `start`.
//!    - Apply exactly one feedback step with that level.
//!    - Integrate the interval with the resulting rate held fixed.
//!    - Carry the final state forward as the next interval's initial state.
//! 3. Stitch the segments into one trajectory.
//!
//! # Stitching
//!
//! Each segment is sampled at both of its endpoints, so the first sample of
//! every segment after the first repeats the previous segment's last sample.
//! [`Segment::stitched_samples`] drops that sample, which yields a trajectory
//! with strictly increasing times and no gaps. The boundary sample therefore
//! records the rate of the segment that ends there.
//!
//! # Observer Events
//!
//! [`run_observed`] emits one [`Event`] per control interval, after the
//! interval has been integrated.

mod config;
mod event;
mod segment;


pub use config::Config;
pub use event::Event;
pub use segment::{Segment, Segments, stitch};

use contagion_core::{
    Observer, SirDynamics, SirState, TimeSpan, Trajectory, policy::AdaptiveController,
};

use super::Error;

/// Runs the adaptive scenario over `span`.
///
/// The controller is reset before the first interval, so repeated runs from
/// the same inputs produce identical trajectories.
///
/// # Errors
///
/// Returns an error if any segment fails to integrate. No partial
/// trajectory is returned.
pub fn run(
    span: TimeSpan,
    initial: SirState,
    controller: &mut AdaptiveController,
    dynamics: &SirDynamics,
    config: &Config,
) -> Result<Trajectory, Error> {
    run_observed(span, initial, controller, dynamics, config, ())
}

/// Runs the adaptive scenario, reporting each control interval to `observer`.
///
/// # Errors
///
/// Returns an error if any segment fails to integrate. No partial
/// trajectory is returned.
pub fn run_observed<Obs>(
    span: TimeSpan,
    initial: SirState,
    controller: &mut AdaptiveController,
    dynamics: &SirDynamics,
    config: &Config,
    mut observer: Obs,
) -> Result<Trajectory, Error>
where
    Obs: Observer<Event>,
{
    let segments = Segments::new(span, initial, controller, dynamics, config)
        .map(|segment| {
            let segment = segment?;
            observer.observe(&Event::from(&segment));
            Ok(segment)
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(Trajectory::new(stitch(segments).collect())?)
}
