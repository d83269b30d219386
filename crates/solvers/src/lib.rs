//! Integrators for SIR epidemics under transmission-rate control.
//!
//! Policies that never change state ([`ConstantRate`], [`ScheduledRate`]) are
//! integrated in one pass with [`transient::integrate`]. The feedback policy
//! ([`AdaptiveController`]) is driven by [`transient::segmented::run`], which
//! advances the controller once per control interval and stitches the
//! interval trajectories together.
//!
//! [`ConstantRate`]: contagion_core::policy::ConstantRate
//! [`ScheduledRate`]: contagion_core::policy::ScheduledRate
//! [`AdaptiveController`]: contagion_core::policy::AdaptiveController

pub mod transient;
