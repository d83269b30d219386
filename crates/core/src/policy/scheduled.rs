use super::{PolicyError, RateSource};

/// Parameters of a scheduled intervention.
///
/// Before `intervention_time` the rate is `beta_0`. From then on it is cut by
/// `intervention_reduction` (a fraction of `beta_0`). If a [`Rebound`] is
/// given, the rate recovers part of the way back toward `beta_0` at the
/// rebound time; otherwise the intervention rate holds indefinitely.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleConfig {
    pub beta_0: f64,
    pub intervention_time: f64,
    pub intervention_reduction: f64,
    pub rebound: Option<Rebound>,
}

/// A partial relaxation of a scheduled intervention.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rebound {
    pub time: f64,
    /// Fraction of the gap between the intervention rate and `beta_0` that
    /// is recovered.
    pub factor: f64,
}

/// The schedule phase active at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Baseline,
    Intervention,
    Rebound,
}

/// A transmission rate that depends only on time.
///
/// Phase boundaries are half-open: a breakpoint instant already uses the new
/// phase's rate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScheduledRate {
    config: ScheduleConfig,
    beta_intervention: f64,
    beta_rebound: f64,
}

impl ScheduledRate {
    /// Validates the schedule and precomputes the per-phase rates.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] if `beta_0` is not positive and finite, if the
    /// intervention time is not finite, if the reduction or rebound factor lies
    /// outside `[0, 1]`, or if the rebound does not come after the intervention.
    pub fn new(config: ScheduleConfig) -> Result<Self, PolicyError> {
        let ScheduleConfig {
            beta_0,
            intervention_time,
            intervention_reduction,
            rebound,
        } = config;

        if !beta_0.is_finite() || beta_0 <= 0.0 {
            return Err(PolicyError::InvalidRate {
                name: "beta_0",
                value: beta_0,
            });
        }
        if !intervention_time.is_finite() {
            return Err(PolicyError::InvalidTime {
                name: "intervention_time",
                value: intervention_time,
            });
        }
        check_fraction("intervention_reduction", intervention_reduction)?;

        let beta_intervention = beta_0 * (1.0 - intervention_reduction);
        let beta_rebound = match rebound {
            Some(Rebound { time, factor }) => {
                if !time.is_finite() || time <= intervention_time {
                    return Err(PolicyError::ReboundBeforeIntervention {
                        intervention_time,
                        rebound_time: time,
                    });
                }
                check_fraction("rebound_factor", factor)?;
                beta_intervention + (beta_0 - beta_intervention) * factor
            }
            None => beta_intervention,
        };

        Ok(Self {
            config,
            beta_intervention,
            beta_rebound,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Returns the phase in effect at `time`.
    #[must_use]
    pub fn phase_at(&self, time: f64) -> Phase {
        if time < self.config.intervention_time {
            return Phase::Baseline;
        }
        match self.config.rebound {
            Some(rebound) if time >= rebound.time => Phase::Rebound,
            _ => Phase::Intervention,
        }
    }

    /// Returns the rate used during `phase`.
    #[must_use]
    pub fn phase_rate(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Baseline => self.config.beta_0,
            Phase::Intervention => self.beta_intervention,
            Phase::Rebound => self.beta_rebound,
        }
    }
}

impl RateSource for ScheduledRate {
    fn rate_at(&self, time: f64) -> f64 {
        self.phase_rate(self.phase_at(time))
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), PolicyError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PolicyError::InvalidFraction { name, value })
    }
}
