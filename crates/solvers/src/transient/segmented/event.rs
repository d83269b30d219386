use contagion_core::{SirState, policy::Feedback};

use super::Segment;

/// Event emitted by the segmented driver once per control interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Interval number, starting at zero.
    pub index: usize,

    pub start: f64,
    pub end: f64,

    /// Infection level frozen at `start` and fed to the controller.
    pub observed_infected: f64,

    pub feedback: Feedback,

    /// Rate in effect before this interval's feedback step.
    pub previous_rate: f64,

    /// Rate used throughout this interval.
    pub rate: f64,

    pub start_state: SirState,
    pub end_state: SirState,

    /// Number of samples the interval was integrated on, both endpoints included.
    pub samples: usize,
}

impl From<&Segment> for Event {
    fn from(segment: &Segment) -> Self {
        Self {
            index: segment.index,
            start: segment.start(),
            end: segment.end(),
            observed_infected: segment.observed_infected,
            feedback: segment.transition.feedback,
            previous_rate: segment.previous_rate,
            rate: segment.transition.rate,
            start_state: segment.start_state(),
            end_state: segment.end_state(),
            samples: segment.trajectory().len(),
        }
    }
}
