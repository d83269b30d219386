use thiserror::Error;

use crate::SirState;

/// One point of a trajectory: the state and the transmission rate in effect
/// at `time`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub time: f64,
    pub state: SirState,
    pub rate: f64,
}

/// Errors returned when samples do not form a valid trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("trajectory must contain at least one sample")]
    Empty,

    #[error("sample {index} has non-finite time {time}")]
    NonFiniteTime { index: usize, time: f64 },

    #[error("sample {index} at t = {time} does not follow t = {previous}")]
    NotIncreasing {
        index: usize,
        previous: f64,
        time: f64,
    },
}

/// A time-ordered sequence of samples produced by integration.
///
/// A trajectory is never empty and its times are strictly increasing. It is
/// immutable once built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    /// Builds a trajectory from samples.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::Empty`] for no samples,
    /// [`TrajectoryError::NonFiniteTime`] at the first sample whose time is NaN
    /// or infinite, or [`TrajectoryError::NotIncreasing`] at the first sample
    /// whose time does not strictly exceed its predecessor's (this catches
    /// duplicated boundary samples as well as gaps that run backwards).
    pub fn new(samples: Vec<Sample>) -> Result<Self, TrajectoryError> {
        if samples.is_empty() {
            return Err(TrajectoryError::Empty);
        }

        if let Some((index, sample)) = samples
            .iter()
            .enumerate()
            .find(|(_, sample)| !sample.time.is_finite())
        {
            return Err(TrajectoryError::NonFiniteTime {
                index,
                time: sample.time,
            });
        }

        for (index, pair) in samples.windows(2).enumerate() {
            let (previous, current) = (pair[0].time, pair[1].time);
            if current <= previous {
                return Err(TrajectoryError::NotIncreasing {
                    index: index + 1,
                    previous,
                    time: current,
                });
            }
        }

        Ok(Self { samples })
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; a trajectory holds at least one sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    #[must_use]
    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    #[must_use]
    pub fn start_time(&self) -> f64 {
        self.first().time
    }

    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.last().time
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.time)
    }

    pub fn states(&self) -> impl Iterator<Item = SirState> + '_ {
        self.samples.iter().map(|sample| sample.state)
    }

    pub fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|sample| sample.rate)
    }

    /// Returns the first sample with a compartment outside
    /// `[-epsilon, 1 + epsilon]`, or with a non-finite value.
    #[must_use]
    pub fn first_out_of_bounds(&self, epsilon: f64) -> Option<&Sample> {
        self.samples
            .iter()
            .find(|sample| !sample.state.is_finite() || !sample.state.within_bounds(epsilon))
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, i: f64) -> Sample {
        Sample {
            time,
            state: SirState::new(1.0 - i, i, 0.0),
            rate: 0.5,
        }
    }

    #[test]
    fn accepts_increasing_times() {
        let trajectory =
            Trajectory::new(vec![sample(0.0, 0.01), sample(0.1, 0.02), sample(0.2, 0.03)])
                .unwrap();

        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.start_time(), 0.0);
        assert_eq!(trajectory.end_time(), 0.2);
        assert_eq!(trajectory.times().collect::<Vec<_>>(), vec![0.0, 0.1, 0.2]);
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(Trajectory::new(Vec::new()), Err(TrajectoryError::Empty));
    }

    #[test]
    fn rejects_duplicate_time() {
        let err = Trajectory::new(vec![sample(0.0, 0.01), sample(5.0, 0.02), sample(5.0, 0.02)])
            .unwrap_err();

        assert_eq!(
            err,
            TrajectoryError::NotIncreasing {
                index: 2,
                previous: 5.0,
                time: 5.0
            }
        );
    }

    #[test]
    fn rejects_non_finite_times() {
        let err = Trajectory::new(vec![sample(f64::NAN, 0.01), sample(1.0, 0.02)]).unwrap_err();
        assert!(matches!(err, TrajectoryError::NonFiniteTime { index: 0, time } if time.is_nan()));

        let err = Trajectory::new(vec![sample(0.0, 0.01), sample(f64::NAN, 0.02)]).unwrap_err();
        assert!(matches!(err, TrajectoryError::NonFiniteTime { index: 1, .. }));

        let err = Trajectory::new(vec![sample(f64::INFINITY, 0.01)]).unwrap_err();
        assert!(matches!(err, TrajectoryError::NonFiniteTime { index: 0, .. }));
    }

    #[test]
    fn finds_out_of_bounds_sample() {
        let mut bad = sample(0.2, 0.0);
        bad.state.i = -0.01;

        let trajectory = Trajectory::new(vec![sample(0.0, 0.01), sample(0.1, 0.02), bad]).unwrap();

        assert_eq!(trajectory.first_out_of_bounds(1e-6), Some(&bad));
        assert_eq!(trajectory.first_out_of_bounds(0.1), None);
    }
}
