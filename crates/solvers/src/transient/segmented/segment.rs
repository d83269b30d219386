use log::debug;

use contagion_core::{
    Sample, SirDynamics, SirState, TimeSpan, Trajectory,
    policy::{AdaptiveController, FrozenRate, Transition},
};

use super::Config;
use crate::transient::{Error, continuous, rk4::GRID_TOLERANCE};

/// One integrated control interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Position of the interval in the run, starting at zero.
    pub index: usize,

    /// Infection level observed at the start of the interval.
    pub observed_infected: f64,

    /// Controller rate before this interval's feedback step.
    pub previous_rate: f64,

    /// The feedback step applied for this interval.
    pub transition: Transition,

    trajectory: Trajectory,
}

impl Segment {
    /// Returns the interval's samples, including both endpoints.
    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.trajectory.start_time()
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.trajectory.end_time()
    }

    #[must_use]
    pub fn start_state(&self) -> SirState {
        self.trajectory.first().state
    }

    #[must_use]
    pub fn end_state(&self) -> SirState {
        self.trajectory.last().state
    }

    /// Consumes the segment and yields the samples it contributes to a
    /// stitched trajectory.
    ///
    /// The first segment contributes every sample. Later segments skip their
    /// first sample, which duplicates the previous segment's last one.
    pub fn stitched_samples(self) -> impl Iterator<Item = Sample> {
        let skip = usize::from(self.index > 0);
        self.trajectory.into_samples().into_iter().skip(skip)
    }
}

/// Flattens consecutive segments into one sample sequence without duplicate
/// boundary samples.
pub fn stitch<I>(segments: I) -> impl Iterator<Item = Sample>
where
    I: IntoIterator<Item = Segment>,
{
    segments.into_iter().flat_map(Segment::stitched_samples)
}

/// Lazily integrates a run one control interval at a time.
///
/// Creating a `Segments` resets the controller. Each call to `next` applies
/// one feedback step and integrates one interval. After an error the
/// iterator is exhausted.
pub struct Segments<'a> {
    span: TimeSpan,
    controller: &'a mut AdaptiveController,
    dynamics: &'a SirDynamics,
    config: Config,
    index: usize,
    time: f64,
    state: SirState,
    failed: bool,
}

impl<'a> Segments<'a> {
    pub fn new(
        span: TimeSpan,
        initial: SirState,
        controller: &'a mut AdaptiveController,
        dynamics: &'a SirDynamics,
        config: &Config,
    ) -> Self {
        controller.reset();

        Self {
            span,
            controller,
            dynamics,
            config: *config,
            index: 0,
            time: span.start(),
            state: initial,
            failed: false,
        }
    }

    /// Returns the end of the current interval, clipped to the span.
    ///
    /// Boundaries are computed as `start + k·interval` rather than by
    /// accumulation, and a boundary within [`GRID_TOLERANCE`] intervals of
    /// the span end snaps to it, so no sliver interval is produced.
    #[allow(clippy::cast_precision_loss)]
    fn interval_end(&self) -> f64 {
        let interval = self.config.control_interval().get();
        let end = self.span.start() + (self.index + 1) as f64 * interval;

        if end >= self.span.end() - GRID_TOLERANCE * interval {
            self.span.end()
        } else {
            end
        }
    }

    fn advance(&mut self) -> Result<Segment, Error> {
        let start = self.time;
        let end = self.interval_end();

        let observed_infected = self.state.i;
        let previous_rate = self.controller.current_rate();
        let transition = self.controller.update(observed_infected);

        let trajectory = continuous::integrate(
            TimeSpan::new(start, end)?,
            self.state,
            &FrozenRate(transition.rate),
            self.dynamics,
            self.config.step(),
        )?;

        debug!(
            "segment {} [{start}, {end}]: I = {observed_infected:.6}, {:?}, beta {previous_rate:.4} -> {:.4}",
            self.index, transition.feedback, transition.rate,
        );

        let segment = Segment {
            index: self.index,
            observed_infected,
            previous_rate,
            transition,
            trajectory,
        };

        self.index += 1;
        self.time = end;
        self.state = segment.end_state();

        Ok(segment)
    }
}

impl Iterator for Segments<'_> {
    type Item = Result<Segment, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.time >= self.span.end() {
            return None;
        }

        let result = self.advance();
        self.failed = result.is_err();
        Some(result)
    }
}
