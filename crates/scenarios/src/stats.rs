use contagion_core::Trajectory;

/// Fraction of the peak infection level below which the epidemic is
/// considered over.
pub const DURATION_THRESHOLD: f64 = 0.001;

/// Headline numbers of an epidemic trajectory.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SummaryStatistics {
    /// Largest infected fraction.
    pub peak_infection: f64,

    /// Time of the first sample reaching `peak_infection`.
    pub peak_time: f64,

    /// Recovered fraction at the last sample (the final attack rate).
    pub final_size: f64,

    /// Time from the start until infection first falls below
    /// [`DURATION_THRESHOLD`] × peak after the peak, or the whole span if it
    /// never does.
    pub duration: f64,
}

impl SummaryStatistics {
    #[must_use]
    pub fn from_trajectory(trajectory: &Trajectory) -> Self {
        let samples = trajectory.samples();

        let (peak_index, peak) = samples.iter().enumerate().fold(
            (0, trajectory.first()),
            |(best_index, best), (index, sample)| {
                if sample.state.i > best.state.i {
                    (index, sample)
                } else {
                    (best_index, best)
                }
            },
        );

        let threshold = DURATION_THRESHOLD * peak.state.i;
        let end_time = samples[peak_index..]
            .iter()
            .find(|sample| sample.state.i < threshold)
            .map_or(trajectory.end_time(), |sample| sample.time);

        Self {
            peak_infection: peak.state.i,
            peak_time: peak.time,
            final_size: trajectory.last().state.r,
            duration: end_time - trajectory.start_time(),
        }
    }
}
