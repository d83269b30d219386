use std::io;

use serde::Serialize;
use thiserror::Error;

use contagion_core::{Sample, Trajectory};

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Serialize)]
struct Row {
    time: f64,
    #[serde(rename = "S")]
    s: f64,
    #[serde(rename = "I")]
    i: f64,
    #[serde(rename = "R")]
    r: f64,
    beta: f64,
}

impl From<&Sample> for Row {
    fn from(sample: &Sample) -> Self {
        Self {
            time: sample.time,
            s: sample.state.s,
            i: sample.state.i,
            r: sample.state.r,
            beta: sample.rate,
        }
    }
}

/// Writes a trajectory as CSV with a `time,S,I,R,beta` header.
///
/// # Errors
///
/// Returns a [`ReportError`] if a row cannot be serialized or written.
pub fn write_csv<W: io::Write>(trajectory: &Trajectory, writer: W) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(writer);
    for sample in trajectory {
        writer.serialize(Row::from(sample))?;
    }
    writer.flush()?;
    Ok(())
}
