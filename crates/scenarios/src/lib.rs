//! Compare SIR epidemics under different transmission-rate policies.
//!
//! [`run_scenario`] runs one scenario by kind: `static` (constant rate),
//! `scheduled` (piecewise-constant intervention), or `adaptive` (feedback on
//! the infection level). [`run_all`] runs all three from one
//! [`ExperimentConfig`] and renders a [`Comparison`] table.
//!
//! ```no_run
//! use contagion::{ExperimentConfig, run_all};
//!
//! let comparison = run_all(&ExperimentConfig::default())?;
//! println!("{comparison}");
//! # Ok::<(), contagion::ScenarioError>(())
//! ```

mod compare;
mod config;
mod report;
mod scenario;
mod stats;

pub use compare::{Comparison, run_all};
pub use config::{AdaptiveSection, ConfigError, ExperimentConfig, ModelConfig, ScheduleSection};
pub use report::{ReportError, write_csv};
pub use scenario::{
    BOUNDS_TOLERANCE, POPULATION_TOLERANCE, RunOptions, ScenarioError, ScenarioKind,
    ScenarioResult, run_scenario,
};
pub use stats::{DURATION_THRESHOLD, SummaryStatistics};
