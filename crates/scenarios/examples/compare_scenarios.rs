//! Runs the static, scheduled, and adaptive scenarios and prints a summary.
//!
//! ```text
//! cargo run --example compare_scenarios -- [CONFIG.toml] [CSV_DIR]
//! ```
//!
//! Without a config path the reference experiment is used. With a CSV
//! directory, each scenario's trajectory is written to `<kind>.csv` there.
//! Set `RUST_LOG=debug` to see each control interval of the adaptive run.

use std::{env, error::Error, fs, fs::File, path::PathBuf};

use contagion::{ExperimentConfig, run_all, write_csv};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);

    let config = match args.next() {
        Some(path) => ExperimentConfig::from_path(path)?,
        None => ExperimentConfig::default(),
    };
    let csv_dir = args.next().map(PathBuf::from);

    let comparison = run_all(&config)?;
    println!("{comparison}");

    if let Some(dir) = csv_dir {
        fs::create_dir_all(&dir)?;
        for result in comparison.results() {
            let path = dir.join(format!("{}.csv", result.kind));
            write_csv(&result.trajectory, File::create(&path)?)?;
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}
