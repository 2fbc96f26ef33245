//! Convert a log to the elapsed-time format.

use std::path::PathBuf;

use anyhow::Context;

use headtrack_common::config::HeadtrackConfig;
use headtrack_processing_core::convert::convert_file;

pub fn run(input: PathBuf, output: Option<PathBuf>, config: &HeadtrackConfig) -> anyhow::Result<()> {
    println!("Converting log: {}", input.display());

    let report = convert_file(&input, output.as_deref(), config)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!("  Data records: {}", report.data_records);
    println!("  Duration: {}", report.duration);
    println!("  Records written: {}", report.records_written);
    println!("\nWrote: {}", report.output.display());

    Ok(())
}
