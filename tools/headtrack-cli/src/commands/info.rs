//! Show a summary of a log.

use std::path::PathBuf;

use headtrack_processing_core::convert::load_log;
use headtrack_processing_core::summary::{AngleRange, LogSummary};

pub fn run(input: PathBuf, json: bool) -> anyhow::Result<()> {
    let log = load_log(&input).map_err(|e| anyhow::anyhow!("Failed to read log: {e}"))?;
    let summary = LogSummary::from_log(&log);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Log: {}", input.display());
    println!("  Data records: {}", summary.data_records);
    if let (Some(first), Some(last)) = (summary.first_timestamp, summary.last_timestamp) {
        println!("  Recorded: {first} .. {last}");
    }
    println!("  Duration: {}", log.last_elapsed);
    println!("  Records after downsampling: {}", summary.records_kept);
    println!();

    println!("Left orientation (degrees):");
    print_range("Pitch (x)", summary.left_x);
    print_range("Yaw (y)", summary.left_y);
    print_range("Roll (z)", summary.left_z);

    Ok(())
}

fn print_range(label: &str, range: Option<AngleRange>) {
    match range {
        Some(r) => println!("  {label}: {:.1} .. {:.1}", r.min, r.max),
        None => println!("  {label}: -"),
    }
}
