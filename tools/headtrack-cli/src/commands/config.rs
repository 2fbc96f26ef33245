//! Show or initialize the configuration file.

use headtrack_common::config::{config_file_path, HeadtrackConfig};

pub fn run(config: &HeadtrackConfig, init: bool) -> anyhow::Result<()> {
    if init {
        let path = config.save()?;
        println!("Wrote configuration to: {}", path.display());
        return Ok(());
    }

    println!("# {}", config_file_path().display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
