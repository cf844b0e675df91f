//! File logging
//!
//! The terminal belongs to the game screen, so log records go to a file.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::Path;

/// Route the `log` macros to `path` at the given level
///
/// `LevelFilter::Off` installs nothing and creates no file.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;
    Ok(())
}
