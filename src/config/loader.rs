// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::FixtureOptions;
use crate::errors::{FixtureError, Result};

/// Load fixture options from a TOML file.
///
/// Missing keys fall back to the `FixtureOptions` defaults; unknown keys are
/// rejected so typos don't silently do nothing.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<FixtureOptions> {
    let contents = fs::read_to_string(path)?;
    load_from_str(&contents)
}

pub fn load_from_str(contents: &str) -> Result<FixtureOptions> {
    let options: FixtureOptions = toml::from_str(contents)?;
    validate(&options)?;
    Ok(options)
}

fn validate(options: &FixtureOptions) -> Result<()> {
    if options.config_file.trim().is_empty() {
        return Err(FixtureError::ConfigError(
            "config_file must not be empty".to_string(),
        ));
    }
    if options.poll_interval.is_zero() {
        return Err(FixtureError::ConfigError(
            "poll_interval must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
