// src/errors.rs

//! Crate-wide error type and `Result` alias.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("failed to spawn server binary {cmd:?}: {source}")]
    Spawn {
        cmd: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("InfluxDB exited before becoming ready ({status})")]
    StartupFailed { status: ExitStatus },

    #[error("InfluxDB did not become ready within {0:?}")]
    StartupTimeout(Duration),

    #[error("unable to cleanly stop InfluxDB (pid {pid}) within {timeout:?}; process was killed")]
    ShutdownTimeout { pid: u32, timeout: Duration },

    #[error("URI with admin info could not be formed; missing {}", .0.join(", "))]
    IncompleteUri(Vec<&'static str>),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, FixtureError>;
