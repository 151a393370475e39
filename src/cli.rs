// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::FixtureOptions;

/// Command-line arguments for `influxdb-fixture`.
///
/// Flags override whatever `--settings` loaded.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "influxdb-fixture",
    version,
    about = "Run a throwaway InfluxDB server on a free port until Ctrl-C.",
    long_about = None
)]
pub struct CliArgs {
    /// TOML file with fixture settings (same keys as `FixtureOptions`).
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// The `influxdb` executable to run if it is not on `$PATH`.
    #[arg(long, value_name = "PATH")]
    pub cmd: Option<PathBuf>,

    /// Root directory of the server. Kept after shutdown.
    ///
    /// If omitted, a temporary directory is used and removed on exit.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file name inside the root directory.
    #[arg(long, value_name = "NAME")]
    pub config_file: Option<String>,

    /// Config file to copy into the root when it has none yet.
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// API port; a free one is picked when omitted.
    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub admin: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `INFLUXDB_FIXTURE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliArgs {
    /// Layer the explicit flags on top of `base`.
    pub fn apply_to(&self, mut base: FixtureOptions) -> FixtureOptions {
        if let Some(ref cmd) = self.cmd {
            base.cmd = cmd.clone();
        }
        if let Some(ref root) = self.root {
            base.root = Some(root.clone());
        }
        if let Some(ref name) = self.config_file {
            base.config_file = name.clone();
        }
        if let Some(ref template) = self.template {
            base.config_template = Some(template.clone());
        }
        if let Some(port) = self.port {
            base.port = Some(port);
        }
        if let Some(ref host) = self.host {
            base.host = host.clone();
        }
        if let Some(ref admin) = self.admin {
            base.admin = Some(admin.clone());
        }
        if let Some(ref password) = self.password {
            base.password = Some(password.clone());
        }
        base
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
