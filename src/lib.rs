// src/lib.rs

//! Disposable InfluxDB servers for tests.
//!
//! [`InfluxDbServer`] launches the real `influxdb` binary on a free port with
//! its own data directory, waits until the HTTP API answers, and tears
//! everything down again on [`InfluxDbServer::stop`] (or, less gracefully,
//! on drop).

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod server;

pub use config::FixtureOptions;
pub use errors::{FixtureError, Result};
pub use server::InfluxDbServer;

use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_from_path;

/// Entry point used by `main.rs`.
///
/// - load `--settings` (if any) and layer CLI flags on top
/// - start the server and print its URI on stdout
/// - wait for Ctrl-C, then stop it
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let base = match args.settings {
        Some(ref path) => load_from_path(path)?,
        None => FixtureOptions::default(),
    };
    let options = args.apply_to(base);

    let mut server = InfluxDbServer::new(options);
    server.start().await?;

    // Without a password there is no credentialed URI; print the bare URL.
    let uri = match server.uri() {
        Ok(uri) => uri,
        Err(_) => server.base_url()?,
    };
    println!("{uri}");

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C; stopping now");
    }
    info!("shutting down InfluxDB");

    server.stop().await?;
    Ok(())
}
