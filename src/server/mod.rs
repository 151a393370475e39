// src/server/mod.rs

//! Lifecycle of a single InfluxDB child process.
//!
//! - [`port`] asks the OS for an unused TCP port.
//! - [`process`] spawns the binary and stops it (SIGTERM, bounded wait,
//!   SIGKILL fallback).
//! - [`health`] is the HTTP readiness probe and its poll loop.
//! - [`instance`] ties the pieces together in [`InfluxDbServer`].

pub mod health;
pub mod instance;
pub mod port;
pub mod process;

pub use health::{HealthProbe, wait_until_ready};
pub use instance::InfluxDbServer;
pub use port::unused_port;
pub use process::{PASSWORD_ENV_VAR, spawn_server, terminate};
