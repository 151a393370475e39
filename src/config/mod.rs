// src/config/mod.rs

//! Configuration for the fixture and for the server it launches.
//!
//! Responsibilities:
//! - Define the fixture's own settings (`model.rs`), loadable from TOML
//!   (`loader.rs`), with duration strings parsed by `duration.rs`.
//! - Rewrite the InfluxDB config file so each instance gets its own port and
//!   data directory (`patch.rs`).

pub mod duration;
pub mod loader;
pub mod model;
pub mod patch;

pub use duration::parse_duration;
pub use loader::{load_from_path, load_from_str};
pub use model::FixtureOptions;
pub use patch::{ServerSettings, patch_config, repair_section_headers, rewrite_config_file};
