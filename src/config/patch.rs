// src/config/patch.rs

//! Rewriting of the InfluxDB server config file.
//!
//! Only three keys are touched:
//!
//! ```toml
//! [api]
//! port = 41234
//!
//! [logging]
//! file = "<root>/data/log.txt"
//!
//! [storage]
//! dir = "<root>/data/db"
//! ```
//!
//! Everything else in the document is carried over as-is (modulo TOML
//! re-serialisation, which drops comments).

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, info};

use crate::errors::{FixtureError, Result};

/// Per-instance values written into the server config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub port: u16,
    pub log_file: PathBuf,
    pub storage_dir: PathBuf,
}

impl ServerSettings {
    /// Settings that keep all server state under `<root>/data`.
    pub fn for_root(root: &Path, port: u16) -> Self {
        let data = data_dir(root);
        Self {
            port,
            log_file: data.join("log.txt"),
            storage_dir: data.join("db"),
        }
    }
}

pub fn data_dir(root: &Path) -> PathBuf {
    root.join("data")
}

/// Fix array-of-tables headers that lost their closing bracket.
///
/// Shipped InfluxDB configs have been seen with
/// `[[input_plugins.udp_servers]`, which no TOML parser accepts.
pub fn repair_section_headers(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("[[") && trimmed.ends_with(']') && !trimmed.ends_with("]]") {
            debug!(header = %trimmed, "repairing malformed section header");
            out.push_str(trimmed);
            out.push(']');
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// Apply `settings` to a config document and return the new text.
pub fn patch_config(text: &str, settings: &ServerSettings) -> Result<String> {
    let repaired = repair_section_headers(text);
    let mut doc: Table = toml::from_str(&repaired)?;

    section_mut(&mut doc, "api")?.insert("port".to_string(), Value::Integer(settings.port.into()));
    let log_file = utf8_path(&settings.log_file)?;
    let storage_dir = utf8_path(&settings.storage_dir)?;

    section_mut(&mut doc, "logging")?.insert("file".to_string(), Value::String(log_file));
    section_mut(&mut doc, "storage")?.insert("dir".to_string(), Value::String(storage_dir));

    Ok(toml::to_string(&doc)?)
}

// TOML strings are UTF-8; a lossy conversion would point the server elsewhere.
fn utf8_path(path: &Path) -> Result<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        FixtureError::ConfigError(format!("path {path:?} is not valid UTF-8"))
    })
}

fn section_mut<'a>(doc: &'a mut Table, name: &str) -> Result<&'a mut Table> {
    doc.entry(name)
        .or_insert(Value::Table(Table::new()))
        .as_table_mut()
        .ok_or_else(|| {
            FixtureError::ConfigError(format!("`{name}` in server config is not a section"))
        })
}

/// Rewrite the config file at `path` in place.
///
/// A missing file is seeded from `template` when given, otherwise it starts
/// out empty. The data directory next to the config is created as well.
pub fn rewrite_config_file(
    path: &Path,
    template: Option<&Path>,
    settings: &ServerSettings,
) -> Result<()> {
    let original = if path.exists() {
        fs::read_to_string(path)?
    } else if let Some(template) = template {
        debug!(template = %template.display(), "seeding server config from template");
        fs::read_to_string(template)?
    } else {
        String::new()
    };

    let patched = patch_config(&original, settings)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, patched)?;

    if let Some(data) = settings.log_file.parent() {
        fs::create_dir_all(data)?;
    }

    info!(
        config = %path.display(),
        port = settings.port,
        storage = %settings.storage_dir.display(),
        "server config rewritten"
    );
    Ok(())
}
