// tests/config_patch.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::fs;
use std::path::Path;

use tempfile::tempdir;
use toml::Table;

use influxdb_fixture::config::{
    ServerSettings, patch_config, repair_section_headers, rewrite_config_file,
};
use influxdb_fixture::errors::FixtureError;

type TestResult = Result<(), Box<dyn Error>>;

const SHIPPED_CONFIG: &str = r#"
bind-address = "0.0.0.0"

[logging]
level  = "info"
file   = "/opt/influxdb/shared/log.txt"

[admin]
port   = 8083

[api]
port     = 8086
read-timeout = "5s"

  [input_plugins.graphite]
  enabled = false

[[input_plugins.udp_servers]
  enabled = false

[storage]
dir = "/opt/influxdb/shared/data/db"
write-buffer-size = 10000
"#;

fn parse(text: &str) -> Table {
    toml::from_str(text).expect("patched config must be valid TOML")
}

#[test]
fn patch_sets_port_log_file_and_storage_dir() -> TestResult {
    init_tracing();

    let settings = ServerSettings::for_root(Path::new("/tmp/fixture-root"), 41234);
    let patched = parse(&patch_config(SHIPPED_CONFIG, &settings)?);

    assert_eq!(patched["api"]["port"].as_integer(), Some(41234));
    assert_eq!(
        patched["logging"]["file"].as_str(),
        Some("/tmp/fixture-root/data/log.txt")
    );
    assert_eq!(
        patched["storage"]["dir"].as_str(),
        Some("/tmp/fixture-root/data/db")
    );

    Ok(())
}

#[test]
fn patch_keeps_unrelated_keys() -> TestResult {
    init_tracing();

    let settings = ServerSettings::for_root(Path::new("/srv/influx"), 9999);
    let patched = parse(&patch_config(SHIPPED_CONFIG, &settings)?);

    assert_eq!(patched["bind-address"].as_str(), Some("0.0.0.0"));
    assert_eq!(patched["logging"]["level"].as_str(), Some("info"));
    assert_eq!(patched["admin"]["port"].as_integer(), Some(8083));
    assert_eq!(patched["api"]["read-timeout"].as_str(), Some("5s"));
    assert_eq!(
        patched["storage"]["write-buffer-size"].as_integer(),
        Some(10000)
    );
    assert_eq!(
        patched["input_plugins"]["graphite"]["enabled"].as_bool(),
        Some(false)
    );

    Ok(())
}

#[test]
fn malformed_array_of_tables_header_is_repaired() -> TestResult {
    init_tracing();

    let repaired = repair_section_headers("[[input_plugins.udp_servers]\nenabled = true\n");
    assert_eq!(repaired, "[[input_plugins.udp_servers]]\nenabled = true\n");

    // Well-formed headers are left alone.
    let untouched = "[[a.b]]\n[c]\nx = [1]\n";
    assert_eq!(repair_section_headers(untouched), untouched);

    let settings = ServerSettings::for_root(Path::new("/r"), 1);
    let patched = parse(&patch_config(SHIPPED_CONFIG, &settings)?);
    let servers = patched["input_plugins"]["udp_servers"]
        .as_array()
        .expect("udp_servers must be an array of tables");
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0]["enabled"].as_bool(), Some(false));

    Ok(())
}

#[test]
fn missing_sections_are_created() -> TestResult {
    init_tracing();

    let settings = ServerSettings::for_root(Path::new("/r"), 8086);
    let patched = parse(&patch_config("", &settings)?);

    assert_eq!(patched["api"]["port"].as_integer(), Some(8086));
    assert_eq!(patched["logging"]["file"].as_str(), Some("/r/data/log.txt"));
    assert_eq!(patched["storage"]["dir"].as_str(), Some("/r/data/db"));

    Ok(())
}

#[test]
fn non_table_section_is_a_config_error() {
    init_tracing();

    let settings = ServerSettings::for_root(Path::new("/r"), 8086);
    match patch_config("api = 3\n", &settings) {
        Err(FixtureError::ConfigError(msg)) => assert!(msg.contains("api")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn invalid_toml_is_a_toml_error() {
    init_tracing();

    let settings = ServerSettings::for_root(Path::new("/r"), 8086);
    let result = patch_config("[api\nport = ", &settings);
    assert!(matches!(result, Err(FixtureError::TomlError(_))));
}

#[test]
fn rewrite_in_place_and_create_data_dir() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let cfg = dir.path().join("config.toml");
    fs::write(&cfg, SHIPPED_CONFIG)?;

    let settings = ServerSettings::for_root(dir.path(), 5555);
    rewrite_config_file(&cfg, None, &settings)?;

    let patched = parse(&fs::read_to_string(&cfg)?);
    assert_eq!(patched["api"]["port"].as_integer(), Some(5555));
    assert!(dir.path().join("data").is_dir());

    Ok(())
}

#[test]
fn missing_config_is_seeded_from_template() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let template = dir.path().join("template.toml");
    fs::write(&template, SHIPPED_CONFIG)?;

    let root = dir.path().join("root");
    let cfg = root.join("config.toml");
    let settings = ServerSettings::for_root(&root, 7777);
    rewrite_config_file(&cfg, Some(&template), &settings)?;

    let patched = parse(&fs::read_to_string(&cfg)?);
    assert_eq!(patched["api"]["port"].as_integer(), Some(7777));
    assert_eq!(patched["admin"]["port"].as_integer(), Some(8083));

    // The template itself is not modified.
    assert_eq!(fs::read_to_string(&template)?, SHIPPED_CONFIG);

    Ok(())
}

#[test]
fn existing_config_wins_over_template() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let template = dir.path().join("template.toml");
    fs::write(&template, "[admin]\nport = 1\n")?;
    let cfg = dir.path().join("config.toml");
    fs::write(&cfg, "[admin]\nport = 2\n")?;

    rewrite_config_file(&cfg, Some(&template), &ServerSettings::for_root(dir.path(), 3))?;

    let patched = parse(&fs::read_to_string(&cfg)?);
    assert_eq!(patched["admin"]["port"].as_integer(), Some(2));

    Ok(())
}

#[test]
fn unreadable_template_propagates_io_error() {
    init_tracing();

    let dir = tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    let missing = dir.path().join("does-not-exist.toml");

    let result = rewrite_config_file(
        &cfg,
        Some(&missing),
        &ServerSettings::for_root(dir.path(), 3),
    );
    assert!(matches!(result, Err(FixtureError::IoError(_))));
}

#[cfg(unix)]
#[test]
fn non_utf8_root_is_a_config_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    init_tracing();

    let root = Path::new(OsStr::from_bytes(b"/tmp/influx-\xff"));
    let settings = ServerSettings::for_root(root, 8086);

    match patch_config("", &settings) {
        Err(FixtureError::ConfigError(msg)) => assert!(msg.contains("UTF-8")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}
