// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_CMD: &str = "influxdb";
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_ADMIN: &str = "root";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Overrides for a fixture instance.
///
/// Every field is optional in TOML:
///
/// ```toml
/// cmd = "/opt/influxdb/influxdb"
/// root = "/opt/influxdb/shared"
/// config_template = "tests/data/config.toml"
/// port = 8086
/// password = "secret"
/// poll_interval = "250ms"
/// shutdown_timeout = "5s"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureOptions {
    /// Root directory of the server (config file + `data/`).
    ///
    /// If set, it is never removed. If unset, a temporary directory is
    /// created and removed on stop.
    pub root: Option<PathBuf>,

    /// The `influxdb` executable; bare names are resolved through `$PATH`.
    pub cmd: PathBuf,

    /// Name of the config file inside `root`.
    pub config_file: String,

    /// Seed for the config file when `root` does not contain one yet.
    pub config_template: Option<PathBuf>,

    pub host: String,

    /// API port. `None` means "ask the OS for a free one".
    pub port: Option<u16>,

    pub admin: Option<String>,

    /// Passed to the server as `INFLUXDB_INIT_PWD` when set.
    pub password: Option<String>,

    /// Delay between readiness probes.
    #[serde(deserialize_with = "crate::config::duration::deserialize")]
    pub poll_interval: Duration,

    /// How long to wait after SIGTERM before escalating to SIGKILL.
    #[serde(deserialize_with = "crate::config::duration::deserialize")]
    pub shutdown_timeout: Duration,

    /// Optional upper bound on startup. When unset, only the child exiting
    /// ends an unsuccessful readiness poll.
    #[serde(deserialize_with = "crate::config::duration::deserialize_opt")]
    pub startup_timeout: Option<Duration>,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            root: None,
            cmd: PathBuf::from(DEFAULT_CMD),
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            config_template: None,
            host: DEFAULT_HOST.to_string(),
            port: None,
            admin: Some(DEFAULT_ADMIN.to_string()),
            password: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            startup_timeout: None,
        }
    }
}

impl FixtureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.cmd = cmd.into();
        self
    }

    pub fn with_config_file(mut self, name: impl Into<String>) -> Self {
        self.config_file = name.into();
        self
    }

    pub fn with_config_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.config_template = Some(template.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_admin(mut self, admin: Option<&str>) -> Self {
        self.admin = admin.map(str::to_string);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = Some(timeout);
        self
    }
}
