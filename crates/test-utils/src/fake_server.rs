//! Shell scripts standing in for the `influxdb` binary.
//!
//! None of them listen on a port; pair them with a
//! [`HealthResponder`](crate::HealthResponder) when the fixture should see a
//! healthy server.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct FakeServer {
    record_to: Option<PathBuf>,
    ignore_sigterm: bool,
    exit_code: Option<i32>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the arguments and `INFLUXDB_INIT_PWD` to `path` on startup.
    ///
    /// The last line is `pwd=unset` when the variable is not set at all.
    pub fn record_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.record_to = Some(path.into());
        self
    }

    /// Keep running after SIGTERM, so only SIGKILL stops it.
    pub fn ignore_sigterm(mut self) -> Self {
        self.ignore_sigterm = true;
        self
    }

    /// Exit straight away with `code`.
    pub fn exit_with(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    fn script(&self) -> String {
        let mut body = String::from("#!/bin/sh\n");

        if let Some(ref record) = self.record_to {
            let record = record.display();
            body.push_str(&format!("printf '%s\\n' \"$@\" > \"{record}.tmp\"\n"));
            body.push_str(&format!(
                "printf 'pwd=%s\\n' \"${{INFLUXDB_INIT_PWD-unset}}\" >> \"{record}.tmp\"\n"
            ));
            body.push_str(&format!("mv \"{record}.tmp\" \"{record}\"\n"));
        }

        if let Some(code) = self.exit_code {
            body.push_str(&format!("exit {code}\n"));
        } else if self.ignore_sigterm {
            body.push_str("trap '' TERM\nwhile true; do sleep 0.1; done\n");
        } else {
            body.push_str("exec sleep 60\n");
        }

        body
    }

    /// Write the script as an executable file `dir/name`.
    pub fn write(&self, dir: &Path, name: &str) -> io::Result<PathBuf> {
        let path = dir.join(name);
        fs::write(&path, self.script())?;
        make_executable(&path)?;
        Ok(path)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
