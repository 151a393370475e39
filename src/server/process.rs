// src/server/process.rs

//! Spawning and stopping the server process.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::errors::{FixtureError, Result};

/// Environment variable InfluxDB reads the initial admin password from.
pub const PASSWORD_ENV_VAR: &str = "INFLUXDB_INIT_PWD";

/// Spawn `cmd -config <config_path>`.
///
/// The password, if non-empty, is handed to the child through its own environment;
/// the current process environment is left untouched. Output is drained into
/// `debug!` logs so the pipes never fill up.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_server(cmd: &Path, config_path: &Path, password: Option<&str>) -> Result<Child> {
    info!(
        cmd = %cmd.display(),
        config = %config_path.display(),
        "starting InfluxDB process"
    );

    let mut command = Command::new(cmd);
    command
        .arg("-config")
        .arg(config_path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(false);

    if let Some(password) = password.filter(|p| !p.is_empty()) {
        command.env(PASSWORD_ENV_VAR, password);
    }

    let mut child = command.spawn().map_err(|source| FixtureError::Spawn {
        cmd: cmd.to_path_buf(),
        source,
    })?;

    let pid = child.id().unwrap_or_default();
    if let Some(stdout) = child.stdout.take() {
        drain_lines(stdout, pid, "stdout");
    }
    if let Some(stderr) = child.stderr.take() {
        drain_lines(stderr, pid, "stderr");
    }

    Ok(child)
}

fn drain_lines<R>(reader: R, pid: u32, stream: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(pid, stream, "influxdb: {}", line);
        }
    });
}

/// Stop `child`: SIGTERM, wait up to `timeout`, then SIGKILL.
///
/// Returns `ShutdownTimeout` when the kill was needed. A child that was
/// already reaped is a no-op.
pub async fn terminate(mut child: Child, timeout: Duration) -> Result<()> {
    let Some(pid) = child.id() else {
        debug!("InfluxDB process already reaped");
        return Ok(());
    };

    request_shutdown(&mut child, pid)?;

    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(status) => {
            let status = status?;
            info!(pid, %status, "InfluxDB process exited");
            Ok(())
        }
        Err(_elapsed) => {
            warn!(
                pid,
                timeout_ms = timeout.as_millis() as u64,
                "InfluxDB ignored SIGTERM; sending SIGKILL"
            );
            child.kill().await?;
            Err(FixtureError::ShutdownTimeout { pid, timeout })
        }
    }
}

#[cfg(unix)]
fn request_shutdown(_child: &mut Child, pid: u32) -> Result<()> {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    debug!(pid, "sending SIGTERM");
    #[allow(clippy::cast_possible_wrap)]
    let target = Pid::from_raw(pid as i32);
    match kill(target, Signal::SIGTERM) {
        // Exited on its own; `wait` will reap it.
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(errno) => Err(std::io::Error::from(errno).into()),
    }
}

#[cfg(not(unix))]
fn request_shutdown(child: &mut Child, pid: u32) -> Result<()> {
    debug!(pid, "no graceful signal on this platform; killing");
    child.start_kill()?;
    Ok(())
}
