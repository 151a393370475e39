#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

pub use influxdb_fixture_test_utils::init_tracing;

/// Run a future with a 15-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(15), f)
        .await
        .expect("Test timed out after 15 seconds")
}

/// Wait until `path` exists and return its contents.
pub async fn wait_for_file(path: &Path) -> String {
    with_timeout(async {
        loop {
            if let Ok(contents) = std::fs::read_to_string(path) {
                return contents;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
}

/// Whether a process with `pid` still exists (signal-0 probe).
///
/// Zombies count as gone: the fixture may have killed a child it no longer
/// waits on, and reaping is then up to the runtime.
#[cfg(unix)]
pub fn pid_alive(pid: u32) -> bool {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    #[allow(clippy::cast_possible_wrap)]
    let target = Pid::from_raw(pid as i32);
    if kill(target, None).is_err() {
        return false;
    }

    match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        Ok(stat) => !stat
            .rsplit(')')
            .next()
            .is_some_and(|rest| rest.trim_start().starts_with('Z')),
        Err(_) => true,
    }
}
