use std::path::Path;
use std::time::Duration;

use influxdb_fixture::FixtureOptions;

/// Options pointing at a fake server binary, with timings short enough for
/// tests.
pub fn fast_options(cmd: &Path, port: u16) -> FixtureOptions {
    FixtureOptions::new()
        .with_cmd(cmd)
        .with_port(port)
        .with_poll_interval(Duration::from_millis(50))
        .with_shutdown_timeout(Duration::from_secs(2))
}
