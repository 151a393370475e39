// src/server/port.rs

use std::net::{Ipv4Addr, TcpListener};

use tracing::debug;

use crate::errors::Result;

/// Ask the OS for a currently unused port on the loopback interface.
///
/// The listener is closed before returning, so another process may grab the
/// port in between; good enough for test fixtures.
pub fn unused_port() -> Result<u16> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))?;
    let port = listener.local_addr()?.port();
    debug!(port, "reserved unused port");
    Ok(port)
}
