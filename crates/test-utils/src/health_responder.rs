//! Minimal HTTP endpoint answering every request with a fixed status.

use std::io;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::debug;

/// Listens on `127.0.0.1:<random port>` and records each request line.
pub struct HealthResponder {
    port: u16,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl HealthResponder {
    /// Answer every request with `200 OK`.
    pub async fn healthy() -> io::Result<Self> {
        Self::start(200).await
    }

    pub async fn start(status: u16) -> io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let port = listener.local_addr()?.port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    if let Err(e) = respond(stream, status, recorded).await {
                        debug!(error = %e, "health responder connection failed");
                    }
                });
            }
        });

        Ok(Self {
            port,
            requests,
            handle,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Request lines seen so far, e.g. `GET /db?u=root&p=secret HTTP/1.1`.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for HealthResponder {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn respond(
    mut stream: TcpStream,
    status: u16,
    recorded: Arc<Mutex<Vec<String>>>,
) -> io::Result<()> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    // Headers only; probes carry no body.
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let text = String::from_utf8_lossy(&buf);
    if let Some(line) = text.lines().next() {
        recorded.lock().unwrap().push(line.to_string());
    }

    let reason = if status == 200 { "OK" } else { "Error" };
    let response =
        format!("HTTP/1.1 {status} {reason}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
