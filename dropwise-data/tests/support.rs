//! Canned HTTP server standing in for OSRM in behavioural tests.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Local server answering every request with the same response.
///
/// Must be started inside a Tokio runtime; it serves requests while that
/// runtime is being driven.
pub struct CannedServer {
    base_url: String,
    targets: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    /// Answer every request with `status` and `body`.
    pub async fn respond(status: u16, body: &str) -> Self {
        let reason = if status < 400 { "OK" } else { "Error" };
        let reply = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        Self::start(Some(reply)).await
    }

    /// Accept connections but never answer them.
    pub async fn silent() -> Self {
        Self::start(None).await
    }

    async fn start(reply: Option<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind canned server");
        let address = listener.local_addr().expect("local address");
        let targets = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&targets);

        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((mut stream, _)) = listener.accept().await {
                let target = read_request_target(&mut stream).await;
                recorded.lock().expect("targets lock").push(target);
                match &reply {
                    Some(text) => {
                        let _ = stream.write_all(text.as_bytes()).await;
                        let _ = stream.shutdown().await;
                    }
                    None => held.push(stream),
                }
            }
        });

        Self {
            base_url: format!("http://{address}"),
            targets,
        }
    }

    /// Base URL to configure services with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request targets (path and query) received so far.
    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().expect("targets lock").clone()
    }
}

/// A base URL nothing listens on.
pub fn refused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let address = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{address}")
}

async fn read_request_target(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    while !buffer.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(read) => buffer.extend_from_slice(&chunk[..read]),
        }
    }
    String::from_utf8_lossy(&buffer)
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_owned()
}
