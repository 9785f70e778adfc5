//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use locale_gate::config::GateConfig;
use locale_gate::http::GateServer;
use locale_gate::lifecycle::Shutdown;

/// Start a mock site origin that answers 200 with the requested path as body
/// and echoes the request ID it received in `x-upstream-request-id`.
pub async fn start_mock_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }

                let head = String::from_utf8_lossy(&buf);
                let target = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                let request_id = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("x-request-id")
                            .then(|| value.trim().to_string())
                    })
                    .unwrap_or_default();

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nX-Upstream-Request-Id: {}\r\nConnection: close\r\n\r\n{}",
                    target.len(),
                    request_id,
                    target
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Run a gate server on an ephemeral port. Keep the returned `Shutdown`
/// alive for as long as the server should run.
pub async fn start_gate(config: GateConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = GateServer::new(&config).unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// A client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
