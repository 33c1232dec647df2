//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use rate_gate::config::GatewayConfig;
use rate_gate::http::HttpServer;
use rate_gate::lifecycle::Shutdown;

/// Start the gateway on an ephemeral port.
///
/// Returns the bound address and the shutdown handle that keeps the server
/// alive for the duration of the test.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, shutdown_rx).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, shutdown)
}

/// HTTP client with pooling disabled so every request is a fresh connection.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
