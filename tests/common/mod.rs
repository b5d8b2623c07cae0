//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use echo_tap::config::HttpConfig;
use echo_tap::ingress::HttpIngress;
use echo_tap::Shutdown;

/// Upper bound for anything a test waits on.
pub const WAIT: Duration = Duration::from_secs(5);

/// Start an ingress on an ephemeral loopback port.
#[allow(dead_code)]
pub async fn start_ingress(shutdown: &Shutdown) -> (HttpIngress, SocketAddr) {
    let config = HttpConfig {
        bind_address: "127.0.0.1:0".into(),
        strict: false,
    };
    let ingress = HttpIngress::start(&config, shutdown).await;
    let addr = ingress.local_addr().expect("ingress should bind");
    (ingress, addr)
}

/// A client that never pools or proxies, so shutdown is not held up.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// POST `body` to the ingress and return the response status.
pub async fn post(client: &reqwest::Client, addr: SocketAddr, body: &'static str) -> u16 {
    client
        .post(format!("http://{addr}/"))
        .body(body)
        .send()
        .await
        .expect("ingress unreachable")
        .status()
        .as_u16()
}
