//! Per-scenario setup.
//!
//! Every call to [`setup`] builds a new `PostsApi` over a new transport with
//! its own cookie jar. When `HARNESS_BASE_URL` is set the transport targets
//! that service; otherwise a fresh replay server is started on an ephemeral
//! port, so no scenario ever sees another scenario's writes.

use api_harness::{Fixtures, HarnessConfig, HttpTransport, PostsApi, RequestGateway};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

pub type Api = PostsApi<'static, HttpTransport>;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

async fn start_replay_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

async fn transport() -> HttpTransport {
    init_logging();
    let config = HarnessConfig::from_env().expect("invalid HARNESS_* configuration");
    match config.base_url.as_deref() {
        Some(_) => HttpTransport::from_config(&config).unwrap(),
        None => HttpTransport::new(&start_replay_server().await, &config).unwrap(),
    }
}

pub async fn setup() -> Api {
    PostsApi::new(transport().await, Fixtures::shared())
}

/// A bare gateway, for payloads the typed action layer cannot express.
pub async fn setup_gateway() -> RequestGateway<HttpTransport> {
    RequestGateway::new(transport().await)
}

/// An action layer whose transport points at a port nobody listens on.
pub fn setup_unreachable() -> Api {
    init_logging();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let transport =
        HttpTransport::new(&format!("http://{addr}"), &HarnessConfig::default()).unwrap();
    PostsApi::new(transport, Fixtures::shared())
}
