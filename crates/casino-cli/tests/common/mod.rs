//! Common test utilities for integration tests.

use casino_cli::commands::{default_handlers, CommandHandler};
use casino_client::CasinoClient;
use casino_session::Session;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Principal of the test caller.
pub const TEST_PRINCIPAL: &str = "aaaaa-aa";

/// Start a mock casino backend.
pub async fn mock_backend() -> MockServer {
    MockServer::start().await
}

/// Handlers wired to a client for the mock backend.
pub fn test_handlers(mock_server: &MockServer) -> Vec<Box<dyn CommandHandler>> {
    let client = CasinoClient::new(
        mock_server.uri(),
        Some("test-identity".to_string()),
        Duration::from_secs(5),
    )
    .unwrap()
    .with_max_retries(0);

    let session = Session::new(Arc::new(client), Duration::from_secs(30))
        .with_caller(Some(TEST_PRINCIPAL.to_string()));

    default_handlers(session)
}

/// Answer `rpc_method` with `body`.
pub async fn mock_rpc(mock_server: &MockServer, rpc_method: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(format!("/rpc/{}", rpc_method)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}
