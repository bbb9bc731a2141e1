//! Mock provider helpers
//!
//! Wraps wiremock so tests can point one or more providers at a local mock
//! server through ordinary configuration overrides.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Address that refuses connections, for unreachable-provider tests
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Mount a JSON responder on `POST <route>` that must be hit `times` times
pub async fn mock_post_json(
    server: &MockServer,
    route: &str,
    status: u16,
    body: serde_json::Value,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Mount a catch-all responder that fails the test if anything calls it
pub async fn forbid_any_call(server: &MockServer) {
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
