use std::sync::Arc;

use fanella_domain::Credentials;
use fanella_infra::{AccessTokenProvider, Authenticator, HttpClient, Sources};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GUEST_TOKEN: &str = "guest_token";
pub const GUEST_REFRESH_TOKEN: &str = "guest_refresh_token";

/// Mount the token endpoint, answering every grant with the guest pair.
pub async fn mount_guest_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": GUEST_TOKEN,
            "refresh_token": GUEST_REFRESH_TOKEN,
        })))
        .mount(server)
        .await;
}

/// Guest authenticator pointed at the mock server.
pub fn guest_authenticator(server: &MockServer) -> Arc<Authenticator> {
    let http = Arc::new(HttpClient::new().expect("http client should build"));
    Arc::new(Authenticator::new(http, server.uri(), Credentials::guest()))
}

/// `/sources` collection authenticated as guest against the mock server.
pub fn guest_sources(server: &MockServer) -> Sources {
    let http = Arc::new(HttpClient::new().expect("http client should build"));
    let auth: Arc<dyn AccessTokenProvider> =
        Arc::new(Authenticator::new(http.clone(), server.uri(), Credentials::guest()));
    Sources::bind(http, server.uri(), auth)
}
