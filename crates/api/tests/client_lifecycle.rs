//! Integration tests for the client lifecycle
//!
//! Tests verify that a client authenticates once on connect, shares its token
//! across collections, and that the blocking facade drives the same flows.

use std::io::Write;

use fanella::{blocking, ApiError, Client, ClientConfig, Credentials, NewSource, PageQuery};
use futures::TryStreamExt;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_token(server: &MockServer, grant: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/token/"))
        .and(body_string_contains(format!("grant_type={}", grant)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test_token",
            "refresh_token": "test_refresh_token"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_listing(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/sources/me"))
        .and(query_param("page", "1"))
        .and(header("authorization", "Bearer test_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 1, "name": "first" }, { "id": 2, "name": "second" }]
        })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sources/me"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_connect_authenticates_eagerly() {
    let server = MockServer::start().await;
    mount_token(&server, "client_credentials", 1).await;

    let client = Client::connect(
        ClientConfig::with_base_url(server.uri()),
        Credentials::new("app", "secret"),
    )
    .await
    .expect("client should connect");

    assert!(client.authenticator().is_authenticated().await);
    assert_eq!(server.received_requests().await.map(|r| r.len()), Some(1));
}

#[tokio::test]
async fn test_connect_surfaces_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "invalid client secret" })),
        )
        .mount(&server)
        .await;

    let err = Client::connect(ClientConfig::with_base_url(server.uri()), Credentials::new("a", "b"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Caller { status: 401, .. }));
    assert!(err.to_string().contains("invalid client secret"));
}

#[tokio::test]
async fn test_collections_reuse_the_connect_token() {
    let server = MockServer::start().await;
    mount_token(&server, "guest", 1).await;
    mount_listing(&server).await;

    let client = Client::guest(ClientConfig::with_base_url(server.uri())).await.unwrap();

    let first: Vec<_> = client.sources().pages(PageQuery::default()).try_collect().await.unwrap();
    let again = client.sources().collect_all(PageQuery::default()).await.unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(again.len(), 2);
}

#[test]
fn test_blocking_client_uploads_and_lists() {
    let mock_runtime = tokio::runtime::Runtime::new().unwrap();
    let server = mock_runtime.block_on(async {
        let server = MockServer::start().await;
        mount_token(&server, "guest", 1).await;
        mount_listing(&server).await;
        Mock::given(method("POST"))
            .and(path("/sources"))
            .and(body_string_contains("Test file content"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 3 })))
            .expect(1)
            .mount(&server)
            .await;
        server
    });

    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"Test file content").unwrap();

    let client = blocking::Client::guest(ClientConfig::with_base_url(server.uri())).unwrap();
    let sources = client.sources();

    let created = sources.create(NewSource::file(file.path()).unwrap()).unwrap();
    assert_eq!(created.meta.id, 3);

    let pages: Vec<_> = sources.pages(PageQuery::default()).collect::<Result<_, _>>().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0][1].name, "second");

    mock_runtime.block_on(async move { drop(server) });
}
