//! Lazy page-by-page listing
//!
//! [`pages`] yields one `Vec<R>` per non-empty page and stops at the first
//! empty one. Each page is requested only when the stream is polled for it.

use std::marker::PhantomData;

use fanella_domain::constants::{DEFAULT_PAGE, DEFAULT_ROWS};
use fanella_domain::{hydrate_value, Resource};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use tracing::debug;

use super::endpoint::Endpoint;
use super::errors::ApiError;

/// Stream of hydrated pages
pub type Pages<R> = BoxStream<'static, Result<Vec<R>, ApiError>>;

/// Where listing starts and how many rows each page holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub rows: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, rows: DEFAULT_ROWS }
    }
}

impl PageQuery {
    pub fn new(page: u32, rows: u32) -> Self {
        Self { page, rows }
    }

    /// Default row count, starting at `page`
    pub fn starting_at(page: u32) -> Self {
        Self { page, ..Self::default() }
    }
}

enum Cursor<R> {
    Next { endpoint: Endpoint, query: PageQuery },
    Done(PhantomData<fn() -> R>),
}

/// List `endpoint` from `query.page` onwards.
///
/// An error ends the stream after being yielded once.
pub fn pages<R: Resource>(endpoint: Endpoint, query: PageQuery) -> Pages<R> {
    let start = Cursor::<R>::Next { endpoint, query };

    stream::try_unfold(start, |cursor| async move {
        let (endpoint, query) = match cursor {
            Cursor::Next { endpoint, query } => (endpoint, query),
            Cursor::Done(_) => return Ok::<_, ApiError>(None),
        };

        let raw = endpoint.list(query.page, query.rows).await?;
        if raw.is_empty() {
            debug!(path = endpoint.path(), page = query.page, "reached empty page");
            return Ok(None);
        }

        let items = raw
            .into_iter()
            .map(|value| hydrate_value::<R>(value).map_err(ApiError::from))
            .collect::<Result<Vec<R>, ApiError>>()?;
        debug!(path = endpoint.path(), page = query.page, count = items.len(), "fetched page");

        let next = match query.page.checked_add(1) {
            Some(page) => Cursor::Next { endpoint, query: PageQuery { page, ..query } },
            None => Cursor::Done(PhantomData),
        };
        Ok(Some((items, next)))
    })
    .boxed()
}

/// Drain every page into one vector.
pub async fn collect_all<R: Resource>(endpoint: Endpoint, query: PageQuery) -> Result<Vec<R>, ApiError> {
    pages::<R>(endpoint, query).try_concat().await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use fanella_domain::ResourceMeta;
    use serde::Deserialize;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::auth::AccessTokenProvider;
    use crate::http::HttpClient;

    #[derive(Debug, Deserialize)]
    struct Widget {
        #[serde(flatten)]
        meta: ResourceMeta,
    }

    impl Resource for Widget {
        const PATH: &'static str = "/widgets";

        fn meta(&self) -> &ResourceMeta {
            &self.meta
        }
    }

    struct StaticToken;

    #[async_trait]
    impl AccessTokenProvider for StaticToken {
        async fn access_token(&self) -> Result<String, ApiError> {
            Ok("token".to_string())
        }
    }

    fn endpoint(server: &MockServer) -> Endpoint {
        let http = Arc::new(HttpClient::new().unwrap());
        Endpoint::new(http, server.uri(), Widget::PATH, Arc::new(StaticToken))
    }

    async fn mount_page(server: &MockServer, page: u32, ids: &[i64]) {
        let data: Vec<_> = ids.iter().map(|id| json!({ "id": id })).collect();
        Mock::given(method("POST"))
            .and(path("/widgets/me"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_stops_at_first_empty_page() {
        let server = MockServer::start().await;
        mount_page(&server, 1, &[1, 2]).await;
        mount_page(&server, 2, &[3, 4]).await;
        mount_page(&server, 3, &[]).await;

        let pages: Vec<Vec<Widget>> =
            pages::<Widget>(endpoint(&server), PageQuery::default()).try_collect().await.unwrap();

        assert_eq!(pages.len(), 2);
        let ids: Vec<i64> = pages.iter().flatten().map(|w| w.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_start_page_is_honoured() {
        let server = MockServer::start().await;
        mount_page(&server, 5, &[50]).await;
        mount_page(&server, 6, &[]).await;

        let all = collect_all::<Widget>(endpoint(&server), PageQuery::starting_at(5)).await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), 50);
    }

    #[tokio::test]
    async fn test_pages_are_fetched_lazily() {
        let server = MockServer::start().await;
        mount_page(&server, 1, &[1]).await;
        Mock::given(method("POST"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(0)
            .mount(&server)
            .await;

        let mut stream = pages::<Widget>(endpoint(&server), PageQuery::default());
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn test_error_ends_the_stream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut stream = pages::<Widget>(endpoint(&server), PageQuery::default());
        assert!(matches!(stream.next().await, Some(Err(ApiError::Service { status: 500 }))));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_item_is_a_hydration_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "name": "no id" }] })),
            )
            .mount(&server)
            .await;

        let err = collect_all::<Widget>(endpoint(&server), PageQuery::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Domain(_)));
    }
}
