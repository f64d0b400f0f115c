//! Typed operations on one resource collection
//!
//! [`ResourceClient<R>`] pairs an [`Endpoint`] with the resource type it
//! hydrates, so every read comes back as `R` rather than raw JSON.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use fanella_domain::{hydrate_value, Resource};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::auth::AccessTokenProvider;
use super::endpoint::Endpoint;
use super::errors::ApiError;
use super::pagination::{self, PageQuery, Pages};
use crate::http::HttpClient;

/// Client for the collection at `R::PATH`
pub struct ResourceClient<R> {
    endpoint: Endpoint,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self { endpoint: self.endpoint.clone(), _resource: PhantomData }
    }
}

impl<R> fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient").field("path", &self.endpoint.path()).finish()
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint, _resource: PhantomData }
    }

    /// Bind to `R::PATH` under `base_url`, authenticating through `auth`.
    pub fn bind(
        http: Arc<HttpClient>,
        base_url: impl AsRef<str>,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self::new(Endpoint::new(http, base_url, R::PATH, auth))
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Fetch one record by id.
    ///
    /// # Errors
    /// Returns `ApiError::Caller` for unknown ids and `ApiError::Domain` if
    /// the reply does not hydrate into `R`.
    #[instrument(skip(self), fields(path = R::PATH))]
    pub async fn get(&self, id: i64) -> Result<R, ApiError> {
        let raw: Value = self.endpoint.get(id).await?;
        Ok(hydrate_value(raw)?)
    }

    /// Send a partial update and hydrate the server's reply.
    #[instrument(skip(self, patch), fields(path = R::PATH))]
    pub async fn update<P>(&self, id: i64, patch: &P) -> Result<R, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let raw: Value = self.endpoint.update(id, patch).await?;
        debug!(id, "record updated");
        Ok(hydrate_value(raw)?)
    }

    /// Delete one record, returning the server's reply as-is.
    #[instrument(skip(self), fields(path = R::PATH))]
    pub async fn delete(&self, id: i64) -> Result<Value, ApiError> {
        let reply = self.endpoint.delete(id).await?;
        debug!(id, "record deleted");
        Ok(reply)
    }

    /// Lazy stream of pages starting at `query.page`
    pub fn pages(&self, query: PageQuery) -> Pages<R> {
        pagination::pages(self.endpoint.clone(), query)
    }

    /// Every record from `query.page` onwards
    pub async fn collect_all(&self, query: PageQuery) -> Result<Vec<R>, ApiError> {
        pagination::collect_all(self.endpoint.clone(), query).await
    }
}
