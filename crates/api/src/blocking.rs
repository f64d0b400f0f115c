//! Synchronous facade
//!
//! Every call drives a private current-thread runtime to completion. Do not
//! use this module from inside an async context; use [`crate::Client`]
//! there instead.

use std::sync::Arc;

use fanella_domain::{ClientConfig, Credentials, FanellaConfig, NewSource, Resource, Source};
use fanella_infra::api::{ApiError, PageQuery, Pages, ResourceClient};
use futures::StreamExt;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

/// Blocking counterpart of [`crate::Client`]
#[derive(Clone)]
pub struct Client {
    inner: crate::Client,
    runtime: Arc<Runtime>,
}

impl Client {
    /// Build the client and authenticate before returning.
    pub fn connect(config: ClientConfig, credentials: Credentials) -> Result<Self, ApiError> {
        let runtime = Arc::new(new_runtime()?);
        let inner = runtime.block_on(crate::Client::connect(config, credentials))?;
        Ok(Self { inner, runtime })
    }

    pub fn guest(config: ClientConfig) -> Result<Self, ApiError> {
        Self::connect(config, Credentials::guest())
    }

    pub fn from_config(config: FanellaConfig) -> Result<Self, ApiError> {
        Self::connect(config.client, config.credentials)
    }

    /// The async client this facade drives
    pub fn as_async(&self) -> &crate::Client {
        &self.inner
    }

    pub fn sources(&self) -> Collection<Source> {
        self.resource::<Source>()
    }

    pub fn resource<R: Resource>(&self) -> Collection<R> {
        Collection { inner: self.inner.resource::<R>(), runtime: self.runtime.clone() }
    }
}

/// Blocking handle on one resource collection
pub struct Collection<R> {
    inner: ResourceClient<R>,
    runtime: Arc<Runtime>,
}

impl<R: Resource> Collection<R> {
    pub fn get(&self, id: i64) -> Result<R, ApiError> {
        self.runtime.block_on(self.inner.get(id))
    }

    pub fn update(&self, id: i64, patch: &Value) -> Result<R, ApiError> {
        self.runtime.block_on(self.inner.update(id, patch))
    }

    pub fn delete(&self, id: i64) -> Result<Value, ApiError> {
        self.runtime.block_on(self.inner.delete(id))
    }

    /// Lazy iterator over pages; each `next()` fetches at most one page.
    pub fn pages(&self, query: PageQuery) -> PageIter<R> {
        PageIter { stream: self.inner.pages(query), runtime: self.runtime.clone() }
    }

    pub fn collect_all(&self, query: PageQuery) -> Result<Vec<R>, ApiError> {
        self.runtime.block_on(self.inner.collect_all(query))
    }
}

impl Collection<Source> {
    pub fn create(&self, source: NewSource) -> Result<Source, ApiError> {
        self.runtime.block_on(self.inner.create(source))
    }
}

/// Iterator returned by [`Collection::pages`]
pub struct PageIter<R> {
    stream: Pages<R>,
    runtime: Arc<Runtime>,
}

impl<R> Iterator for PageIter<R> {
    type Item = Result<Vec<R>, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.runtime.block_on(self.stream.next())
    }
}

fn new_runtime() -> Result<Runtime, ApiError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ApiError::Config(format!("Failed to start runtime: {}", e)))
}
