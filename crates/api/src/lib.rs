//! # Fanella
//!
//! Client library for the Fanella data-management service.
//!
//! This crate contains:
//! - [`Client`], the async entry point (authenticate once, share the token)
//! - [`blocking::Client`], a synchronous facade over the same operations
//! - Logging setup used by the `fanella` binary
//!
//! ## Architecture
//! - Depends on `fanella-domain` (types, errors) and `fanella-infra` (I/O)
//! - Re-exports the types callers need so one dependency is enough
//!
//! ```no_run
//! # async fn run() -> Result<(), fanella::ApiError> {
//! use fanella::{Client, ClientConfig, NewSource, PageQuery};
//! use futures::TryStreamExt;
//!
//! let client = Client::guest(ClientConfig::with_base_url("http://localhost:8000/v1")).await?;
//! let source = client.sources().create(NewSource::text("hello")?).await?;
//! let pages: Vec<_> = client.sources().pages(PageQuery::default()).try_collect().await?;
//! # Ok(())
//! # }
//! ```

pub mod blocking;
pub mod client;
pub mod utils;

pub use client::Client;
pub use fanella_domain::{
    Archivable, BackgroundTasked, ClientConfig, Credentials, FanellaConfig, FanellaError,
    GrantType, NewSource, Owned, Owner, Resource, Source, SourceBuilder, TokenSet,
};
pub use fanella_infra::api::{ApiError, ApiErrorCategory, PageQuery, Pages, ResourceClient, Sources};
pub use fanella_infra::config;
