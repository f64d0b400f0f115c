//! Fanella API client
//!
//! This module provides the HTTP-based client for the Fanella service. It
//! handles authentication, single endpoint calls, resource hydration and
//! paginated listing.
//!
//! # Architecture
//!
//! - One [`Authenticator`] per client; its token is shared by every endpoint
//! - [`Endpoint`] performs exactly one request per call, no retries
//! - [`ResourceClient`] hydrates replies into typed resources
//! - [`pages`] exposes listing as a lazy, restartable stream

pub mod auth;
pub mod endpoint;
pub mod errors;
pub mod pagination;
pub mod resources;
pub mod sources;

pub use auth::{AccessTokenProvider, Authenticator};
pub use endpoint::{Endpoint, RequestBody};
pub use errors::{ApiError, ApiErrorCategory};
pub use pagination::{collect_all, pages, PageQuery, Pages};
pub use resources::ResourceClient;
pub use sources::{content_type_for, read_file, Sources};
