//! # Fanella Infrastructure
//!
//! I/O side of the Fanella client.
//!
//! This crate contains:
//! - The shared HTTP client (reqwest)
//! - Token authentication and the endpoint caller
//! - Typed resource collections, source upload and paginated listing
//! - Configuration loading from environment and files
//!
//! ## Architecture
//! - Builds on the types and errors in `fanella-domain`
//! - Contains all "impure" code (network, file system, environment)

pub mod api;
pub mod config;
pub mod http;

// Re-export commonly used items
pub use api::{
    AccessTokenProvider, ApiError, ApiErrorCategory, Authenticator, Endpoint, PageQuery, Pages,
    ResourceClient, Sources,
};
pub use http::{HttpClient, HttpClientBuilder};
