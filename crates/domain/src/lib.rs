//! # Fanella Domain
//!
//! Resource model and shared types for the Fanella client.
//!
//! This crate contains:
//! - The base resource shape and the hydration protocol
//! - Capability facets (ownership, archival, background task)
//! - Source documents and their creation input
//! - Credentials, grant types and token pairs
//! - Configuration structures, constants and domain errors
//!
//! ## Architecture
//! - No dependencies on other Fanella crates
//! - No I/O: network and file access live in `fanella-infra`

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
