//! Client constants
//!
//! Wire paths and defaults shared by the infrastructure and facade crates.

// Service location
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("fanella-rs/", env!("CARGO_PKG_VERSION"));

// Auth endpoint (bootstrap call, never carries a bearer header)
pub const AUTH_TOKEN_PATH: &str = "/auth/token/";

// Listing defaults
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_ROWS: u32 = 10;
pub const LIST_ENVELOPE_FIELD: &str = "data";

// Collection paths
pub const SOURCES_PATH: &str = "/sources";
