//! Authentication types
//!
//! Credentials supplied by the caller and the token pair issued by the
//! service's `/auth/token/` endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::impl_wire_label_conversions;

/// Authentication strategy sent as `grant_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Anonymous access, used when no credentials are configured
    Guest,
    /// Machine-to-machine access with a client id and secret
    ClientCredentials,
}

impl_wire_label_conversions!(GrantType {
    Guest => "guest",
    ClientCredentials => "client_credentials",
});

/// Client credentials. Both fields empty means guest access.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into() }
    }

    /// Credentials that select the guest grant.
    pub fn guest() -> Self {
        Self::default()
    }

    /// `ClientCredentials` only when both the id and the secret are set.
    pub fn grant_type(&self) -> GrantType {
        if !self.client_id.is_empty() && !self.client_secret.is_empty() {
            GrantType::ClientCredentials
        } else {
            GrantType::Guest
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Access and refresh tokens returned by the auth endpoint.
///
/// Fields are bound by name, so the order the server emits them in does not
/// matter.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}
