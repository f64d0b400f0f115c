//! API authentication with the token grant
//!
//! Exchanges client credentials (or nothing, for a guest) for an access and
//! refresh token pair. The pair is fetched at most once per authenticator and
//! reused for every later call.

use std::sync::Arc;

use async_trait::async_trait;
use fanella_domain::constants::AUTH_TOKEN_PATH;
use fanella_domain::{Credentials, GrantType, TokenSet};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::endpoint::{Endpoint, RequestBody};
use super::errors::ApiError;
use crate::http::HttpClient;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token, authenticating first if needed.
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Obtains and memoizes the token pair for one set of credentials
pub struct Authenticator {
    endpoint: Endpoint,
    credentials: Credentials,
    tokens: Mutex<Option<TokenSet>>,
}

impl Authenticator {
    pub fn new(http: Arc<HttpClient>, base_url: impl AsRef<str>, credentials: Credentials) -> Self {
        Self {
            endpoint: Endpoint::unauthenticated(http, base_url, AUTH_TOKEN_PATH),
            credentials,
            tokens: Mutex::new(None),
        }
    }

    pub fn grant_type(&self) -> GrantType {
        self.credentials.grant_type()
    }

    /// Return the cached token pair, requesting one on first use.
    ///
    /// Concurrent callers wait on the same lock, so at most one token
    /// request is in flight. A failed request leaves the cache empty.
    ///
    /// # Errors
    /// Any error from the token endpoint, including `Decode` when either
    /// token field is missing.
    pub async fn authenticate(&self) -> Result<TokenSet, ApiError> {
        let mut tokens = self.tokens.lock().await;
        if let Some(existing) = tokens.as_ref() {
            debug!("reusing cached access token");
            return Ok(existing.clone());
        }

        let grant_type = self.grant_type();
        if grant_type == GrantType::Guest {
            warn!("client id or secret missing, authenticating as guest");
        }

        let form = vec![
            ("grant_type".to_string(), grant_type.to_string()),
            ("client_id".to_string(), self.credentials.client_id.clone()),
            ("client_secret".to_string(), self.credentials.client_secret.clone()),
        ];
        let fresh: TokenSet = self.endpoint.create(RequestBody::Form(form)).await?;

        info!(grant_type = %grant_type, "authenticated");
        *tokens = Some(fresh.clone());
        Ok(fresh)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.lock().await.is_some()
    }

    /// Refresh token from the last successful grant, if any
    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens.lock().await.as_ref().map(|t| t.refresh_token.clone())
    }

    /// Drop the cached pair; the next call re-authenticates.
    pub async fn reset(&self) {
        *self.tokens.lock().await = None;
    }
}

#[async_trait]
impl AccessTokenProvider for Authenticator {
    async fn access_token(&self) -> Result<String, ApiError> {
        Ok(self.authenticate().await?.access_token)
    }
}
