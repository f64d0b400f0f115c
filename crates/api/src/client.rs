//! Client context - wires the HTTP client, authenticator and collections

use std::sync::Arc;

use fanella_domain::{ClientConfig, Credentials, FanellaConfig, Resource};
use fanella_infra::api::{ApiError, Authenticator, ResourceClient, Sources};
use fanella_infra::{AccessTokenProvider, HttpClient};
use tracing::info;

/// Authenticated entry point to the Fanella service.
///
/// Cloning is cheap; clones share the connection pool and the token.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    http: Arc<HttpClient>,
    auth: Arc<Authenticator>,
}

impl Client {
    /// Build the client and authenticate before returning.
    ///
    /// # Errors
    /// Returns the token endpoint's error if authentication fails, or
    /// `ApiError::Config` if the HTTP client cannot be built.
    pub async fn connect(config: ClientConfig, credentials: Credentials) -> Result<Self, ApiError> {
        let client = Self::unauthenticated(config, credentials)?;
        client.auth.authenticate().await?;
        info!(base_url = %client.config.base_url, grant_type = %client.auth.grant_type(), "connected");
        Ok(client)
    }

    /// [`Client::connect`] with the guest grant.
    pub async fn guest(config: ClientConfig) -> Result<Self, ApiError> {
        Self::connect(config, Credentials::guest()).await
    }

    /// [`Client::connect`] from a loaded [`FanellaConfig`].
    pub async fn from_config(config: FanellaConfig) -> Result<Self, ApiError> {
        Self::connect(config.client, config.credentials).await
    }

    /// Build without contacting the service; the first call authenticates.
    pub fn unauthenticated(config: ClientConfig, credentials: Credentials) -> Result<Self, ApiError> {
        let http = Arc::new(HttpClient::from_config(&config)?);
        let auth = Arc::new(Authenticator::new(http.clone(), &config.base_url, credentials));
        Ok(Self { config, http, auth })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn authenticator(&self) -> &Arc<Authenticator> {
        &self.auth
    }

    /// The `/sources` collection
    pub fn sources(&self) -> Sources {
        self.resource::<fanella_domain::Source>()
    }

    /// Collection for any resource type, sharing this client's token
    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        let auth: Arc<dyn AccessTokenProvider> = self.auth.clone();
        ResourceClient::bind(self.http.clone(), &self.config.base_url, auth)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url)
            .field("grant_type", &self.auth.grant_type())
            .finish()
    }
}
