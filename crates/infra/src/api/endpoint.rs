//! Endpoint caller
//!
//! An [`Endpoint`] is bound to one collection path and issues single HTTP
//! calls against it. Responses are classified by `status / 100`:
//!
//! - 5xx → [`ApiError::Service`], body discarded
//! - 4xx → body logged, then [`ApiError::Caller`] with a message taken from
//!   the body
//! - anything else → body decoded as JSON
//!
//! Every convenience operation is sent as `POST`; the service routes on path
//! alone and expects this verb for reads and deletes too.

use std::sync::Arc;

use fanella_domain::constants::LIST_ENVELOPE_FIELD;
use reqwest::multipart::Form;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use crate::http::HttpClient;

const SERVER_ERROR_CLASS: u16 = 5;
const CLIENT_ERROR_CLASS: u16 = 4;

/// Body attached to a request
pub enum RequestBody {
    Empty,
    Json(Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    Multipart(Form),
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Json(_) => f.write_str("Json(..)"),
            Self::Form(fields) => f.debug_tuple("Form").field(&fields.len()).finish(),
            Self::Multipart(_) => f.write_str("Multipart(..)"),
        }
    }
}

/// HTTP caller bound to one collection path
#[derive(Clone)]
pub struct Endpoint {
    http: Arc<HttpClient>,
    base_url: Arc<str>,
    path: String,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl Endpoint {
    /// Endpoint that sends `Authorization: Bearer <token>` on every call.
    ///
    /// The token is resolved through `auth` at call time, not here.
    pub fn new(
        http: Arc<HttpClient>,
        base_url: impl AsRef<str>,
        path: impl Into<String>,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.as_ref().trim_end_matches('/')),
            path: path.into(),
            auth: Some(auth),
        }
    }

    /// Endpoint that never sends a bearer header (used to obtain tokens).
    pub fn unauthenticated(
        http: Arc<HttpClient>,
        base_url: impl AsRef<str>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.as_ref().trim_end_matches('/')),
            path: path.into(),
            auth: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn requires_auth(&self) -> bool {
        self.auth.is_some()
    }

    /// Fully-qualified URL of the collection plus `suffix`
    pub fn url(&self, suffix: &str) -> String {
        format!("{}{}{}", self.base_url, self.path, suffix)
    }

    /// Perform one request and decode the response body.
    ///
    /// # Errors
    /// - `ApiError::Service` for 5xx responses
    /// - `ApiError::Caller` for 4xx responses
    /// - `ApiError::Decode` if a successful body is not valid JSON for `T`
    /// - transport errors from the HTTP client or the token provider
    #[instrument(skip(self, body), fields(path = %self.path))]
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: RequestBody,
    ) -> Result<T, ApiError> {
        let mut request = self.http.request(method, url);

        if let Some(auth) = &self.auth {
            let token = auth.access_token().await?;
            request = request.bearer_auth(token);
        }

        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(json) => request.json(&json),
            RequestBody::Form(fields) => request.form(&fields),
            RequestBody::Multipart(form) => request.multipart(form),
        };

        let response = self.http.send(request).await?;
        let status = response.status().as_u16();

        match status / 100 {
            SERVER_ERROR_CLASS => {
                warn!(status, url, "service failed to handle request");
                Err(ApiError::Service { status })
            }
            CLIENT_ERROR_CLASS => {
                let body = Self::read_error_body(response).await;
                error!(status, url, body = %body, "request rejected by service");
                Err(ApiError::Caller { status, message: caller_message(&body) })
            }
            _ => {
                let text = response.text().await?;
                debug!(status, bytes = text.len(), "request successful");
                decode_body(&text)
            }
        }
    }

    /// `POST {base}{path}`
    pub async fn create<T: DeserializeOwned>(&self, body: RequestBody) -> Result<T, ApiError> {
        self.send(Method::POST, &self.url(""), body).await
    }

    /// `POST {base}{path}/{id}/` with a JSON body
    pub async fn update<T, B>(&self, id: i64, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let json = serde_json::to_value(body)
            .map_err(|e| ApiError::Config(format!("Failed to serialize body: {}", e)))?;
        self.send(Method::POST, &self.url(&format!("/{}/", id)), RequestBody::Json(json)).await
    }

    /// `POST {base}{path}/me?page={page}&rows={rows}`, returning the `data`
    /// array of the response envelope.
    pub async fn list(&self, page: u32, rows: u32) -> Result<Vec<Value>, ApiError> {
        let url = self.url(&format!("/me?page={}&rows={}", page, rows));
        let envelope: Value = self.send(Method::POST, &url, RequestBody::Empty).await?;
        unwrap_envelope(envelope)
    }

    /// `POST {base}{path}/{id}`
    pub async fn get<T: DeserializeOwned>(&self, id: i64) -> Result<T, ApiError> {
        self.send(Method::POST, &self.url(&format!("/{}", id)), RequestBody::Empty).await
    }

    /// `POST {base}{path}/{id}`; same wire call as [`Endpoint::get`]
    pub async fn delete<T: DeserializeOwned>(&self, id: i64) -> Result<T, ApiError> {
        self.send(Method::POST, &self.url(&format!("/{}", id)), RequestBody::Empty).await
    }

    async fn read_error_body(response: Response) -> Value {
        match response.text().await {
            Ok(text) if text.trim().is_empty() => Value::Null,
            Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
            Err(err) => Value::String(format!("<unreadable body: {}>", err)),
        }
    }
}

/// Decode a successful body. An empty body decodes as JSON `null`.
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    if text.trim().is_empty() {
        return serde_json::from_value(Value::Null).map_err(|_| {
            ApiError::Decode("empty response body cannot be decoded into the expected type".into())
        });
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

fn unwrap_envelope(envelope: Value) -> Result<Vec<Value>, ApiError> {
    match envelope {
        Value::Object(mut map) => match map.remove(LIST_ENVELOPE_FIELD) {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) => Ok(Vec::new()),
            Some(_) => Err(ApiError::Decode(format!("`{}` is not an array", LIST_ENVELOPE_FIELD))),
            None => Err(ApiError::Decode(format!("missing `{}` field", LIST_ENVELOPE_FIELD))),
        },
        _ => Err(ApiError::Decode("list response is not an object".into())),
    }
}

/// Human-readable projection of a 4xx body.
///
/// Prefers the `detail`, `error` or `message` field; falls back to the whole
/// body rendered as compact JSON.
fn caller_message(body: &Value) -> String {
    if let Value::Object(map) = body {
        for key in ["detail", "error", "message"] {
            match map.get(key) {
                Some(Value::String(text)) => return text.clone(),
                Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
    }
    match body {
        Value::String(text) => text.clone(),
        Value::Null => "no details provided".to_string(),
        other => other.to_string(),
    }
}
