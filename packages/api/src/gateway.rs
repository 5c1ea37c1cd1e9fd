//! # Auth gateway: every backend request goes through here
//!
//! [`AuthGateway::send`] attaches the session's bearer token, hands the request
//! to a [`Transport`], and turns the outcome into a typed result:
//!
//! | Outcome | Result | Session |
//! |---------|--------|---------|
//! | no response (timeout, refused, TLS, ...) | [`ApiError::Network`] | untouched |
//! | credentialed request, session changed meanwhile | [`ApiError::SessionChanged`] | untouched (response discarded) |
//! | 2xx | `Ok(ApiResponse)` | untouched |
//! | 401 on a credentialed request | [`ApiError::AuthExpired`] | ended via [`SessionStore::expire`] |
//! | 401 without credential (bad password) | [`ApiError::Rejected`] | untouched |
//! | 403 | [`ApiError::PermissionDenied`] | untouched |
//! | 5xx | [`ApiError::Server`] | untouched |
//! | other | [`ApiError::Rejected`] | untouched |
//!
//! The gateway is the only component that ends a session as a side effect of a
//! failed request. It never navigates: the redirect to the login page is done
//! by [`crate::routes::Redirector`], which watches the session store.
//!
//! [`Transport`] is the seam for the actual HTTP work. [`HttpTransport`] uses
//! `reqwest` on both native and wasm targets; tests script their own.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use store::{ApiConfig, KeyValueStore};

use crate::error::{ApiError, TransportError};
use crate::session::{Auth, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// A file sent as one multipart form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// An image under the `image` field, as the upload endpoint expects.
    pub fn image(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: "image".to_string(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(FilePart),
}

/// An outbound request, relative to the configured backend origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub auth: Auth,
    /// Filled in by the gateway; never set by callers.
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            auth: Auth::default(),
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, part: FilePart) -> Self {
        self.body = RequestBody::Multipart(part);
        self
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Status and raw body of a backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The backend's `{ "message": ... }`, or a generic description.
    pub fn message(&self) -> String {
        serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", self.status))
    }

    /// Decode the body. A body that does not match is a server fault.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Server {
            status: self.status,
            message: format!("malformed response body: {e}"),
        })
    }
}

/// Async trait for sending requests to the backend.
pub trait Transport {
    fn execute(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>>;
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::timeout(e.to_string())
        } else {
            TransportError::new(e.to_string())
        }
    }
}

/// `reqwest`-backed transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let builder = reqwest::Client::builder();
        // The browser owns timeouts on wasm.
        #[cfg(not(target_arch = "wasm32"))]
        let builder = if config.timeout_secs > 0 {
            builder.timeout(std::time::Duration::from_secs(config.timeout_secs))
        } else {
            builder
        };
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };
        let mut builder = self.client.request(method, self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(part) => {
                let file = reqwest::multipart::Part::bytes(part.bytes)
                    .file_name(part.file_name)
                    .mime_str(&part.mime)?;
                builder.multipart(reqwest::multipart::Form::new().part(part.field, file))
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(ApiResponse { status, body })
    }
}

/// Wraps a transport with the session's credentials and failure policy.
pub struct AuthGateway<T, S: KeyValueStore> {
    transport: T,
    session: SessionStore<S>,
}

impl<T: Clone, S: KeyValueStore> Clone for AuthGateway<T, S> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            session: self.session.clone(),
        }
    }
}

impl<T, S: KeyValueStore> AuthGateway<T, S> {
    pub fn new(transport: T, session: SessionStore<S>) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }
}

impl<T: Transport, S: KeyValueStore> AuthGateway<T, S> {
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let credential = self.session.credential(request.auth);
        let credentialed = credential.token.is_some();
        request.bearer = credential.token;

        let method = request.method;
        let path = request.path.clone();
        tracing::debug!(?method, %path, credentialed, "sending request");

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(?method, %path, error = %e, timeout = e.timeout, "no response from backend");
                return Err(ApiError::Network(e));
            }
        };

        if credentialed && !self.session.is_current(credential.generation) {
            tracing::debug!(?method, %path, status = response.status, "discarding response for a previous session");
            return Err(ApiError::SessionChanged);
        }

        match response.status {
            200..=299 => Ok(response),
            401 if credentialed => {
                if self.session.expire(credential.generation) {
                    tracing::info!(%path, "backend rejected the session token");
                }
                Err(ApiError::AuthExpired)
            }
            403 => Err(ApiError::PermissionDenied(response.message())),
            status @ 500..=599 => {
                let message = response.message();
                tracing::warn!(?method, %path, status, %message, "server error");
                Err(ApiError::Server { status, message })
            }
            status => Err(ApiError::Rejected {
                status,
                message: response.message(),
            }),
        }
    }
}
