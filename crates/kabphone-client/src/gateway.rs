//! The single HTTP gateway to the backend REST API.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use kabphone_auth::SessionStore;
use kabphone_core::config::ApiConfig;
use kabphone_core::error::{AppError, ErrorKind, GENERIC_SERVER_MESSAGE};
use kabphone_core::result::AppResult;
use kabphone_core::types::ErrorBody;

use crate::policy::UnauthorizedPolicy;

/// Method and path of a request, as handed to the 401 policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// HTTP method.
    pub method: String,
    /// Path relative to the API base.
    pub path: String,
}

impl RequestInfo {
    /// Describe a request.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

/// Issues every backend call.
///
/// Attaches `Authorization: Bearer <token>` whenever the session holds a
/// token, runs the registered [`UnauthorizedPolicy`] once for each 401, and
/// turns every other failure into an [`AppError`] the caller can display.
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    policy: Arc<dyn UnauthorizedPolicy>,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url)
            .field("policy", &self.policy)
            .finish()
    }
}

impl Gateway {
    /// Create a gateway from configuration.
    pub fn new(
        config: &ApiConfig,
        session: Arc<SessionStore>,
        policy: Arc<dyn UnauthorizedPolicy>,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            policy,
        })
    }

    /// The API base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session whose token is attached to requests.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Issue `method path` with an optional JSON body and extra headers, and
    /// parse the 2xx response body as `T`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        extra_headers: &[(&str, &str)],
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = self.builder(method.clone(), path);
        for (name, value) in extra_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| AppError::with_source(ErrorKind::Validation, "Invalid header name", e))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| AppError::with_source(ErrorKind::Validation, "Invalid header value", e))?;
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(RequestInfo::new(method.as_str(), path), builder)
            .await
    }

    /// `GET path`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.request::<T, Value>(Method::GET, path, None, &[]).await
    }

    /// `GET path?query`.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.builder(Method::GET, path).query(query);
        self.execute(RequestInfo::new("GET", path), builder).await
    }

    /// `POST path` with a JSON body.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), &[]).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body), &[]).await
    }

    /// `PATCH path` with a JSON body.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, Some(body), &[]).await
    }

    /// `DELETE path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.request::<T, Value>(Method::DELETE, path, None, &[]).await
    }

    /// Send a multipart form body.
    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> AppResult<T> {
        let builder = self.builder(method.clone(), path).multipart(form);
        self.execute(RequestInfo::new(method.as_str(), path), builder)
            .await
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.http.request(method, url);
        match self.session.get_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        info: RequestInfo,
        builder: RequestBuilder,
    ) -> AppResult<T> {
        debug!(method = %info.method, path = %info.path, "Sending request");
        let response = builder.send().await.map_err(|e| {
            warn!(method = %info.method, path = %info.path, error = %e, "No response from server");
            AppError::network_unavailable(e)
        })?;
        self.handle(info, response).await
    }

    async fn handle<T: DeserializeOwned>(&self, info: RequestInfo, response: Response) -> AppResult<T> {
        let status = response.status();
        debug!(method = %info.method, path = %info.path, status = status.as_u16(), "Received response");

        if status == StatusCode::UNAUTHORIZED {
            self.policy.on_unauthorized(&info);
            let body = response.text().await.unwrap_or_default();
            let message = server_message(&body).unwrap_or_else(|| "Unauthorized".to_string());
            return Err(AppError::unauthorized(message));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = server_message(&body)
                .unwrap_or_else(|| format!("{GENERIC_SERVER_MESSAGE} with status {}", status.as_u16()));
            return Err(AppError::server(status.as_u16(), message));
        }

        let body = response
            .text()
            .await
            .map_err(AppError::network_unavailable)?;

        let value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!("Unexpected response from {} {}", info.method, info.path),
                    e,
                )
            })?
        };
        serde_json::from_value(value).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Unexpected response from {} {}", info.method, info.path),
                e,
            )
        })
    }
}

/// The `message` field of an error body, when there is a non-empty one.
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}
