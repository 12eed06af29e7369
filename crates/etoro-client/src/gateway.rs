//! Gateway client: one authenticated HTTP exchange per call, classified.
//!
//! The client builds headers (content type, correlation id, optional keys),
//! sends the request to `base_url + path`, reads the full body as text and
//! only then branches on status:
//!
//! - non-2xx: [`ClientError::Api`] carrying the JSON-decoded body, or the raw
//!   text when it is not JSON
//! - 2xx with an empty body: [`ResponseBody::Empty`]
//! - 2xx otherwise: [`ResponseBody::Json`], or [`ResponseBody::Text`] for
//!   endpoints that answer in plain text
//!
//! Transport failures surface as [`ClientError::Http`]. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ClientConfig, Credentials, TradingMode};
use crate::error::{ClientError, ClientResult};
use crate::request_id::{RequestIdGenerator, UuidRequestIds};

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const API_KEY_HEADER: &str = "x-api-key";
pub const USER_KEY_HEADER: &str = "x-user-key";

/// Placeholder for verbs called without a body.
pub const NO_BODY: Option<&()> = None;

/// A classified response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The body parsed as JSON.
    Json(Value),
    /// The body was not JSON; kept verbatim.
    Text(String),
    /// The body was empty.
    Empty,
}

impl ResponseBody {
    /// Best-effort decode: JSON when it parses, the raw text otherwise.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Collapse into a JSON value: text becomes a string, empty becomes null.
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
            Self::Empty => Value::Null,
        }
    }

    /// Deserialize a JSON body into an upstream shape.
    ///
    /// `what` names the resource for the error message.
    pub fn decode<T: DeserializeOwned>(self, what: &str) -> ClientResult<T> {
        match self {
            Self::Json(value) => serde_json::from_value(value)
                .map_err(|e| ClientError::invalid_response(what, e.to_string())),
            Self::Text(_) => Err(ClientError::invalid_response(
                what,
                "expected a JSON body, got plain text",
            )),
            Self::Empty => Err(ClientError::invalid_response(
                what,
                "expected a JSON body, got an empty response",
            )),
        }
    }
}

impl Serialize for ResponseBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Json(value) => value.serialize(serializer),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Empty => serializer.serialize_none(),
        }
    }
}

/// Classify a received response. Pure; never touches the network.
pub fn classify_response(status: StatusCode, text: String) -> ClientResult<ResponseBody> {
    if !status.is_success() {
        return Err(ClientError::api_error(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            ResponseBody::from_text(text),
        ));
    }

    if text.is_empty() {
        return Ok(ResponseBody::Empty);
    }

    Ok(ResponseBody::from_text(text))
}

/// Per-call request options: JSON body and header overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub body: Option<Value>,
    /// Applied after the defaults, so these win on conflict.
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// Options carrying `body` serialized as JSON, if present.
    pub fn with_body<B: Serialize + ?Sized>(body: Option<&B>) -> ClientResult<Self> {
        let body = body.map(serde_json::to_value).transpose()?;
        Ok(Self {
            body,
            headers: HeaderMap::new(),
        })
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Authenticated client for the upstream REST API.
///
/// Cheap to clone; holds only immutable configuration and a pooled HTTP client.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    base_url: String,
    mode: TradingMode,
    credentials: Credentials,
    request_ids: Arc<dyn RequestIdGenerator>,
}

impl GatewayClient {
    /// Create a client with random UUID request ids.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        Self::with_request_ids(config, Arc::new(UuidRequestIds))
    }

    /// Create a client with an injected request id generator.
    pub fn with_request_ids(
        config: ClientConfig,
        request_ids: Arc<dyn RequestIdGenerator>,
    ) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            mode: config.mode,
            credentials: config.credentials,
            request_ids,
        })
    }

    pub fn mode(&self) -> TradingMode {
        self.mode
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Trading execution path for the configured mode.
    pub fn execution_path(&self, sub_path: &str) -> String {
        self.mode.execution_path(sub_path)
    }

    /// Trading info path for the configured mode.
    pub fn info_path(&self, sub_path: &str) -> String {
        self.mode.info_path(sub_path)
    }

    fn default_headers(&self, request_id: &str) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(REQUEST_ID_HEADER),
            header_value(request_id, REQUEST_ID_HEADER)?,
        );
        // Upstream reads the user key from `x-api-key` and the API key from
        // `x-user-key`.
        if let Some(key) = self.credentials.user_key() {
            headers.insert(
                HeaderName::from_static(API_KEY_HEADER),
                header_value(key, API_KEY_HEADER)?,
            );
        }
        if let Some(key) = self.credentials.api_key() {
            headers.insert(
                HeaderName::from_static(USER_KEY_HEADER),
                header_value(key, USER_KEY_HEADER)?,
            );
        }
        Ok(headers)
    }

    /// Execute one exchange against `base_url + path` and classify it.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<ResponseBody> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = self.request_ids.next_id();

        let mut headers = self.default_headers(&request_id)?;
        for (name, value) in &options.headers {
            headers.insert(name.clone(), value.clone());
        }

        debug!(%method, %url, %request_id, "Sending request");

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let result = classify_response(status, text);
        match &result {
            Ok(_) => debug!(%method, %url, %request_id, status = status.as_u16(), "Request succeeded"),
            Err(e) => warn!(%method, %url, %request_id, error = %e, "Request failed"),
        }
        result
    }

    pub async fn get(&self, path: &str) -> ClientResult<ResponseBody> {
        self.request(Method::GET, path, RequestOptions::default())
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<ResponseBody> {
        self.request(Method::POST, path, RequestOptions::with_body(body)?)
            .await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<ResponseBody> {
        self.request(Method::PUT, path, RequestOptions::with_body(body)?)
            .await
    }

    /// DELETE with an optional body (item removal sends an array payload).
    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<ResponseBody> {
        self.request(Method::DELETE, path, RequestOptions::with_body(body)?)
            .await
    }
}

fn header_value(value: &str, header: &str) -> ClientResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        ClientError::config_error(format!(
            "Value for {header} contains characters not allowed in an HTTP header"
        ))
    })
}
