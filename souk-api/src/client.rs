use crate::endpoints::analytics::AnalyticsEndpoints;
use crate::endpoints::auth::AuthEndpoints;
use crate::endpoints::categories::CategoryEndpoints;
use crate::endpoints::health::HealthEndpoints;
use crate::endpoints::products::ProductEndpoints;
use crate::endpoints::reports::ReportEndpoints;
use crate::endpoints::users::UserEndpoints;
use crate::endpoints::videos::VideoEndpoints;
use crate::error::ApiError;
use crate::loading::LoadingTracker;
use crate::request::{ApiRequest, Body};
use crate::settings::Settings;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::sync::watch;
use tracing::warn;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const INITIAL_BACKOFF: Duration = Duration::from_millis(1000);

/// Client for the marketplace admin backend.
///
/// Wraps a `reqwest::Client` with a per-attempt timeout, retry with
/// exponential backoff, bearer-token attachment and normalized error
/// reporting. Endpoint groups (`users()`, `products()`, ...) build
/// [`ApiRequest`]s and funnel them through [`send`](Client::send).
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    loading: LoadingTracker,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            timeout,
            loading: LoadingTracker::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_timeout(
            settings.api.base_url.clone(),
            Duration::from_secs(settings.api.timeout_secs),
        )
    }

    /// Observable "anything in flight" signal for a loading indicator.
    /// True while at least one call (including its retries) is outstanding.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Execute a request with the retry policy and deserialize the JSON
    /// result. Responses without a usable body (204, DELETE, non-JSON
    /// content type, blank text) materialize `T` from an empty JSON object.
    pub async fn send<T>(&self, request: ApiRequest) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let _guard = self.loading.start();
        let retries = request.retries.max(1);
        let mut delay = INITIAL_BACKOFF;
        let mut attempt = 1;

        loop {
            match self.attempt(&request).await {
                Ok(value) => {
                    return serde_json::from_value(value).map_err(|_| ApiError::InvalidResponse);
                }
                Err(err) => {
                    if !err.is_retryable() || attempt >= retries {
                        return Err(err);
                    }
                    warn!(
                        attempt,
                        retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        path = %request.path,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
            }
        }
    }

    /// One attempt: build headers, issue the call under the timeout,
    /// normalize failures, apply the empty-body rules, parse JSON.
    async fn attempt(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .timeout(self.timeout);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let mut headers = request.headers.clone();
        if let Some(token) = &request.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                ApiError::Request("Authorization token contains invalid characters".into())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        match &request.body {
            Body::None => {}
            Body::Json(value) => {
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                }
                builder = builder.body(value.to_string());
            }
            Body::Raw(text) => {
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                }
                builder = builder.body(text.clone());
            }
            Body::Multipart(parts) => {
                builder = builder.multipart(parts.to_form()?);
            }
        }

        let response = builder.headers(headers).send().await.map_err(map_reqwest)?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &text));
        }

        // DELETE responses and 204s are empty by contract; don't touch the body.
        if request.method == Method::DELETE || status == StatusCode::NO_CONTENT {
            return Ok(empty_object());
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);
        if !is_json {
            return Ok(empty_object());
        }

        let text = response.text().await.map_err(map_reqwest)?;
        if text.trim().is_empty() {
            return Ok(empty_object());
        }

        serde_json::from_str(&text).map_err(|_| ApiError::InvalidResponse)
    }

    pub fn auth(&self) -> AuthEndpoints<'_> {
        AuthEndpoints { client: self }
    }

    pub fn health(&self) -> HealthEndpoints<'_> {
        HealthEndpoints { client: self }
    }

    pub fn users(&self) -> UserEndpoints<'_> {
        UserEndpoints { client: self }
    }

    pub fn categories(&self) -> CategoryEndpoints<'_> {
        CategoryEndpoints { client: self }
    }

    pub fn products(&self) -> ProductEndpoints<'_> {
        ProductEndpoints { client: self }
    }

    pub fn videos(&self) -> VideoEndpoints<'_> {
        VideoEndpoints { client: self }
    }

    pub fn reports(&self) -> ReportEndpoints<'_> {
        ReportEndpoints { client: self }
    }

    pub fn analytics(&self) -> AnalyticsEndpoints<'_> {
        AnalyticsEndpoints { client: self }
    }
}

fn map_reqwest(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err)
    }
}

/// Stand-in for responses with no body, mirroring an empty JSON object so
/// callers deserializing permissive types still succeed.
fn empty_object() -> Value {
    Value::Object(Map::new())
}
