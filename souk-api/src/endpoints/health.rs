use crate::client::Client;
use crate::error::ApiError;
use crate::request::ApiRequest;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

pub struct HealthEndpoints<'a> {
    pub(crate) client: &'a Client,
}

impl HealthEndpoints<'_> {
    /// Reachability probe. Single attempt; any failure collapses to one
    /// connectivity message since the caller only shows up/down.
    pub async fn check(&self) -> Result<HealthStatus, ApiError> {
        self.client
            .send(ApiRequest::get("/health/").retries(1u32))
            .await
            .map_err(|_| ApiError::Request("Unable to connect to server".into()))
    }
}
