pub mod analytics;
pub mod auth;
pub mod categories;
pub mod health;
pub mod products;
pub mod reports;
pub mod users;
pub mod videos;

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paginated list envelope used by several list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: i64,
    #[serde(default)]
    pub active_count: Option<i64>,
    #[serde(default)]
    pub inactive_count: Option<i64>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    pub results: Vec<T>,
}

/// Some list endpoints hand back a non-array body on edge cases (empty
/// result sets, permission-filtered views). Coerce those to an empty vec
/// instead of failing the whole call.
pub(crate) fn ensure_array<T>(value: Value) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
{
    if value.is_array() {
        serde_json::from_value(value).map_err(|_| ApiError::InvalidResponse)
    } else {
        Ok(Vec::new())
    }
}
