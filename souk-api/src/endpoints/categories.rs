use crate::client::Client;
use crate::endpoints::ensure_array;
use crate::error::ApiError;
use crate::request::{ApiRequest, FormParts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent: Option<i64>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

pub struct CategoryEndpoints<'a> {
    pub(crate) client: &'a Client,
}

impl CategoryEndpoints<'_> {
    pub async fn list(&self, token: &str) -> Result<Vec<Category>, ApiError> {
        let value: Value = self
            .client
            .send(ApiRequest::get("/categories/").token(token))
            .await?;
        ensure_array(value)
    }

    pub async fn get(&self, id: i64, token: &str) -> Result<Category, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/categories/{}/", id)).token(token))
            .await
    }

    /// Create a category. The form carries name/description/parent plus an
    /// optional icon file, so this goes out as multipart.
    pub async fn create(&self, form: FormParts, token: &str) -> Result<Category, ApiError> {
        self.client
            .send(
                ApiRequest::post("/categories/create/")
                    .multipart(form)
                    .token(token),
            )
            .await
    }

    pub async fn update(
        &self,
        id: i64,
        form: FormParts,
        token: &str,
    ) -> Result<Category, ApiError> {
        self.client
            .send(
                ApiRequest::put(format!("/categories/{}/update/", id))
                    .multipart(form)
                    .token(token),
            )
            .await
    }

    pub async fn delete(&self, id: i64, token: &str) -> Result<(), ApiError> {
        self.client
            .send::<Value>(ApiRequest::delete(format!("/categories/{}/delete/", id)).token(token))
            .await?;
        Ok(())
    }
}
