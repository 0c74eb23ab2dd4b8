use crate::client::Client;
use crate::error::ApiError;
use crate::request::{ApiRequest, FormParts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Advertisement video shown in the marketplace app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertisementVideo {
    pub id: i64,
    pub title: String,
    pub video: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub uploaded_by: i64,
    #[serde(default)]
    pub uploaded_by_name: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

pub struct VideoEndpoints<'a> {
    pub(crate) client: &'a Client,
}

impl VideoEndpoints<'_> {
    pub async fn list(&self, token: &str) -> Result<Vec<AdvertisementVideo>, ApiError> {
        self.client
            .send(ApiRequest::get("/videos/").token(token))
            .await
    }

    pub async fn get(&self, id: i64, token: &str) -> Result<AdvertisementVideo, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/videos/{}/", id)).token(token))
            .await
    }

    /// Upload a video: title and is_active as text parts, the video file
    /// and optional thumbnail as file parts.
    pub async fn create(&self, form: FormParts, token: &str) -> Result<AdvertisementVideo, ApiError> {
        self.client
            .send(ApiRequest::post("/videos/").multipart(form).token(token))
            .await
    }

    pub async fn update(
        &self,
        id: i64,
        form: FormParts,
        token: &str,
    ) -> Result<AdvertisementVideo, ApiError> {
        self.client
            .send(
                ApiRequest::put(format!("/videos/{}/", id))
                    .multipart(form)
                    .token(token),
            )
            .await
    }

    pub async fn delete(&self, id: i64, token: &str) -> Result<(), ApiError> {
        self.client
            .send::<Value>(ApiRequest::delete(format!("/videos/{}/", id)).token(token))
            .await?;
        Ok(())
    }

    /// Make this the active advertisement; the backend deactivates the rest.
    pub async fn set_active(&self, id: i64, token: &str) -> Result<AdvertisementVideo, ApiError> {
        self.client
            .send(ApiRequest::put(format!("/videos/{}/set_active/", id)).token(token))
            .await
    }
}
