use crate::client::Client;
use crate::endpoints::ensure_array;
use crate::error::ApiError;
use crate::request::ApiRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub is_seller: bool,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub is_admin_blocked: Option<bool>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub is_whatsapp: Option<bool>,
    #[serde(default)]
    pub show_phone: Option<bool>,
    #[serde(default)]
    pub is_email_verified: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial user for create/update; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_seller: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_whatsapp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_phone: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub user: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateReview {
    pub rating: i64,
    pub comment: String,
}

/// Administrative mark on a user account (warnings, badges, sanctions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mark {
    pub id: i64,
    pub mark_type: String,
    pub awarded_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reason: Option<String>,
    pub is_active: bool,
    pub awarded_by: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignMark {
    pub mark_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateMark {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

pub struct UserEndpoints<'a> {
    pub(crate) client: &'a Client,
}

impl UserEndpoints<'_> {
    /// The profile of the user the token belongs to.
    pub async fn current(&self, token: &str) -> Result<User, ApiError> {
        self.client
            .send(ApiRequest::get("/users/me/").token(token))
            .await
    }

    pub async fn list(&self, token: &str) -> Result<Vec<User>, ApiError> {
        let value: Value = self
            .client
            .send(ApiRequest::get("/users/").token(token))
            .await?;
        ensure_array(value)
    }

    pub async fn get(&self, id: i64, token: &str) -> Result<User, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/users/{}/", id)).token(token))
            .await
    }

    pub async fn create(&self, data: &UserPayload, token: &str) -> Result<User, ApiError> {
        self.client
            .send(
                ApiRequest::post("/users/create/")
                    .json(serde_json::to_value(data)?)
                    .token(token),
            )
            .await
    }

    pub async fn update(&self, id: i64, data: &UserPayload, token: &str) -> Result<User, ApiError> {
        self.client
            .send(
                ApiRequest::put(format!("/users/{}/update/", id))
                    .json(serde_json::to_value(data)?)
                    .token(token),
            )
            .await
    }

    pub async fn delete(&self, id: i64, token: &str) -> Result<(), ApiError> {
        self.client
            .send::<Value>(ApiRequest::delete(format!("/users/{}/delete/", id)).token(token))
            .await?;
        Ok(())
    }

    pub async fn block(&self, id: i64, reason: &str, token: &str) -> Result<(), ApiError> {
        self.client
            .send::<Value>(
                ApiRequest::post("/admin-block/")
                    .json(json!({ "user_id": id, "reason": reason }))
                    .token(token),
            )
            .await?;
        Ok(())
    }

    pub async fn unblock(&self, id: i64, token: &str) -> Result<(), ApiError> {
        self.client
            .send::<Value>(
                ApiRequest::delete(format!("/admin-block/{}/unblock/", id)).token(token),
            )
            .await?;
        Ok(())
    }

    pub async fn reviews(&self, user_id: i64, token: &str) -> Result<Vec<Review>, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/users/{}/reviews/", user_id)).token(token))
            .await
    }

    pub async fn create_review(
        &self,
        user_id: i64,
        data: &CreateReview,
        token: &str,
    ) -> Result<Review, ApiError> {
        self.client
            .send(
                ApiRequest::post(format!("/users/{}/reviews/create/", user_id))
                    .json(serde_json::to_value(data)?)
                    .token(token),
            )
            .await
    }

    pub async fn list_marks(&self, user_id: i64, token: &str) -> Result<Vec<Mark>, ApiError> {
        let value: Value = self
            .client
            .send(ApiRequest::get(format!("/users/{}/marks/", user_id)).token(token))
            .await?;
        ensure_array(value)
    }

    pub async fn assign_mark(
        &self,
        user_id: i64,
        data: &AssignMark,
        token: &str,
    ) -> Result<Mark, ApiError> {
        self.client
            .send(
                ApiRequest::post(format!("/users/{}/marks/", user_id))
                    .json(serde_json::to_value(data)?)
                    .token(token),
            )
            .await
    }

    pub async fn update_mark(
        &self,
        user_id: i64,
        mark_id: i64,
        data: &UpdateMark,
        token: &str,
    ) -> Result<Mark, ApiError> {
        self.client
            .send(
                ApiRequest::put(format!("/users/{}/marks/{}/", user_id, mark_id))
                    .json(serde_json::to_value(data)?)
                    .token(token),
            )
            .await
    }

    pub async fn mark_details(
        &self,
        user_id: i64,
        mark_id: i64,
        token: &str,
    ) -> Result<Mark, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/users/{}/marks/{}/", user_id, mark_id)).token(token))
            .await
    }

    pub async fn delete_mark(&self, user_id: i64, mark_id: i64, token: &str) -> Result<(), ApiError> {
        self.client
            .send::<Value>(
                ApiRequest::delete(format!("/users/{}/marks/{}/", user_id, mark_id)).token(token),
            )
            .await?;
        Ok(())
    }
}
