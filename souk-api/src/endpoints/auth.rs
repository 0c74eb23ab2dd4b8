use crate::client::Client;
use crate::endpoints::users::User;
use crate::error::ApiError;
use crate::request::ApiRequest;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub is_seller: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub user: User,
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

pub struct AuthEndpoints<'a> {
    pub(crate) client: &'a Client,
}

impl AuthEndpoints<'_> {
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.client
            .send(
                ApiRequest::post("/auth/login/")
                    .json(json!({ "email": email, "password": password })),
            )
            .await
    }

    pub async fn register(&self, data: &RegisterData) -> Result<RegisterResponse, ApiError> {
        self.client
            .send(ApiRequest::post("/auth/register/").json(serde_json::to_value(data)?))
            .await
    }

    pub async fn refresh_token(&self, refresh: &str) -> Result<RefreshResponse, ApiError> {
        self.client
            .send(ApiRequest::post("/auth/token/refresh/").json(json!({ "refresh": refresh })))
            .await
    }
}
