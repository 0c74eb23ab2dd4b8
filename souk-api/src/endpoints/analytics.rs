use crate::client::Client;
use crate::error::ApiError;
use crate::request::ApiRequest;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ProductsAnalytics {
    pub overview: ProductsOverview,
    #[serde(default)]
    pub category_stats: Vec<Value>,
    #[serde(default)]
    pub top_categories: Vec<Value>,
    #[serde(default)]
    pub price_ranges: Vec<Value>,
    #[serde(default)]
    pub governorate_stats: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductsOverview {
    pub total_products: i64,
    pub active_products: i64,
    pub inactive_products: i64,
    pub recent_products: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyAnalytics {
    #[serde(default)]
    pub monthly_data: Vec<Value>,
    pub current_month: CurrentMonth,
    pub last_month: LastMonth,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentMonth {
    pub products: i64,
    pub growth_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastMonth {
    pub products: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserAnalytics {
    pub overview: UsersOverview,
    #[serde(default)]
    pub monthly_users: Vec<Value>,
    #[serde(default)]
    pub top_sellers: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersOverview {
    pub total_users: i64,
    pub verified_users: i64,
    pub users_with_products: i64,
    pub verification_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSummary {
    pub totals: DashboardTotals,
    pub recent_activity: RecentActivity,
    #[serde(default)]
    pub top_categories: Vec<Value>,
    #[serde(default)]
    pub recent_products: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardTotals {
    pub products: i64,
    pub users: i64,
    pub categories: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentActivity {
    pub products_this_week: i64,
    pub users_this_week: i64,
}

pub struct AnalyticsEndpoints<'a> {
    pub(crate) client: &'a Client,
}

impl AnalyticsEndpoints<'_> {
    pub async fn products(&self, token: &str) -> Result<ProductsAnalytics, ApiError> {
        self.client
            .send(ApiRequest::get("/analytics/products/").token(token))
            .await
    }

    pub async fn monthly(&self, token: &str) -> Result<MonthlyAnalytics, ApiError> {
        self.client
            .send(ApiRequest::get("/analytics/monthly/").token(token))
            .await
    }

    pub async fn users(&self, token: &str) -> Result<UserAnalytics, ApiError> {
        self.client
            .send(ApiRequest::get("/analytics/users/").token(token))
            .await
    }

    pub async fn dashboard_summary(&self, token: &str) -> Result<DashboardSummary, ApiError> {
        self.client
            .send(ApiRequest::get("/analytics/dashboard/").token(token))
            .await
    }
}
