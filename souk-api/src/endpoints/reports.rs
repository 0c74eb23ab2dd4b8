use crate::client::Client;
use crate::error::ApiError;
use crate::request::ApiRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A user- or product-abuse report filed by a marketplace user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(default)]
    pub details: String,
    pub reason: String,
    #[serde(default)]
    pub reason_display: Option<String>,
    pub report_type: String,
    #[serde(default)]
    pub reported_product: Option<i64>,
    #[serde(default)]
    pub reported_user: Option<i64>,
    pub reporter: i64,
    #[serde(default)]
    pub reporter_email: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<i64>,
    pub status: String,
    #[serde(default)]
    pub status_display: Option<String>,
    #[serde(default)]
    pub admin_notes: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    pub status: Option<String>,
    pub report_type: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ReportQuery {
    fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.clone()));
        }
        if let Some(report_type) = &self.report_type {
            pairs.push(("report_type".to_string(), report_type.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size".to_string(), page_size.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportListResponse {
    pub reports: Vec<Report>,
    #[serde(default)]
    pub pagination: Value,
}

pub struct ReportEndpoints<'a> {
    pub(crate) client: &'a Client,
}

impl ReportEndpoints<'_> {
    pub async fn list(
        &self,
        query: &ReportQuery,
        token: &str,
    ) -> Result<ReportListResponse, ApiError> {
        let pairs = query.pairs();
        // The unfiltered route has no trailing slash; the filtered one does.
        let path = if pairs.is_empty() {
            "/reports/all"
        } else {
            "/reports/all/"
        };
        let mut request = ApiRequest::get(path).token(token);
        for (name, value) in pairs {
            request = request.query(name, value);
        }
        self.client.send(request).await
    }

    pub async fn get(&self, id: i64, token: &str) -> Result<Report, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/reports/{}/", id)).token(token))
            .await
    }

    pub async fn update_status(
        &self,
        id: i64,
        status: &str,
        admin_notes: &str,
        token: &str,
    ) -> Result<Report, ApiError> {
        self.client
            .send(
                ApiRequest::put(format!("/reports/{}/status/", id))
                    .json(json!({ "status": status, "admin_notes": admin_notes }))
                    .token(token),
            )
            .await
    }
}
