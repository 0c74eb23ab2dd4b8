use crate::client::Client;
use crate::endpoints::{ensure_array, PaginatedResponse};
use crate::error::ApiError;
use crate::request::{ApiRequest, FormParts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub use crate::endpoints::users::Review;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i64,
    pub image: String,
    pub order: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal price serialized as a string by the backend.
    pub price: String,
    #[serde(default)]
    pub stock: i64,
    pub category: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub primary_image: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub governorate: String,
    #[serde(default)]
    pub governorate_display: Option<String>,
    #[serde(default)]
    pub currency_en: Option<String>,
    #[serde(default)]
    pub currency_ar: Option<String>,
    #[serde(default)]
    pub featured_order: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// Listing envelope for `/products/`; carries governorate facets alongside
/// the page of results.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductListResponse {
    pub count: i64,
    #[serde(default)]
    pub governorates: Value,
    #[serde(default)]
    pub ordering: Option<String>,
    pub results: Vec<Product>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<i64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub ordering: Option<String>,
}

impl ProductQuery {
    pub(crate) fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            if !search.is_empty() {
                pairs.push(("search".to_string(), search.clone()));
            }
        }
        if let Some(category) = self.category {
            pairs.push(("category".to_string(), category.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size".to_string(), page_size.to_string()));
        }
        if let Some(ordering) = &self.ordering {
            pairs.push(("ordering".to_string(), ordering.clone()));
        }
        pairs
    }
}

pub struct ProductEndpoints<'a> {
    pub(crate) client: &'a Client,
}

impl ProductEndpoints<'_> {
    pub async fn list(
        &self,
        query: &ProductQuery,
        token: &str,
    ) -> Result<ProductListResponse, ApiError> {
        let mut request = ApiRequest::get("/products/").token(token);
        for (name, value) in query.pairs() {
            request = request.query(name, value);
        }
        self.client.send(request).await
    }

    pub async fn get(&self, id: i64, token: &str) -> Result<ProductDetails, ApiError> {
        self.client
            .send(ApiRequest::get(format!("/products/{}/", id)).token(token))
            .await
    }

    pub async fn reviews(&self, id: i64, token: &str) -> Result<Vec<Review>, ApiError> {
        let value: Value = self
            .client
            .send(ApiRequest::get(format!("/products/{}/reviews/", id)).token(token))
            .await?;
        ensure_array(value)
    }

    /// Create a product. Fields go out as multipart text parts; gallery
    /// images are repeated `uploaded_images` file parts.
    pub async fn create(&self, form: FormParts, token: &str) -> Result<Product, ApiError> {
        self.client
            .send(
                ApiRequest::post("/products/create/")
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
    ) -> Result<ProductDetails, ApiError> {
        self.client
            .send(
                ApiRequest::put(format!("/products/{}/update/", id))
                    .multipart(form)
                    .token(token),
            )
            .await
    }

    pub async fn delete(&self, id: i64, token: &str) -> Result<(), ApiError> {
        self.client
            .send::<Value>(ApiRequest::delete(format!("/products/{}/delete/", id)).token(token))
            .await?;
        Ok(())
    }

    /// Search products, returning just the page of results.
    pub async fn search(
        &self,
        query: &ProductQuery,
        token: &str,
    ) -> Result<Vec<Product>, ApiError> {
        let mut request = ApiRequest::get("/products/").token(token);
        for (name, value) in query.pairs() {
            request = request.query(name, value);
        }
        let response: PaginatedResponse<Product> = self.client.send(request).await?;
        Ok(response.results)
    }

    pub async fn add_images(
        &self,
        product_id: i64,
        form: FormParts,
        token: &str,
    ) -> Result<Value, ApiError> {
        self.client
            .send(
                ApiRequest::post(format!("/products/{}/images/", product_id))
                    .multipart(form)
                    .token(token),
            )
            .await
    }

    pub async fn delete_image(
        &self,
        product_id: i64,
        image_id: i64,
        token: &str,
    ) -> Result<(), ApiError> {
        self.client
            .send::<Value>(
                ApiRequest::delete(format!("/products/{}/images/{}/", product_id, image_id))
                    .token(token),
            )
            .await?;
        Ok(())
    }

    pub async fn reorder_images(
        &self,
        product_id: i64,
        image_order: &[i64],
        token: &str,
    ) -> Result<Value, ApiError> {
        self.client
            .send(
                ApiRequest::put(format!("/products/{}/images/reorder/", product_id))
                    .json(json!({ "image_order": image_order }))
                    .token(token),
            )
            .await
    }

    /// Set or clear (None) a product's position in the featured carousel.
    pub async fn update_featured_order(
        &self,
        product_id: i64,
        featured_order: Option<i64>,
        token: &str,
    ) -> Result<Value, ApiError> {
        self.client
            .send(
                ApiRequest::put(format!("/products/{}/featured_order/", product_id))
                    .json(json!({ "featured_order": featured_order }))
                    .token(token),
            )
            .await
    }
}
