use souk_api::endpoints::products::ProductQuery;
use souk_api::{ApiError, ApiRequest, Client, FormParts};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn get_parses_json_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7,
            "email": "admin@example.com",
            "name": "Admin",
            "is_admin": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let user = client.users().current("secret").await.unwrap();
    assert_eq!(user.id, Some(7));
    assert_eq!(user.email, "admin@example.com");
    assert_eq!(user.is_admin, Some(true));
}

#[tokio::test]
async fn server_errors_retry_until_budget_exhausts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let started = Instant::now();
    let err = client.categories().list("token").await.unwrap_err();

    // Backoff delays of 1s then 2s sit between the three attempts.
    assert!(started.elapsed() >= Duration::from_secs(3));
    assert_eq!(err.to_string(), "Server error. Please try again later.");
}

#[tokio::test]
async fn unauthorized_is_never_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let err = client.users().list("expired").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Authentication failed. Please log in again."
    );
    assert_eq!(err.status_code().map(|s| s.as_u16()), Some(401));
}

#[tokio::test]
async fn bad_request_is_never_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/create/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "message": "email already in use" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let payload = souk_api::endpoints::users::UserPayload {
        email: Some("dupe@example.com".to_string()),
        ..Default::default()
    };
    let err = client.users().create(&payload, "token").await.unwrap_err();
    assert_eq!(err.to_string(), "email already in use");
}

#[tokio::test]
async fn delete_yields_empty_result_without_parsing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/products/3/delete/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    client.products().delete(3, "token").await.unwrap();
}

#[tokio::test]
async fn no_content_yields_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let value: serde_json::Value = client.send(ApiRequest::get("/ping/")).await.unwrap();
    assert_eq!(value, serde_json::json!({}));
}

#[tokio::test]
async fn non_json_content_type_yields_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html></html>"),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let value: serde_json::Value = client.send(ApiRequest::get("/page/")).await.unwrap();
    assert_eq!(value, serde_json::json!({}));
}

#[tokio::test]
async fn blank_json_body_yields_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blank/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string("   "),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let value: serde_json::Value = client.send(ApiRequest::get("/blank/")).await.unwrap();
    assert_eq!(value, serde_json::json!({}));
}

#[tokio::test]
async fn malformed_json_surfaces_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/garbled/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{not json", "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let err = client
        .send::<serde_json::Value>(ApiRequest::get("/garbled/").retries(1u32))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse));
    assert_eq!(err.to_string(), "Invalid response format from server");
}

#[tokio::test]
async fn multipart_form_is_rebuilt_for_retry() {
    let server = MockServer::start().await;
    // First attempt fails with a retryable status, second succeeds; the
    // form body must be reconstructible for the second attempt.
    Mock::given(method("POST"))
        .and(path("/videos/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/videos/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 1,
            "title": "launch ad",
            "video": "videos/launch.mp4",
            "uploaded_by": 7,
            "uploaded_at": "2025-06-30T12:00:00Z",
            "is_active": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let form = FormParts::new()
        .text("title", "launch ad")
        .text("is_active", true)
        .file("video", "launch.mp4", "video/mp4", vec![0, 0, 0, 24]);
    let video = client.videos().create(form, "token").await.unwrap();
    assert_eq!(video.id, 1);
    assert!(video.is_active);
}

#[tokio::test]
async fn product_list_sends_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .and(query_param("search", "lamp"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "count": 1,
            "governorates": [],
            "ordering": "-created_at",
            "results": [{
                "id": 11,
                "name": "Desk lamp",
                "price": "19.99",
                "category": 4,
                "is_active": true
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let query = ProductQuery {
        search: Some("lamp".to_string()),
        page: Some(2),
        ..Default::default()
    };
    let response = client.products().list(&query, "token").await.unwrap();
    assert_eq!(response.count, 1);
    assert_eq!(response.results[0].name, "Desk lamp");
}

#[tokio::test]
async fn user_list_tolerates_non_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "detail": "no users visible"
        })))
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let users = client.users().list("token").await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn loading_signal_tracks_outstanding_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(200))
                .set_body_json(serde_json::json!({
                    "email": "admin@example.com",
                    "name": "Admin"
                })),
        )
        .mount(&server)
        .await;

    let client = Arc::new(Client::new(server.uri()));
    let mut loading = client.loading();
    assert!(!*loading.borrow());

    let task = {
        let client = Arc::clone(&client);
        tokio::spawn(async move { client.users().current("token").await })
    };

    tokio::time::timeout(Duration::from_secs(5), loading.changed())
        .await
        .expect("loading signal should flip on")
        .unwrap();
    assert!(*loading.borrow());

    tokio::time::timeout(Duration::from_secs(5), loading.changed())
        .await
        .expect("loading signal should flip off")
        .unwrap();
    assert!(!*loading.borrow());

    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn health_check_reports_connectivity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "timestamp": "2025-06-30T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let health = client.health().check().await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn health_check_failure_collapses_to_connectivity_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri());
    let err = client.health().check().await.unwrap_err();
    assert_eq!(err.to_string(), "Unable to connect to server");
}
