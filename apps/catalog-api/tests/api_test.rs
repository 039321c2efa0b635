//! HTTP tests driving the full router against an in-memory database.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_api::{build_router, AppState};
use catalog_db::{Database, DbConfig};

async fn app() -> Router {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    build_router(AppState::new(db, 100))
}

/// Sends one request and returns status, content type and parsed body.
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, content_type, json)
}

async fn create_category(app: &Router, name: &str) -> i64 {
    let (status, _, body) =
        send(app, Method::POST, "/category", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

fn product_body(title: &str, price: f64, category: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "price": price,
        "image": format!("https://img.example/{title}.png"),
        "category": category,
    })
}

#[tokio::test]
async fn test_category_lifecycle_scenario() {
    let app = app().await;

    let (status, content_type, created) = send(
        &app,
        Method::POST,
        "/category",
        Some(json!({ "name": "Shoes" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(created["name"], "Shoes");
    let id = created["id"].as_i64().unwrap();

    let (status, _, page) = send(&app, Method::GET, "/products/categories?name=Sho", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"][0]["name"], "Shoes");
    assert_eq!(page["metadata"]["total"], 1);
    assert_eq!(page["metadata"]["total_entries"], 1);
    assert_eq!(page["metadata"]["limit"], 100);
    assert_eq!(page["metadata"]["offset"], 1);

    let (status, _, updated) = send(
        &app,
        Method::PUT,
        &format!("/category/{id}"),
        Some(json!({ "name": "Footwear" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({ "id": id, "name": "Footwear" }));

    let (status, _, deleted) = send(&app, Method::DELETE, &format!("/category/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "id": id }));

    let (status, _, missing) = send(&app, Method::GET, &format!("/category/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        missing["message"],
        format!("category with id {id} not found")
    );
}

#[tokio::test]
async fn test_empty_category_list_is_ok() {
    let app = app().await;
    let (status, _, page) = send(&app, Method::GET, "/products/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"], json!([]));
    assert_eq!(page["metadata"]["total"], 0);
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = app().await;
    create_category(&app, "Footwear").await;

    let (status, _, created) = send(
        &app,
        Method::POST,
        "/product",
        Some(product_body("Trail", 90.0, "foot")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, _, fetched) = send(&app, Method::GET, &format!("/product/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Trail");
    assert_eq!(fetched["category"], "Footwear");

    let (status, _, page) = send(&app, Method::GET, "/products?min=50&max=100&sort=desc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["metadata"]["total"], 1);

    let (status, _, by_category) =
        send(&app, Method::GET, "/products/category/Footwear", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_category[0]["id"], id);

    let (status, _, updated) = send(
        &app,
        Method::PUT,
        &format!("/product/{id}"),
        Some(product_body("Trail v2", 99.5, "Ignored")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Trail v2");
    assert_eq!(updated["category"], "Footwear");

    let (status, content_type, body) =
        send(&app, Method::DELETE, &format!("/product/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, Value::Null);

    let (status, _, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "product not found");
}

#[tokio::test]
async fn test_create_product_unknown_category() {
    let app = app().await;
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/product",
        Some(product_body("Cap", 15.0, "Hats")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "category with name Hats not found");
}

#[tokio::test]
async fn test_create_product_negative_price() {
    let app = app().await;
    create_category(&app, "Footwear").await;
    let (status, _, _) = send(
        &app,
        Method::POST,
        "/product",
        Some(product_body("Trail", -1.0, "Footwear")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_query_parameter_errors() {
    let app = app().await;

    let (status, content_type, body) = send(&app, Method::GET, "/products?limit=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body["message"],
        "limit parameter value is not an integer. limit = abc"
    );

    let (status, _, _) = send(&app, Method::GET, "/products?sort=sideways", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(&app, Method::GET, "/products/categories?offset=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_beyond_row_range_is_rejected() {
    let app = app().await;
    let uri = format!("/products/categories?limit={}&offset=3", i64::MAX);

    let (status, content_type, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(
        body["message"],
        format!("offset 3 is out of range for limit {}", i64::MAX)
    );

    let (status, _, _) = send(
        &app,
        Method::GET,
        &format!("/products?limit={}&offset=2", i64::MAX),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_path_id_and_body() {
    let app = app().await;

    let (status, _, body) = send(&app, Method::GET, "/product/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid product id: abc");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/category")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "invalid json body");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = app().await;
    let (status, content_type, body) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body["message"], "route /nowhere not found");
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, _, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "SERVING");
}
