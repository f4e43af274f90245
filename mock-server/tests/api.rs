use axum::{
    body::Body,
    http::{self, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "----mock-test-boundary";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Text parts are `(name, value)`; file parts are `(name, filename)`.
fn multipart(method: &str, uri: &str, texts: &[(&str, &str)], files: &[(&str, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in texts {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    for (name, filename) in files {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\nfake-bytes\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// --- collections ---

#[tokio::test]
async fn list_starts_empty_with_success_envelope() {
    let app = app();
    let (status, body) = send(&app, get("/api/events")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn create_event_returns_201_with_stored_image_path() {
    let app = app();
    let (status, body) = send(
        &app,
        multipart(
            "POST",
            "/api/events",
            &[("title", "Touring Puncak"), ("date", "2024-05-01"), ("location", "Bogor")],
            &[("image", "poster.jpg")],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Event created");
    let event = &body["data"];
    assert_eq!(event["id"], 1);
    assert_eq!(event["title"], "Touring Puncak");
    assert_eq!(event["image"], "/uploads/1-poster.jpg");
    assert!(event["createdAt"].is_string());
}

#[tokio::test]
async fn create_without_required_field_is_rejected() {
    let app = app();
    let (status, body) = send(&app, multipart("POST", "/api/events", &[("title", "No date")], &[])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "date is required");
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = app();
    for title in ["first", "second"] {
        send(
            &app,
            multipart("POST", "/api/milestones", &[("year", "2020"), ("title", title)], &[]),
        )
        .await;
    }
    let (_, body) = send(&app, get("/api/milestones")).await;

    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[tokio::test]
async fn update_keeps_fields_not_sent() {
    let app = app();
    send(
        &app,
        multipart(
            "POST",
            "/api/events",
            &[("title", "Old"), ("date", "2024-05-01"), ("location", "Bogor")],
            &[],
        ),
    )
    .await;

    let (status, body) = send(&app, multipart("PUT", "/api/events/1", &[("title", "New")], &[])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "New");
    assert_eq!(body["data"]["location"], "Bogor");
}

#[tokio::test]
async fn missing_record_is_404_with_message() {
    let app = app();
    let (status, body) = send(&app, get("/api/news/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "News not found");

    let (status, _) = send(&app, multipart("PUT", "/api/events/9", &[("title", "x")], &[])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_record() {
    let app = app();
    send(
        &app,
        multipart("POST", "/api/gallery", &[("title", "Sunmori"), ("type", "image")], &[("image", "a.png")]),
    )
    .await;

    let (status, body) = send(&app, delete("/api/gallery/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(&app, delete("/api/gallery/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gallery_image_upload_lands_in_url() {
    let app = app();
    let (_, body) = send(
        &app,
        multipart("POST", "/api/gallery", &[("title", "Sunmori"), ("type", "image")], &[("image", "a.png")]),
    )
    .await;
    assert_eq!(body["data"]["url"], "/uploads/1-a.png");
    assert_eq!(body["data"]["type"], "image");
}

#[tokio::test]
async fn products_filter_by_category() {
    let app = app();
    for (name, category) in [("Jersey A", "jersey"), ("Jaket B", "jaket")] {
        send(
            &app,
            multipart(
                "POST",
                "/api/products",
                &[("name", name), ("price", "100000"), ("category", category), ("stock", "3")],
                &[],
            ),
        )
        .await;
    }

    let (_, body) = send(&app, get("/api/products?category=jaket")).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Jaket B");
    assert_eq!(items[0]["price"], 100000.0);
}

// --- categories ---

#[tokio::test]
async fn category_crud_uses_json_bodies() {
    let app = app();
    let (status, body) = send(&app, json_request("POST", "/api/categories", json!({ "name": "Spare Part" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["slug"], "spare-part");

    let (status, body) = send(&app, json_request("PUT", "/api/categories/1", json!({ "name": "Aksesoris" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Aksesoris");
    assert_eq!(body["data"]["slug"], "aksesoris");
}

#[tokio::test]
async fn categories_have_no_single_get() {
    let app = app();
    send(&app, json_request("POST", "/api/categories", json!({ "name": "Jersey" }))).await;
    let response = app.clone().oneshot(get("/api/categories/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn blank_category_name_is_400() {
    let app = app();
    let (status, body) = send(&app, json_request("POST", "/api/categories", json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn category_in_use_cannot_be_deleted() {
    let app = app();
    send(&app, json_request("POST", "/api/categories", json!({ "name": "Jersey" }))).await;
    send(
        &app,
        multipart(
            "POST",
            "/api/products",
            &[("name", "Jersey A"), ("price", "1"), ("category", "jersey")],
            &[],
        ),
    )
    .await;

    let (status, body) = send(&app, delete("/api/categories/1")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Category is in use");

    let (_, body) = send(&app, get("/api/categories")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

// --- singletons ---

#[tokio::test]
async fn about_update_maps_management_photos_by_index() {
    let app = app();
    let management = json!([
        { "position": "Ketua", "name": "Andi", "photo_url": null },
        { "position": "Sekretaris", "name": "Budi", "photo_url": null }
    ])
    .to_string();

    let request = multipart(
        "PUT",
        "/api/about",
        &[
            ("hero_title", "Tentang Kami"),
            ("management", management.as_str()),
            ("management_image_indexes", "1"),
        ],
        &[("management_images", "budi.jpg")],
    );
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    let about = &body["data"];
    assert_eq!(about["hero_title"], "Tentang Kami");
    assert_eq!(about["management"][0]["photo_url"], Value::Null);
    assert_eq!(about["management"][1]["photo_url"], "/uploads/1-budi.jpg");

    let (_, body) = send(&app, get("/api/about")).await;
    assert_eq!(body["data"]["management"][1]["name"], "Budi");
}

#[tokio::test]
async fn home_update_stores_uploaded_media() {
    let app = app();
    let (status, body) = send(
        &app,
        multipart("PUT", "/api/home", &[("hero_title", "Gas!")], &[("bg_video", "intro.mp4")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bg_video"], "/uploads/1-intro.mp4");
    assert_eq!(body["data"]["about_image"], Value::Null);
}
