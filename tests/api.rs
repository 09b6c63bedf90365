use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pet_adoption::{app, connect, ensure_tables, AppState, Settings};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

/// App over a fresh database in a temp dir; `tweak` adjusts settings before startup.
async fn setup_with(tweak: impl FnOnce(&mut Settings)) -> (Router, SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut settings = Settings {
        database_url: format!("sqlite://{}", dir.path().join("pets.db").display()),
        upload_dir: dir.path().join("uploads"),
        ..Settings::default()
    };
    tweak(&mut settings);
    let pool = connect(&settings.database_url).await.expect("connect");
    ensure_tables(&pool).await.expect("schema");
    (app(AppState::new(pool.clone(), settings)), pool, dir)
}

async fn setup() -> (Router, TempDir) {
    let (app, _pool, dir) = setup_with(|_| {}).await;
    (app, dir)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let res = app.clone().oneshot(req).await.expect("response");
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, req).await;
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn multipart_upload(filename: &str, data: &[u8]) -> Request<Body> {
    let boundary = "XPETBOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    Request::builder()
        .method(Method::POST)
        .uri("/uploads")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .expect("request")
}

fn max() -> Value {
    json!({
        "name": "Max",
        "type": "Dog",
        "breed": "Golden Retriever",
        "age": 2,
        "gender": "Male",
        "size": "Large",
        "weight": 30,
        "color": "Golden",
        "vaccinated": "Yes",
        "personality": "Friendly",
        "training": "Basic commands",
        "compatibility_pets": "Yes",
        "compatibility_kids": "Yes",
        "special_needs": "None",
        "image": "uploads/max.jpg"
    })
}

async fn list_pets(app: &Router) -> Vec<Value> {
    let (status, body) = send_json(app, empty_request(Method::GET, "/pets")).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("array").clone()
}

async fn add_pet(app: &Router, pet: &Value) -> i64 {
    let (status, body) = send_json(app, json_request(Method::POST, "/add_pet", pet)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().expect("id")
}

#[tokio::test]
async fn welcome_is_plain_text() {
    let (app, _dir) = setup().await;
    let (status, bytes) = send(&app, empty_request(Method::GET, "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"Welcome to the Pet Adoption API!");
}

#[tokio::test]
async fn empty_store_lists_no_pets() {
    let (app, _dir) = setup().await;
    assert!(list_pets(&app).await.is_empty());
}

#[tokio::test]
async fn added_pet_is_listed_with_forced_available_status() {
    let (app, _dir) = setup().await;
    let mut input = max();
    input["status"] = json!("Adopted");

    let (status, ack) = send_json(&app, json_request(Method::POST, "/add_pet", &input)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ack["message"], "Pet Max added successfully!");
    let id = ack["id"].as_i64().expect("id");

    let pets = list_pets(&app).await;
    assert_eq!(pets.len(), 1);
    let pet = &pets[0];
    assert_eq!(pet["id"], id);
    assert_eq!(pet["status"], "Available");
    for (key, value) in max().as_object().expect("object") {
        assert_eq!(&pet[key], value, "field {key}");
    }

    let second = add_pet(&app, &max()).await;
    assert_ne!(second, id);
    assert_eq!(list_pets(&app).await.len(), 2);
}

#[tokio::test]
async fn optional_text_fields_default_to_empty() {
    let (app, _dir) = setup().await;
    let mut input = max();
    let obj = input.as_object_mut().expect("object");
    obj.remove("training");
    obj.remove("compatibility_pets");
    obj.remove("compatibility_kids");
    let id = add_pet(&app, &input).await;

    let (status, pet) = send_json(&app, empty_request(Method::GET, &format!("/pets/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pet["training"], "");
    assert_eq!(pet["compatibility_pets"], "");
    assert_eq!(pet["compatibility_kids"], "");
}

#[tokio::test]
async fn missing_required_field_is_rejected_without_insert() {
    let (app, _dir) = setup().await;
    add_pet(&app, &max()).await;

    let mut input = max();
    input.as_object_mut().expect("object").remove("name");
    let (status, body) = send_json(&app, json_request(Method::POST, "/add_pet", &input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
    assert!(body["error"]["message"].as_str().expect("message").contains("name"));

    assert_eq!(list_pets(&app).await.len(), 1);
}

#[tokio::test]
async fn invalid_values_are_rejected_without_insert() {
    let (app, _dir) = setup().await;
    let cases = [("age", json!(-1)), ("weight", json!(-5)), ("gender", json!("Unknown"))];
    for (field, value) in cases {
        let mut input = max();
        input[field] = value;
        let req = json_request(Method::POST, "/add_pet", &input);
        let (status, body) = send_json(&app, req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{field}");
        assert_eq!(body["error"]["code"], "validation_error");
    }
    assert!(list_pets(&app).await.is_empty());
}

#[tokio::test]
async fn malformed_json_gets_structured_error() {
    let (app, _dir) = setup().await;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/add_pet")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn adopt_changes_only_status() {
    let (app, _dir) = setup().await;
    let id = add_pet(&app, &max()).await;
    let before = list_pets(&app).await[0].clone();

    let req = empty_request(Method::PUT, &format!("/adopt_pet/{id}"));
    let (status, ack) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["message"], format!("Pet ID {id} has been adopted!"));

    let after = list_pets(&app).await[0].clone();
    assert_eq!(after["status"], "Adopted");
    let mut expected = before;
    expected["status"] = json!("Adopted");
    assert_eq!(after, expected);
}

#[tokio::test]
async fn adopting_twice_succeeds_both_times() {
    let (app, _dir) = setup().await;
    let id = add_pet(&app, &max()).await;
    for _ in 0..2 {
        let req = empty_request(Method::PUT, &format!("/adopt_pet/{id}"));
        let (status, _) = send_json(&app, req).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(list_pets(&app).await[0]["status"], "Adopted");
}

#[tokio::test]
async fn adopting_unknown_pet_is_not_found_and_changes_nothing() {
    let (app, _dir) = setup().await;
    add_pet(&app, &max()).await;
    let before = list_pets(&app).await;

    let (status, body) = send_json(&app, empty_request(Method::PUT, "/adopt_pet/999999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(list_pets(&app).await, before);
}

#[tokio::test]
async fn non_integer_pet_id_is_bad_request() {
    let (app, _dir) = setup().await;
    let (status, body) = send_json(&app, empty_request(Method::PUT, "/adopt_pet/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn deleting_pet_cascades_to_adoption_requests() {
    let (app, _dir) = setup().await;
    let id = add_pet(&app, &max()).await;
    let request = json!({
        "name": "Ann Lee",
        "email": "ann@example.com",
        "phone": "555-0100",
        "address": "1 Main St",
        "pet_id": id,
        "status": "Approved"
    });
    let (status, ack) = send_json(&app, json_request(Method::POST, "/adoptions", &request)).await;
    assert_eq!(status, StatusCode::CREATED, "{ack}");

    let req = empty_request(Method::GET, &format!("/adoptions?pet_id={id}"));
    let (_, listed) = send_json(&app, req).await;
    let listed = listed.as_array().expect("array").clone();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["status"], "Pending");
    assert_eq!(listed[0]["pet_id"], id);

    let (status, _) = send_json(&app, empty_request(Method::DELETE, &format!("/pets/{id}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, remaining) = send_json(&app, empty_request(Method::GET, "/adoptions")).await;
    assert!(remaining.as_array().expect("array").is_empty());
    assert!(list_pets(&app).await.is_empty());

    let (status, _) = send_json(&app, empty_request(Method::DELETE, &format!("/pets/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn adoption_request_for_unknown_pet_is_not_found() {
    let (app, _dir) = setup().await;
    let request = json!({
        "name": "Ann Lee",
        "email": "ann@example.com",
        "phone": "555-0100",
        "address": "1 Main St",
        "pet_id": 77
    });
    let (status, body) = send_json(&app, json_request(Method::POST, "/adoptions", &request)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn unknown_upload_is_not_found() {
    let (app, _dir) = setup().await;
    let (status, body) = send_json(&app, empty_request(Method::GET, "/uploads/never.jpg")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn upload_path_traversal_is_refused() {
    let (app, _dir) = setup().await;
    let (status, _) = send(&app, empty_request(Method::GET, "/uploads/..%2Fpets.db")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn uploaded_image_is_served_back() {
    let (app, _dir) = setup().await;
    let image: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";
    let (status, ack) = send_json(&app, multipart_upload("luna.png", image)).await;
    assert_eq!(status, StatusCode::CREATED, "{ack}");
    assert_eq!(ack["path"], "uploads/luna.png");

    let res = app
        .clone()
        .oneshot(empty_request(Method::GET, "/uploads/luna.png"))
        .await
        .expect("response");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.expect("body");
    assert_eq!(&bytes[..], image);
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let (app, _dir) = setup().await;
    let req = Request::builder()
        .method(Method::GET)
        .uri("/pets")
        .header(header::ORIGIN, "http://localhost:8501")
        .body(Body::empty())
        .expect("request");
    let res = app.clone().oneshot(req).await.expect("response");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn readiness_reports_database_ok() {
    let (app, _dir) = setup().await;
    let (status, body) = send_json(&app, empty_request(Method::GET, "/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "ok"}));
}

#[tokio::test]
async fn readiness_fails_when_tables_are_gone() {
    let (app, pool, _dir) = setup_with(|_| {}).await;
    sqlx::query("DROP TABLE adoptions").execute(&pool).await.expect("drop");
    let (status, body) = send_json(&app, empty_request(Method::GET, "/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "service_unavailable");
    assert!(body["error"]["message"].as_str().expect("message").contains("adoptions"));
}

#[tokio::test]
async fn health_and_version_report_the_service() {
    let (app, _dir) = setup().await;
    let (status, body) = send_json(&app, empty_request(Method::GET, "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send_json(&app, empty_request(Method::GET, "/version")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "pet-adoption");
    assert!(!body["version"].as_str().expect("version").is_empty());
}

#[tokio::test]
async fn unknown_pet_read_is_not_found() {
    let (app, _dir) = setup().await;
    let (status, body) = send_json(&app, empty_request(Method::GET, "/pets/999999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn closed_pool_reports_service_unavailable() {
    let (app, pool, _dir) = setup_with(|_| {}).await;
    pool.close().await;
    let (status, body) = send_json(&app, empty_request(Method::GET, "/pets")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "service_unavailable");
}

#[tokio::test]
async fn upload_without_multipart_body_gets_structured_error() {
    let (app, _dir) = setup().await;
    let req = json_request(Method::POST, "/uploads", &json!({"file": "luna.png"}));
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn upload_with_disallowed_extension_is_rejected() {
    let (app, dir) = setup().await;
    let (status, body) = send_json(&app, multipart_upload("luna.gif", b"GIF89a")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(!dir.path().join("uploads").join("luna.gif").exists());
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let (app, _pool, _dir) = setup_with(|settings| settings.max_upload_bytes = 256).await;
    let mut input = max();
    input["personality"] = json!("x".repeat(1024));
    let (status, body) = send_json(&app, json_request(Method::POST, "/add_pet", &input)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "payload_too_large");
    assert!(list_pets(&app).await.is_empty());

    let (status, body) = send_json(&app, multipart_upload("big.png", &[0u8; 1024])).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "payload_too_large");
}
