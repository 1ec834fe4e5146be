use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::AppState;
use crate::db::MemoryDocumentStore;
use crate::routes;

// Custo mínimo aceito pelo bcrypt, para os testes não ficarem lentos
const TEST_COST: u32 = 4;

fn test_app() -> Router {
    let store = Arc::new(MemoryDocumentStore::new());
    routes::router(AppState::with_store(store, None, TEST_COST))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn register(app: &Router, email: &str, role: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/register",
        Some(json!({
            "name": "Tester",
            "email": email,
            "password": "rahasia123",
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().expect("user id").to_string()
}

async fn create_complaint(app: &Router, user_id: &str, category: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/complaints",
        Some(json!({
            "user_id": user_id,
            "title": "Transaksi tidak dikenal",
            "category": category,
            "description": "Ada transaksi yang tidak saya lakukan",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().expect("complaint id").to_string()
}

async fn patch_complaint(app: &Router, id: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PATCH, &format!("/api/complaints/{id}"), Some(body)).await
}

#[tokio::test]
async fn root_and_diagnostics() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/test", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data_backend"], "memory");
    assert_eq!(body["connection_status"], "connected");

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/complaints"].is_object());
}

#[tokio::test]
async fn complaint_workflow_end_to_end() {
    let app = test_app();
    let user = register(&app, "user@example.com", "user").await;
    let operator = register(&app, "operator@example.com", "operator").await;

    // Campos de fluxo enviados pelo cliente são ignorados
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/complaints",
        Some(json!({
            "user_id": user,
            "title": "Penipuan via telepon",
            "category": "penipuan",
            "description": "Saya ditelepon mengaku dari bank",
            "attachments": ["https://files.example.com/bukti.png"],
            "status": "selesai",
            "assigned_to": operator,
            "notes": [{"text": "smuggled"}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "baru");
    assert_eq!(created["assigned_to"], Value::Null);
    assert_eq!(created["notes"], json!([]));
    assert_eq!(created["priority"], "sedang");
    assert_eq!(created["sla_due_at"], Value::Null);
    assert_eq!(created["attachments"][0], "https://files.example.com/bukti.png");
    let id = created["id"].as_str().expect("id").to_string();

    let (status, _) = patch_complaint(&app, &id, json!({ "assigned_to": operator })).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = patch_complaint(&app, &id, json!({ "note": "calling customer" })).await;
    assert_eq!(status, StatusCode::OK);
    let (status, updated) = patch_complaint(&app, &id, json!({ "status": "diproses" })).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(updated["assigned_to"], operator.as_str());
    assert_eq!(updated["status"], "diproses");
    assert_eq!(updated["category"], "penipuan");
    assert_eq!(updated["notes"].as_array().expect("notes").len(), 1);
    assert_eq!(updated["notes"][0]["text"], "calling customer");
    assert!(updated["notes"][0]["at"].is_string());

    let (status, listed) = send(
        &app,
        Method::GET,
        &format!("/api/complaints?assigned_to={operator}&status=diproses"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().expect("list").len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
}

#[tokio::test]
async fn create_reports_bad_and_unknown_users() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/complaints",
        Some(json!({"user_id": "not-an-id", "title": "t", "description": "d"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/complaints",
        Some(json!({
            "user_id": uuid::Uuid::new_v4().to_string(),
            "title": "t",
            "description": "d",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");

    // Campo obrigatório ausente também é 400
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/complaints",
        Some(json!({"user_id": uuid::Uuid::new_v4().to_string(), "title": "t"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn update_reports_bad_and_missing_ids() {
    let app = test_app();

    let (status, _) = patch_complaint(&app, "123", json!({"status": "selesai"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = uuid::Uuid::new_v4().to_string();
    let (status, body) = patch_complaint(&app, &missing, json!({"note": "halo"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");

    let (status, _) = patch_complaint(&app, &missing, json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Status fora do enum
    let (status, _) = patch_complaint(&app, &missing, json!({"status": "closed"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_summary_counts() {
    let app = test_app();
    let mut users = Vec::new();
    for email in ["a@example.com", "b@example.com", "c@example.com"] {
        users.push(register(&app, email, "user").await);
    }

    for (i, status) in ["baru", "baru", "diproses", "selesai", "selesai"].iter().enumerate() {
        let id = create_complaint(&app, &users[i % users.len()], "tagihan").await;
        if *status != "baru" {
            let (code, _) = patch_complaint(&app, &id, json!({ "status": status })).await;
            assert_eq!(code, StatusCode::OK);
        }
    }

    let (status, summary) = send(&app, Method::GET, "/api/dashboard/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["users"], 3);
    assert_eq!(summary["complaints"], 5);
    assert_eq!(summary["complaints_open"], 3);
    assert_eq!(summary["complaints_closed"], 2);
    assert_eq!(summary["faqs"], 0);
    assert_eq!(summary["news"], 0);
}

#[tokio::test]
async fn list_rejects_negative_limit() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/complaints?limit=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    let (status, body) = send(&app, Method::GET, "/api/complaints?limit=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn register_and_login() {
    let app = test_app();
    register(&app, "rina@example.com", "admin").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"name": "Rina", "email": "rina@example.com", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        Some(json!({"email": "rina@example.com", "password": "rahasia123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        Some(json!({"email": "rina@example.com", "password": "salah"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthorized");
}

#[tokio::test]
async fn content_endpoints() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/faqs",
        Some(json!({"question": "Cara blokir kartu?", "answer": "Hubungi 1500"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    send(
        &app,
        Method::POST,
        "/api/faqs",
        Some(json!({"question": "Lama", "answer": "x", "is_active": false})),
    )
    .await;

    let (_, faqs) = send(&app, Method::GET, "/api/faqs", None).await;
    assert_eq!(faqs.as_array().expect("faqs").len(), 1);
    let (_, faqs) = send(&app, Method::GET, "/api/faqs?only_active=false", None).await;
    assert_eq!(faqs.as_array().expect("faqs").len(), 2);

    let (status, news) = send(
        &app,
        Method::POST,
        "/api/news",
        Some(json!({"title": "Promo", "content": "Cicilan 0%", "is_published": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(news["published_at"].is_string());

    let (status, message) = send(
        &app,
        Method::POST,
        "/api/contact",
        Some(json!({
            "name": "Andi",
            "email": "andi@example.com",
            "subject": "Limit",
            "message": "Mohon info",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(message["handled"], false);

    let (_, summary) = send(&app, Method::GET, "/api/dashboard/summary", None).await;
    assert_eq!(summary["faqs"], 1);
    assert_eq!(summary["news"], 1);
}
