//! End-to-end tests through the fully layered router
//!
//! Requests go through `tower::ServiceExt::oneshot`, so auth middleware,
//! extractors and the response envelope are all exercised.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use matsplash_server::auth::password::hash_password;
use matsplash_server::db::DbService;
use matsplash_server::db::repository::employee;
use matsplash_server::{Config, JwtService, ServerState, api};
use shared::models::{EmployeeCreate, Role};

struct TestApp {
    router: Router,
    state: ServerState,
    _work_dir: tempfile::TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let work_dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(work_dir.path().to_string_lossy(), 0).unwrap();
        let db = DbService::in_memory().await.unwrap();
        db.bootstrap_admin("admin", Some("admin-pass")).await.unwrap();
        let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));

        let state = ServerState::new(config, db.pool, jwt);
        let router = api::build_app(&state).with_state(state.clone());
        Self {
            router,
            state,
            _work_dir: work_dir,
        }
    }

    /// Seed an employee and return (id, bearer token)
    async fn staff(&self, username: &str, role: Role) -> (i64, String) {
        let hash = hash_password("password-1").unwrap();
        let data = EmployeeCreate {
            username: username.into(),
            password: String::new(),
            display_name: None,
            role,
        };
        let created = employee::create(&self.state.pool, &data, &hash).await.unwrap();
        let token = self.state.jwt_service.generate_token(&created).unwrap();
        (created.id, token)
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn api_requires_bearer_token() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/api/batches", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "NotAuthenticated");

    let (status, _) = app
        .call(Method::GET, "/api/batches", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_then_me() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "admin", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "InvalidCredentials");

    let (status, body) = app
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "admin", "password": "admin-pass"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = app.call(Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "admin");
    assert_eq!(body["data"]["role"], "Admin");
}

#[tokio::test]
async fn employee_management_is_admin_only() {
    let app = TestApp::new().await;
    let (_, manager) = app.staff("manager", Role::Manager).await;
    let (_, director) = app.staff("director", Role::Director).await;
    let new_employee = json!({
        "username": "assist",
        "password": "password-1",
        "role": "Driver Assistant"
    });

    let (status, body) = app
        .call(Method::POST, "/api/employees", Some(&manager), Some(new_employee.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "AdminRequired");

    let (status, body) = app
        .call(Method::POST, "/api/employees", Some(&director), Some(new_employee))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "Driver Assistant");

    let (status, body) = app
        .call(
            Method::GET,
            "/api/employees?role=Driver%20Assistant",
            Some(&manager),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn assignment_reject_resubmit_approve() {
    let app = TestApp::new().await;
    let (keeper_id, keeper) = app.staff("keeper", Role::StoreKeeper).await;
    let (packer_id, packer) = app.staff("packer", Role::Packer).await;
    let (loader_id, _) = app.staff("loader", Role::Loader).await;
    let (_, manager) = app.staff("manager", Role::Manager).await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/intake",
            Some(&keeper),
            Some(json!({"loader_id": loader_id, "packer_id": packer_id, "bags_submitted": 100})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let assignment_id = body["data"]["assignment"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["assignment"]["storekeeper_id"], keeper_id);

    // A packer cannot review
    let review = format!("/api/assignments/{assignment_id}/review");
    let (status, _) = app
        .call(Method::PUT, &review, Some(&packer), Some(json!({"action": "approve"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .call(Method::PUT, &review, Some(&manager), Some(json!({"action": "reject"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "RejectionCommentRequired");

    let (status, body) = app
        .call(
            Method::PUT,
            &review,
            Some(&manager),
            Some(json!({"action": "reject", "comment": "count again"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "rejected");

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/assignments/{assignment_id}/resubmit"),
            Some(&keeper),
            Some(json!({"bags_assigned": 90})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "pending_review");
    assert_eq!(body["data"]["bags_assigned"], 90);

    let (status, body) = app
        .call(Method::PUT, &review, Some(&manager), Some(json!({"action": "approve"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");

    // Approving twice is a state error, not a silent success
    let (status, body) = app
        .call(Method::PUT, &review, Some(&manager), Some(json!({"action": "approve"})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "InvalidState");

    let (status, body) = app
        .call(Method::GET, "/api/assignments?status=approved", Some(&packer), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn packing_dispute_and_final_count() {
    let app = TestApp::new().await;
    let (_, keeper) = app.staff("keeper", Role::StoreKeeper).await;
    let (packer_id, packer) = app.staff("packer", Role::Packer).await;
    let (_, manager) = app.staff("manager", Role::Manager).await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/packing-logs",
            Some(&keeper),
            Some(json!({"packer_id": packer_id, "bags_packed": 50, "packing_date": "2025-03-14"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/packing-logs/{id}/dispute"),
            Some(&packer),
            Some(json!({"disputed_bags": 45, "dispute_reason": "five bags burst"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .call(Method::GET, "/api/pending-approvals", Some(&manager), None)
        .await;
    assert_eq!(body["data"][0]["status"], "disputed");

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/packing-logs/{id}/approve"),
            Some(&manager),
            Some(json!({"final_bags": 45})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");
    assert_eq!(body["data"]["bags_packed"], 45);

    let (_, body) = app
        .call(Method::GET, &format!("/api/packing-logs/{packer_id}"), Some(&packer), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn driver_settlement_reports_revenue_mismatch() {
    let app = TestApp::new().await;
    let (_, desk) = app.staff("desk", Role::Receptionist).await;
    let (driver_id, driver) = app.staff("driver", Role::Driver).await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/driver-sales",
            Some(&desk),
            Some(json!({"driver_id": driver_id, "bags_dispatched": 100, "delivery_date": "2025-03-14"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["expected_revenue"], 25000.0);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/driver-sales/{id}/account"),
            Some(&desk),
            Some(json!({
                "bags_sold_270": 40,
                "bags_sold_250": 55,
                "bags_returned": 5,
                "total_revenue": 25000.0
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sales accounted with warnings");
    assert!(!body["data"]["warnings"].as_array().unwrap().is_empty());

    // The driver sees the run; the submitted revenue was stored as given
    let (_, body) = app
        .call(Method::GET, "/api/driver-sales", Some(&driver), None)
        .await;
    assert_eq!(body["data"][0]["status"], "accounted");
    assert_eq!(body["data"][0]["total_revenue"], 25000.0);
}

#[tokio::test]
async fn attendance_over_http() {
    let app = TestApp::new().await;
    let (_, packer) = app.staff("packer", Role::Packer).await;

    let (status, _) = app
        .call(Method::POST, "/api/attendance/clock-in", Some(&packer), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app
        .call(Method::POST, "/api/attendance/clock-in", Some(&packer), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "AlreadyClockedIn");

    let (status, body) = app
        .call(
            Method::POST,
            "/api/attendance/clock-out",
            Some(&packer),
            Some(json!({"note": "done"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "closed");
}
