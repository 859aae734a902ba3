//! Shared test fixtures for the Finboard SDK integration tests.
//!
//! Provides `spawn_backend()` which starts an in-process axum server that
//! mimics the Finboard REST API with small fixed payloads, and helpers for
//! building an SDK against it with a temporary state directory.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use finboard_sdk::FinboardSdk;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "test-token";
pub const RESET_TOKEN: &str = "reset-abc";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const RESET_EMAIL: &str = "reset@example.com";
pub const PASSWORD: &str = "secret";
pub const TOTP_CODE: &str = "123456";

/// What the fake backend has been asked to do, for assertions.
#[derive(Debug, Default)]
pub struct Recorded {
    pub saved_widgets: Vec<Value>,
    pub users: Vec<Value>,
    pub next_user_id: i64,
    pub two_factor: HashMap<i64, bool>,
    pub activation: HashMap<i64, bool>,
    pub cash_flow_years: Vec<String>,
}

pub type Shared = Arc<Mutex<Recorded>>;

pub struct TestBackend {
    pub base_url: String,
    pub recorded: Shared,
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Start the fake backend on an ephemeral port and return its base URL.
///
/// The server runs on its own tokio runtime in a background thread, so tests
/// can use the blocking SDK directly.
pub fn spawn_backend() -> TestBackend {
    let recorded: Shared = Arc::new(Mutex::new(Recorded {
        users: vec![admin_user(), viewer_user()],
        next_user_id: 3,
        ..Recorded::default()
    }));
    let app = router(recorded.clone());

    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    let addr = rx.recv().unwrap();

    TestBackend {
        base_url: format!("http://{}", addr),
        recorded,
    }
}

/// Start a listener that accepts connections and never answers.
///
/// Returns its base URL. Connections are held open until the test exits.
pub fn spawn_silent_backend() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming() {
            held.push(stream);
        }
    });
    format!("http://{}", addr)
}

/// An SDK pointed at `backend` with a fresh state directory.
///
/// Returns `(FinboardSdk, tempfile::TempDir)`. Keep the `TempDir` alive for
/// the duration of the test.
pub fn sdk_for(backend: &TestBackend) -> (FinboardSdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let sdk = FinboardSdk::builder()
        .base_url(&backend.base_url)
        .state_dir(tmp_dir.path())
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

/// Like [`sdk_for`] but already signed in as the admin user.
pub fn signed_in_sdk(backend: &TestBackend) -> (FinboardSdk, tempfile::TempDir) {
    let (sdk, tmp) = sdk_for(backend);
    sdk.auth().login(ADMIN_EMAIL, PASSWORD).unwrap();
    (sdk, tmp)
}

pub fn admin_user() -> Value {
    json!({
        "id": 1,
        "name": "Ada Admin",
        "email": ADMIN_EMAIL,
        "role": "admin",
        "is_active": true,
        "two_factor_enabled": false
    })
}

fn viewer_user() -> Value {
    json!({
        "id": 2,
        "name": "Victor Viewer",
        "email": "viewer@example.com",
        "role": "viewer",
        "is_active": true,
        "two_factor_enabled": false
    })
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

pub fn cash_flow_2023() -> Value {
    json!({
        "monthly_cash_flow": {"2023-01": 1000.0, "2023-02": 2000.0},
        "monthly_inflow": {"2023-01": 2000.0, "2023-02": 3000.0},
        "monthly_outflow": {"2023-01": 1000.0, "2023-02": 1000.0},
        "quarterly_cash_flow": {"Q1": 3000.0, "Q2": 0.0, "Q3": 0.0, "Q4": 0.0},
        "quarterly_inflow": {"Q1": 5000.0, "Q2": 0.0, "Q3": 0.0, "Q4": 0.0},
        "quarterly_outflow": {"Q1": 2000.0, "Q2": 0.0, "Q3": 0.0, "Q4": 0.0},
        "total_cash_flow": 3000.0,
        "yearly_inflow": 5000.0,
        "yearly_outflow": 2000.0
    })
}

pub fn cash_flow_2024() -> Value {
    json!({
        "monthly_cash_flow": {"2024-01": -500.0},
        "monthly_inflow": {"2024-01": 500.0},
        "monthly_outflow": {"2024-01": 1000.0},
        "total_cash_flow": -500.0,
        "yearly_inflow": 500.0,
        "yearly_outflow": 1000.0
    })
}

pub fn profit_2023() -> Value {
    json!({
        "monthly_gross_profit": {"2023-01": 5000.0, "2023-02": 6000.0, "2023-03": 4000.0},
        "monthly_net_profit": {"2023-01": 1000.0, "2023-02": 1500.0, "2023-03": 500.0},
        "quarterly_gross_profit": {"Q1": 15000.0},
        "quarterly_net_profit": {"Q1": 3000.0},
        "total_gross_profit": 15000.0,
        "total_net_profit": 3000.0
    })
}

pub fn overview() -> Value {
    json!({
        "total_revenue": 36000.0,
        "total_expenses": 24000.0,
        "net_profit": 12000.0,
        "cash_balance": -1500.0,
        "monthly_revenue": {"January": 10000.0, "February": 12000.0, "March": 14000.0},
        "monthly_expenses": {"January": 8000.0, "February": 8000.0, "March": 8000.0},
        "monthly_profit": {"January": 2000.0, "February": 4000.0, "March": 6000.0}
    })
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn router(recorded: Shared) -> Router {
    Router::new()
        .route("/api/v1/company/user/auth/login", post(login))
        .route("/api/v1/company/user/auth/reset-password", post(reset_password))
        .route("/api/v1/company/user/auth/2fa/setup/{token}", get(two_factor_setup))
        .route(
            "/api/v1/company/user/auth/enable-disable/2fa/{user_id}",
            post(two_factor_toggle),
        )
        .route("/api/v1/company/financial/analytics/cash-flow", get(cash_flow))
        .route(
            "/api/v1/company/financial/analytics/profit-analysis",
            get(profit_analysis),
        )
        .route("/api/v1/company/financial/financial-overview", get(financial_overview))
        .route("/api/v1/company/financial/widgets", post(save_widgets))
        .route("/api/v1/company/user/company-users", get(list_users))
        .route("/api/v1/company/user/add-user", post(add_user))
        .route("/api/v1/company/user/update-user/{id}", put(update_user))
        .route("/api/v1/company/user/delete-user/{id}", delete(delete_user))
        .route(
            "/api/v1/company/user/activate-deactivate/{id}",
            post(activate_user),
        )
        .with_state(recorded)
}

fn fail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn require_auth(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let ok = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false);
    if ok {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Not authenticated" })),
        ))
    }
}

async fn login(Json(body): Json<Value>) -> ApiResult {
    let email = body["email"].as_str().unwrap_or("");
    let password = body["password"].as_str().unwrap_or("");
    match (email, password) {
        (ADMIN_EMAIL, PASSWORD) => Ok(Json(json!({
            "access_token": TOKEN,
            "user": admin_user()
        }))),
        (RESET_EMAIL, PASSWORD) => Ok(Json(json!({ "password_reset_token": RESET_TOKEN }))),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid credentials" })),
        )),
    }
}

async fn reset_password(Json(body): Json<Value>) -> ApiResult {
    if body["token"] != RESET_TOKEN {
        return Err(fail(StatusCode::BAD_REQUEST, "Invalid reset token"));
    }
    if body["new_password"].as_str().map_or(true, |p| p.len() < 8) {
        return Err(fail(StatusCode::BAD_REQUEST, "Password too short"));
    }
    Ok(Json(json!({ "message": "Password updated" })))
}

async fn two_factor_setup(Path(token): Path<String>) -> ApiResult {
    if token != TOKEN {
        return Err(fail(StatusCode::UNAUTHORIZED, "Invalid token"));
    }
    Ok(Json(json!({
        "secret": "JBSWY3DPEHPK3PXP",
        "qr_code": "data:image/png;base64,AAAA",
        "otpauth_url": "otpauth://totp/Finboard:admin@example.com?secret=JBSWY3DPEHPK3PXP"
    })))
}

async fn two_factor_toggle(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    require_auth(&headers)?;
    let enable = body["enable"].as_bool().unwrap_or(false);
    if enable && body["code"] != TOTP_CODE {
        return Err(fail(StatusCode::BAD_REQUEST, "Invalid verification code"));
    }
    recorded.lock().unwrap().two_factor.insert(user_id, enable);
    Ok(Json(json!({ "message": "ok" })))
}

async fn cash_flow(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    require_auth(&headers)?;
    let year = params.get("year").cloned().unwrap_or_default();
    recorded.lock().unwrap().cash_flow_years.push(year.clone());
    match year.as_str() {
        "2023" => Ok(Json(cash_flow_2023())),
        "2024" => Ok(Json(cash_flow_2024())),
        "1999" => Err(fail(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable")),
        _ => Ok(Json(json!({}))),
    }
}

async fn profit_analysis(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> ApiResult {
    require_auth(&headers)?;
    match params.get("year").map(String::as_str) {
        Some("2023") => Ok(Json(profit_2023())),
        _ => Err(fail(StatusCode::NOT_FOUND, "No profit data for that year")),
    }
}

async fn financial_overview(headers: HeaderMap) -> ApiResult {
    require_auth(&headers)?;
    Ok(Json(overview()))
}

async fn save_widgets(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    require_auth(&headers)?;
    let widgets = body["widgets"].as_array().cloned().unwrap_or_default();
    let count = widgets.len();
    recorded.lock().unwrap().saved_widgets = widgets;
    Ok(Json(json!({ "message": format!("Saved {} widgets", count) })))
}

async fn list_users(State(recorded): State<Shared>, headers: HeaderMap) -> ApiResult {
    require_auth(&headers)?;
    Ok(Json(Value::Array(recorded.lock().unwrap().users.clone())))
}

async fn add_user(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    require_auth(&headers)?;
    let mut rec = recorded.lock().unwrap();
    if rec.users.iter().any(|u| u["email"] == body["email"]) {
        return Err(fail(StatusCode::CONFLICT, "Email already exists"));
    }
    let user = json!({
        "id": rec.next_user_id,
        "name": body["name"],
        "email": body["email"],
        "role": body["role"],
        "is_active": true,
        "two_factor_enabled": false
    });
    rec.next_user_id += 1;
    rec.users.push(user.clone());
    Ok(Json(user))
}

async fn update_user(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    require_auth(&headers)?;
    let mut rec = recorded.lock().unwrap();
    let user = rec
        .users
        .iter_mut()
        .find(|u| u["id"] == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "User not found"))?;
    for field in ["name", "email", "role"] {
        if let Some(v) = body.get(field) {
            user[field] = v.clone();
        }
    }
    Ok(Json(user.clone()))
}

async fn delete_user(State(recorded): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> ApiResult {
    require_auth(&headers)?;
    let mut rec = recorded.lock().unwrap();
    let before = rec.users.len();
    rec.users.retain(|u| u["id"] != id);
    if rec.users.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "User not found"));
    }
    Ok(Json(json!({ "message": "deleted" })))
}

async fn activate_user(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    require_auth(&headers)?;
    let active = body["is_active"].as_bool().unwrap_or(false);
    let mut rec = recorded.lock().unwrap();
    rec.activation.insert(id, active);
    if let Some(user) = rec.users.iter_mut().find(|u| u["id"] == id) {
        user["is_active"] = json!(active);
    }
    Ok(Json(json!({ "message": "ok" })))
}
