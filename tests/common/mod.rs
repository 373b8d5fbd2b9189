// SPDX-License-Identifier: MIT

//! Shared test helpers: an in-process stub of the Smart-Park backend plus
//! client builders over an in-memory cache store.
//!
//! The stub speaks the real wire contract over real HTTP so the client's
//! reqwest plumbing, URL encoding and response classification are exercised
//! end to end.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use smartpark_client::cache::MemoryStore;
use smartpark_client::config::Config;
use smartpark_client::SmartParkClient;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Stub backend state, shared with the test body for seeding and asserting.
#[derive(Default)]
pub struct StubState {
    /// Registered users keyed by lower-cased email.
    pub users: Mutex<HashMap<String, Value>>,
    /// Plate lists keyed by lower-cased email.
    pub plates: Mutex<HashMap<String, Vec<String>>>,
    /// Every plate value received by the add-plate endpoint, in order.
    pub add_plate_calls: Mutex<Vec<String>>,
    /// Stored reservations.
    pub reservations: Mutex<Vec<Value>>,
    /// Total requests that reached the stub, any endpoint.
    pub requests: AtomicUsize,
    /// Number of profile-update requests received.
    pub profile_update_calls: AtomicUsize,
    /// When set, every protected endpoint answers 401.
    pub reject_auth: AtomicBool,
}

pub type SharedStub = Arc<StubState>;

#[allow(dead_code)]
pub fn stub_state() -> SharedStub {
    Arc::new(StubState::default())
}

/// Start the stub backend on an ephemeral port, returning its base URL.
#[allow(dead_code)]
pub async fn spawn_stub(state: SharedStub) -> String {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });

    format!("http://{}", addr)
}

/// A base URL that refuses connections (bound then dropped).
#[allow(dead_code)]
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway addr");
    drop(listener);
    format!("http://{}", addr)
}

/// Client over an in-memory cache store, pointed at `base_url`.
#[allow(dead_code)]
pub fn test_client(base_url: &str) -> SmartParkClient {
    init_logging();
    let config = Config::test_default(base_url);
    SmartParkClient::new(&config, Arc::new(MemoryStore::new()))
}

/// Client plus a handle on its store, for tests that inspect raw keys.
#[allow(dead_code)]
pub fn test_client_with_store(base_url: &str) -> (SmartParkClient, Arc<MemoryStore>) {
    init_logging();
    let config = Config::test_default(base_url);
    let store = Arc::new(MemoryStore::new());
    (SmartParkClient::new(&config, store.clone()), store)
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("smartpark_client=debug")
        .try_init();
}

// ─── Stub Router ─────────────────────────────────────────────────

fn router(state: SharedStub) -> Router {
    Router::new()
        .route("/register/", post(register))
        .route("/login/", post(login))
        .route("/profile/update/", put(update_profile))
        .route("/car-plates/{email}", get(get_plates).post(add_plate))
        .route("/car-plates/{email}/{plate}", delete(delete_plate))
        .route("/reservations/", post(create_reservation).get(list_reservations))
        .route("/reservations/{id}", delete(delete_reservation))
        .with_state(state)
}

type Rejection = (StatusCode, Json<Value>);

/// Enforce the bearer-auth contract on protected endpoints.
fn check_auth(state: &StubState, headers: &HeaderMap) -> Result<(), Rejection> {
    if state.reject_auth.load(Ordering::SeqCst) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Token expired" })),
        ));
    }

    let ok = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("Bearer "))
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

fn field(body: &Value, name: &str) -> String {
    body.get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn plate_list(body: &Value) -> Vec<String> {
    body.get("car_plate_ids")
        .and_then(Value::as_array)
        .map(|a| {
            a.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

async fn register(
    State(state): State<SharedStub>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let email = field(&body, "email").to_lowercase();
    let mut users = state.users.lock().unwrap();
    if users.contains_key(&email) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "User already exists or invalid input" })),
        ));
    }

    state
        .plates
        .lock()
        .unwrap()
        .insert(email.clone(), plate_list(&body));
    users.insert(email.clone(), body);

    Ok(Json(json!({
        "email": email,
        "message": "User registered successfully",
    })))
}

async fn login(
    State(state): State<SharedStub>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let email = field(&body, "email").to_lowercase();
    let users = state.users.lock().unwrap();
    let Some(user) = users.get(&email) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Invalid email or password" })),
        ));
    };

    let plates = state
        .plates
        .lock()
        .unwrap()
        .get(&email)
        .cloned()
        .unwrap_or_default();

    Ok(Json(json!({
        "access_token": format!("stub-token-{}", email),
        "token_type": "Bearer",
        "user": {
            "name": field(user, "name"),
            "email": field(user, "email"),
            "phone": field(user, "phone"),
            "car_plate_ids": plates,
        },
    })))
}

async fn update_profile(
    State(state): State<SharedStub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    check_auth(&state, &headers)?;
    state.profile_update_calls.fetch_add(1, Ordering::SeqCst);

    let email = field(&body, "email").to_lowercase();
    let plates = plate_list(&body);
    state
        .plates
        .lock()
        .unwrap()
        .insert(email.clone(), plates.clone());
    state.users.lock().unwrap().insert(email, body.clone());

    Ok(Json(json!({
        "name": field(&body, "name"),
        "email": field(&body, "email"),
        "phone": field(&body, "phone"),
        "car_plate_ids": plates,
    })))
}

async fn get_plates(
    State(state): State<SharedStub>,
    Path(email): Path<String>,
) -> Json<Value> {
    state.requests.fetch_add(1, Ordering::SeqCst);

    let plates = state
        .plates
        .lock()
        .unwrap()
        .get(&email.to_lowercase())
        .cloned()
        .unwrap_or_default();

    Json(json!({ "car_plate_ids": plates }))
}

async fn add_plate(
    State(state): State<SharedStub>,
    Path(email): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    check_auth(&state, &headers)?;

    let plate = field(&body, "new_plate");
    state.add_plate_calls.lock().unwrap().push(plate.clone());
    state
        .plates
        .lock()
        .unwrap()
        .entry(email.to_lowercase())
        .or_default()
        .push(plate);

    Ok(Json(json!({ "message": "Car plate added" })))
}

async fn delete_plate(
    State(state): State<SharedStub>,
    Path((email, plate)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    check_auth(&state, &headers)?;

    state
        .plates
        .lock()
        .unwrap()
        .entry(email.to_lowercase())
        .or_default()
        .retain(|p| p != &plate);

    Ok(Json(json!({ "message": "Car plate deleted" })))
}

async fn create_reservation(
    State(state): State<SharedStub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), Rejection> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    check_auth(&state, &headers)?;

    let id = format!(
        "{}#{}#{}",
        field(&body, "email"),
        field(&body, "date"),
        body.get("parking_spot_id").and_then(Value::as_u64).unwrap_or(0),
    );

    let mut reservation = body;
    reservation["reservation_id"] = json!(id);
    reservation["status"] = json!("pending");
    state
        .reservations
        .lock()
        .unwrap()
        .push(reservation.clone());

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Reservation created",
            "reservation": reservation,
        })),
    ))
}

async fn list_reservations(
    State(state): State<SharedStub>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, Rejection> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    check_auth(&state, &headers)?;

    let email = params.get("email").cloned().unwrap_or_default();
    let matching: Vec<Value> = state
        .reservations
        .lock()
        .unwrap()
        .iter()
        .filter(|r| field(r, "email") == email)
        .cloned()
        .collect();

    Ok(Json(json!(matching)))
}

async fn delete_reservation(
    State(state): State<SharedStub>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, Rejection> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    check_auth(&state, &headers)?;

    state
        .reservations
        .lock()
        .unwrap()
        .retain(|r| field(r, "reservation_id") != id);

    // 204 with no body, matching the real backend.
    Ok(StatusCode::NO_CONTENT)
}
