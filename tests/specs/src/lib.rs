// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test harness for end-to-end suite runs.
//!
//! Hosts an in-process mock of the contact-form API on an OS-assigned
//! port, implementing the remote contract the suite probes: a health
//! marker at `/`, validated submissions at `POST /contact`, and retrieval
//! of stored submissions at `GET /contact`.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use regex::Regex;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Resolve the path to the compiled `formprobe` binary.
pub fn formprobe_binary() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    // tests/specs → tests → workspace root
    let workspace = manifest.parent().and_then(|p| p.parent()).unwrap_or(manifest);
    workspace.join("target").join("debug").join("formprobe")
}

/// Run the compiled `formprobe` binary to completion with the given
/// arguments, capturing exit status and output. The environment is
/// scrubbed of `FORMPROBE_*` overrides so only the arguments matter.
pub async fn run_binary(args: &[&str]) -> anyhow::Result<std::process::Output> {
    let output = tokio::process::Command::new(formprobe_binary())
        .args(args)
        .env_remove("FORMPROBE_BASE_URL")
        .env_remove("FORMPROBE_TIMEOUT_SECS")
        .env_remove("FORMPROBE_LOG_LEVEL")
        .env_remove("FORMPROBE_LOG_FORMAT")
        .output()
        .await?;
    Ok(output)
}

/// Stored contact submissions, newest first.
type Store = Arc<Mutex<Vec<Value>>>;

/// A running mock API, shut down when dropped.
pub struct MockApi {
    addr: SocketAddr,
    server: JoinHandle<()>,
}

impl MockApi {
    /// Start a conforming mock: validates required fields and email
    /// format, answers 201/422 accordingly.
    pub async fn start() -> anyhow::Result<Self> {
        Self::serve(router(Validation::Strict)).await
    }

    /// Start a misbehaving mock that accepts every submission with 201,
    /// including ones the contract says must be rejected with 422.
    pub async fn start_lenient() -> anyhow::Result<Self> {
        Self::serve(router(Validation::AcceptAnything)).await
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    async fn serve(router: Router) -> anyhow::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Ok(Self { addr, server })
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

#[derive(Clone, Copy)]
enum Validation {
    Strict,
    AcceptAnything,
}

#[derive(Clone)]
struct ApiState {
    store: Store,
    validation: Validation,
}

fn router(validation: Validation) -> Router {
    let state = ApiState { store: Arc::new(Mutex::new(Vec::new())), validation };
    Router::new()
        .route("/", get(health))
        .route("/contact", get(list_contacts).post(submit_contact))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

/// Same shape the real validator enforces: something@something.tld.
fn email_is_valid(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map(|re| re.is_match(email)).unwrap_or(false)
}

async fn submit_contact(
    State(state): State<ApiState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Validation::Strict = state.validation {
        let missing: Vec<&str> = ["name", "email", "message"]
            .into_iter()
            .filter(|key| body.get(key).and_then(Value::as_str).is_none())
            .collect();
        if !missing.is_empty() {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": format!("missing required fields: {missing:?}") })),
            );
        }
        let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
        if !email_is_valid(email) {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": "value is not a valid email address" })),
            );
        }
    }

    let mut store = state.store.lock().await;
    let id = format!("contact-{:04}", store.len() + 1);
    let record = json!({
        "id": id.clone(),
        "name": body.get("name").cloned().unwrap_or(Value::Null),
        "email": body.get("email").cloned().unwrap_or(Value::Null),
        "company": body.get("company").cloned().unwrap_or(Value::Null),
        "message": body.get("message").cloned().unwrap_or(Value::Null),
    });
    store.insert(0, record);

    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "success": true, "message": "Thank you for reaching out!" })),
    )
}

async fn list_contacts(State(state): State<ApiState>) -> Json<Value> {
    Json(Value::Array(state.store.lock().await.clone()))
}
