// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-probe execution: one HTTP exchange checked against an expected
//! status code.
//!
//! Transport failures (DNS, refused connection, timeout) are captured in
//! the [`ProbeResult`] rather than propagated, so one dead probe can never
//! abort the rest of the suite.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;

/// HTTP methods the suite issues. Anything else is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fixed request/response check against the API under test.
///
/// Specs are built once at startup and never mutated. `payload` is sent
/// as a JSON request body on POST only; GET probes never carry a body.
#[derive(Debug, Clone)]
pub struct ProbeSpec {
    pub name: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub payload: Option<Value>,
    pub expected_status: u16,
}

/// Response body as received: JSON when the text parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    /// Try a JSON parse of `text`, falling back to the raw text verbatim.
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }
}

/// Why a failed probe failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The exchange never completed (DNS, refused connection, timeout).
    Transport,
    /// The exchange completed with a status other than the expected one.
    StatusMismatch,
}

/// Captured outcome of one probe. Built once, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub name: &'static str,
    pub method: Method,
    pub url: String,
    pub expected_status: u16,
    /// Observed status; `None` on transport failure.
    pub status: Option<u16>,
    pub body: Option<Body>,
    /// Transport failure description; `None` on a completed exchange.
    pub error: Option<String>,
    pub success: bool,
}

impl ProbeResult {
    pub fn failure_kind(&self) -> Option<FailureKind> {
        if self.success {
            return None;
        }
        match self.status {
            None => Some(FailureKind::Transport),
            Some(_) => Some(FailureKind::StatusMismatch),
        }
    }
}

/// Issues probes against a fixed base URL with a fixed per-request timeout.
pub struct Runner {
    client: reqwest::Client,
    base_url: String,
}

impl Runner {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, base_url: config.base().to_owned() })
    }

    pub fn base(&self) -> &str {
        &self.base_url
    }

    /// Execute one probe and capture the outcome.
    ///
    /// Success means the observed status equals the expected one, nothing
    /// more; status classes (4xx vs 5xx) are not differentiated. Each call
    /// issues exactly one request, with no retries.
    pub async fn execute(&self, spec: &ProbeSpec) -> ProbeResult {
        let url = format!("{}{}", self.base_url, spec.path);
        let request = match (spec.method, &spec.payload) {
            (Method::Get, _) => self.client.get(&url),
            (Method::Post, Some(payload)) => self.client.post(&url).json(payload),
            (Method::Post, None) => self.client.post(&url),
        };

        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let success = status == spec.expected_status;
                let body = match response.text().await {
                    Ok(text) => Some(Body::from_text(text)),
                    Err(e) => {
                        warn!(%url, err = %e, "failed to read response body");
                        None
                    }
                };
                debug!(
                    %url,
                    method = %spec.method,
                    status,
                    expected = spec.expected_status,
                    success,
                    "probe completed",
                );
                ProbeResult {
                    name: spec.name,
                    method: spec.method,
                    url,
                    expected_status: spec.expected_status,
                    status: Some(status),
                    body,
                    error: None,
                    success,
                }
            }
            Err(e) => {
                warn!(%url, method = %spec.method, err = %e, "probe transport failure");
                ProbeResult {
                    name: spec.name,
                    method: spec.method,
                    url,
                    expected_status: spec.expected_status,
                    status: None,
                    body: None,
                    error: Some(e.to_string()),
                    success: false,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
