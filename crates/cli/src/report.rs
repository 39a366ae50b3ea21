// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable progress and summary output for a suite run.
//!
//! The output is informational only, not a machine-readable contract.
//! Everything goes through an injected writer so tests can capture it;
//! write errors to the sink are deliberately ignored.

use std::io;

use serde_json::{Map, Value};

use crate::probe::{Body, ProbeResult, ProbeSpec};

const BANNER: &str =
    "================================================================================";
const RULE: &str = "----------------------------------------";

pub struct Reporter<W: io::Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Reporter::new(io::stdout())
    }
}

impl<W: io::Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Hand back the sink, for callers that capture output.
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn header(&mut self, base_url: &str) {
        let _ = writeln!(self.out, "{BANNER}");
        let _ = writeln!(self.out, "CONTACT FORM API SMOKE TEST");
        let _ = writeln!(self.out, "{BANNER}");
        let _ = writeln!(self.out, "target: {base_url}");
        let _ = writeln!(self.out);
    }

    pub fn probe_started(&mut self, index: usize, total: usize, spec: &ProbeSpec) {
        let _ = writeln!(
            self.out,
            "Probe {index}/{total}: {} {} ({})",
            spec.method, spec.path, spec.name,
        );
        let _ = writeln!(self.out, "{RULE}");
    }

    pub fn probe_finished(&mut self, result: &ProbeResult) {
        let status = match result.status {
            Some(status) => status.to_string(),
            None => "n/a".to_owned(),
        };
        if result.success {
            let _ = writeln!(self.out, "PASS: status {status}");
        } else {
            let _ = writeln!(
                self.out,
                "FAIL: status {status} (expected {})",
                result.expected_status,
            );
        }
        self.detail(result);
        let _ = writeln!(self.out);
    }

    /// Diagnostic lines under the pass/fail verdict.
    ///
    /// Acceptance responses are expected to carry `id`, `success`, and
    /// `message`; the retrieval response a JSON array of records with a
    /// `name` field. Both are read defensively and printed verbatim.
    /// A failing probe always gets the full body, not the three-field
    /// acceptance rendering.
    fn detail(&mut self, result: &ProbeResult) {
        if let Some(err) = &result.error {
            let _ = writeln!(self.out, "   error: {err}");
            return;
        }
        match &result.body {
            Some(Body::Json(Value::Object(obj))) => {
                if result.success && ["id", "success", "message"].iter().any(|k| obj.contains_key(*k)) {
                    let _ = writeln!(self.out, "   id: {}", field(obj, "id"));
                    let _ = writeln!(self.out, "   success: {}", field(obj, "success"));
                    let _ = writeln!(self.out, "   message: {}", field(obj, "message"));
                } else {
                    let _ = writeln!(self.out, "   body: {}", Value::Object(obj.clone()));
                }
            }
            Some(Body::Json(Value::Array(items))) => {
                let _ = writeln!(self.out, "   messages: {}", items.len());
                if let Some(Value::Object(first)) = items.first() {
                    let _ = writeln!(self.out, "   latest from: {}", field(first, "name"));
                }
            }
            Some(Body::Json(other)) => {
                let _ = writeln!(self.out, "   body: {other}");
            }
            Some(Body::Text(text)) => {
                let _ = writeln!(self.out, "   body: {text}");
            }
            None => {}
        }
    }

    pub fn summary(&mut self, results: &[ProbeResult]) {
        let _ = writeln!(self.out, "{BANNER}");
        let _ = writeln!(self.out, "SUMMARY");
        let _ = writeln!(self.out, "{BANNER}");
        for result in results {
            let verdict = if result.success { "PASS" } else { "FAIL" };
            let _ = writeln!(self.out, "{verdict}  {}", result.name);
        }
        let passed = results.iter().filter(|r| r.success).count();
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "overall: {passed}/{} probes passed", results.len());
        if passed == results.len() {
            let _ = writeln!(self.out, "all probes passed; the contact form API is healthy");
        } else {
            let _ = writeln!(self.out, "some probes failed; see details above");
        }
    }
}

/// Render a field for diagnostics: strings verbatim (unquoted), other JSON
/// values in their compact form, absent fields as `n/a`.
fn field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
        None => "n/a".to_owned(),
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
