// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The fixed contact-form probe sequence and its sequential driver.

use std::io;

use serde_json::json;

use crate::probe::{Method, ProbeResult, ProbeSpec, Runner};
use crate::report::Reporter;

/// The six probes of the contact-form suite, in execution order.
///
/// The order is fixed for output readability only; no probe depends on an
/// earlier one semantically (the retrieval probe asserts the status code,
/// not the list contents).
pub fn contact_form_suite() -> Vec<ProbeSpec> {
    vec![
        ProbeSpec {
            name: "Health Check",
            method: Method::Get,
            path: "/",
            payload: None,
            expected_status: 200,
        },
        ProbeSpec {
            name: "Valid Contact Submission",
            method: Method::Post,
            path: "/contact",
            payload: Some(json!({
                "name": "Test Recruiter",
                "email": "recruiter@google.com",
                "company": "Google",
                "message": "Interested in discussing SDE roles",
            })),
            expected_status: 201,
        },
        ProbeSpec {
            name: "Contact Without Company",
            method: Method::Post,
            path: "/contact",
            payload: Some(json!({
                "name": "Jane Doe",
                "email": "jane@example.com",
                "message": "Quick question about your projects",
            })),
            expected_status: 201,
        },
        ProbeSpec {
            name: "Invalid Email Validation",
            method: Method::Post,
            path: "/contact",
            payload: Some(json!({
                "name": "Test",
                "email": "invalid-email",
                "message": "Test message",
            })),
            expected_status: 422,
        },
        ProbeSpec {
            name: "Missing Required Fields",
            method: Method::Post,
            path: "/contact",
            payload: Some(json!({ "name": "Test" })),
            expected_status: 422,
        },
        ProbeSpec {
            name: "Retrieve Contact Messages",
            method: Method::Get,
            path: "/contact",
            payload: None,
            expected_status: 200,
        },
    ]
}

/// Run the full suite strictly sequentially, reporting each probe as it
/// completes.
///
/// Returns true iff every probe passed. A failing probe never stops the
/// ones after it; each probe executes exactly once.
pub async fn run_suite<W: io::Write>(runner: &Runner, reporter: &mut Reporter<W>) -> bool {
    let specs = contact_form_suite();
    reporter.header(runner.base());

    let mut results: Vec<ProbeResult> = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        reporter.probe_started(index + 1, specs.len(), spec);
        let result = runner.execute(spec).await;
        reporter.probe_finished(&result);
        results.push(result);
    }

    reporter.summary(&results);
    results.iter().all(|r| r.success)
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
