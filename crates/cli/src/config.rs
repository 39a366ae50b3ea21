// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use clap::Parser;
use url::Url;

/// Smoke-test runner for the contact-form REST API.
#[derive(Debug, Parser)]
#[command(name = "formprobe", version, about)]
pub struct Config {
    /// Base URL of the API under test (e.g. https://host/api).
    #[arg(long, env = "FORMPROBE_BASE_URL")]
    pub base_url: String,

    /// Per-probe request timeout in seconds.
    #[arg(long, env = "FORMPROBE_TIMEOUT_SECS", default_value = "10")]
    pub timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "FORMPROBE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Log format (json or text).
    #[arg(long, env = "FORMPROBE_LOG_FORMAT", default_value = "text")]
    pub log_format: String,
}

impl Config {
    /// Config with CLI defaults for an explicit base URL. Used when the
    /// runner is embedded (tests, harnesses) instead of driven by clap.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 10,
            log_level: "warn".to_owned(),
            log_format: "text".to_owned(),
        }
    }

    /// Validate settings clap cannot check on its own.
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| anyhow::anyhow!("invalid base URL {:?}: {e}", self.base_url))?;
        match url.scheme() {
            "http" | "https" => {}
            other => anyhow::bail!("unsupported base URL scheme: {other}"),
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout must be at least 1 second");
        }
        Ok(())
    }

    /// Base URL with any trailing slashes trimmed, so `base + path`
    /// concatenation yields exactly one slash at the join.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
