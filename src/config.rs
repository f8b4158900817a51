// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Run Configuration
 * Immutable configuration for a single credential-testing run
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::errors::{EngineError, EngineResult};

/// Configuration for one run against a single login endpoint.
///
/// Constructed once before the run starts and never mutated afterwards;
/// shared read-only across all workers. The HTTP session (cookie jar,
/// proxy) derived from this configuration is a single shared object for
/// the whole run, so server-assigned session state persists across
/// attempts from any worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Target login URL the POST requests are sent to
    pub target_url: String,

    /// Form field name carrying the username
    #[serde(default = "default_user_field")]
    pub user_field: String,

    /// Form field name carrying the password
    #[serde(default = "default_pass_field")]
    pub pass_field: String,

    /// Bounded worker pool size
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Delay in seconds a worker sleeps after a failed attempt
    #[serde(default)]
    pub delay_secs: f64,

    /// Optional upstream proxy URL applied to every request
    #[serde(default)]
    pub proxy: Option<String>,

    /// Phrases whose presence in a response body marks the attempt failed
    #[serde(default)]
    pub error_phrases: Vec<String>,

    /// Match individual words of each error phrase instead of the full
    /// phrase. Looser and more false-positive prone; meant to catch
    /// partially obfuscated error text.
    #[serde(default)]
    pub sensitive_error_check: bool,

    /// Treat a redirect away from the login page as a successful login
    #[serde(default)]
    pub redirect_check: bool,

    /// Fetch an anti-forgery token from the login page before each attempt
    #[serde(default)]
    pub fetch_csrf_token: bool,

    /// 0 silences per-attempt progress lines
    #[serde(default = "default_verbosity")]
    pub verbosity: u8,

    /// File the winning credentials are appended to
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_user_field() -> String {
    "username".to_string()
}

fn default_pass_field() -> String {
    "password".to_string()
}

fn default_workers() -> usize {
    50
}

fn default_verbosity() -> u8 {
    1
}

fn default_timeout() -> u64 {
    30
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_url: String::new(),
            user_field: default_user_field(),
            pass_field: default_pass_field(),
            workers: default_workers(),
            delay_secs: 0.0,
            proxy: None,
            error_phrases: Vec::new(),
            sensitive_error_check: false,
            redirect_check: false,
            fetch_csrf_token: false,
            verbosity: default_verbosity(),
            log_file: None,
            request_timeout_secs: default_timeout(),
        }
    }
}

impl RunConfig {
    /// Create a configuration for `target_url` with all defaults
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration before any attempt starts.
    ///
    /// Only configuration-time errors are fatal to a run; everything else
    /// surfaces per attempt.
    pub fn validate(&self) -> EngineResult<()> {
        let url = Url::parse(&self.target_url).map_err(|e| {
            EngineError::Configuration(format!("invalid target URL '{}': {}", self.target_url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(EngineError::Configuration(format!(
                "unsupported URL scheme '{}' for target '{}'",
                url.scheme(),
                self.target_url
            )));
        }

        if self.workers == 0 {
            return Err(EngineError::Configuration(
                "worker count must be at least 1".to_string(),
            ));
        }

        if self.delay_secs < 0.0 || !self.delay_secs.is_finite() {
            return Err(EngineError::Configuration(format!(
                "invalid per-failure delay: {}",
                self.delay_secs
            )));
        }

        if let Some(proxy) = &self.proxy {
            Url::parse(proxy).map_err(|e| {
                EngineError::Configuration(format!("invalid proxy URL '{}': {}", proxy, e))
            })?;
        }

        Ok(())
    }
}
