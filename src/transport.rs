// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Login Transport
 * One authenticated-attempt HTTP exchange per call over a shared session
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use reqwest::Client;
use std::time::Duration;
use tracing::warn;

use crate::config::RunConfig;
use crate::errors::{EngineError, EngineResult, NetworkError};
use crate::jobs::CredentialPair;
use crate::token::CSRF_FIELD;

/// Realistic browser User-Agents to avoid detection
const BROWSER_USER_AGENTS: &[&str] = &[
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Chrome on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    // Safari on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// Get a realistic browser User-Agent (rotates across runs)
fn get_browser_user_agent() -> &'static str {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let index = COUNTER.fetch_add(1, Ordering::Relaxed) % BROWSER_USER_AGENTS.len();
    BROWSER_USER_AGENTS[index]
}

/// Maximum response body size (10MB) to prevent memory exhaustion
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Client for login attempts against a single target.
///
/// Wraps one `reqwest::Client` with a shared cookie jar: server-assigned
/// session state set by any worker's response is visible to every
/// subsequent request in the run. The optional upstream proxy applies to
/// all requests.
#[derive(Clone)]
pub struct LoginClient {
    client: Client,
    target_url: String,
    user_field: String,
    pass_field: String,
}

impl LoginClient {
    pub fn new(config: &RunConfig) -> EngineResult<Self> {
        // Certificate validation stays on by default; flip only for
        // dev/testing against self-signed targets.
        let accept_invalid_certs = std::env::var("ACCEPT_INVALID_CERTS")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        if accept_invalid_certs {
            warn!("Certificate validation is DISABLED - dev/testing use only");
        }

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(get_browser_user_agent())
            .cookie_store(true)
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                EngineError::Configuration(format!("invalid proxy '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| EngineError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            target_url: config.target_url.clone(),
            user_field: config.user_field.clone(),
            pass_field: config.pass_field.clone(),
        })
    }

    /// Fetch the login page itself, e.g. for anti-forgery token extraction
    pub async fn fetch_login_page(&self) -> Result<LoginResponse, NetworkError> {
        let response = self.client.get(&self.target_url).send().await?;
        Self::read_response(response).await
    }

    /// Submit one login attempt.
    ///
    /// Builds a form-encoded body mapping the configured field names to the
    /// pair's values, plus a `csrf_token` field when a token was supplied,
    /// and POSTs it to the target. Network failures surface as errors for
    /// this attempt only.
    pub async fn submit(
        &self,
        pair: &CredentialPair,
        token: Option<&str>,
    ) -> Result<LoginResponse, NetworkError> {
        let mut form: Vec<(&str, &str)> = vec![
            (self.user_field.as_str(), pair.username.as_str()),
            (self.pass_field.as_str(), pair.password.as_str()),
        ];
        if let Some(token) = token {
            form.push((CSRF_FIELD, token));
        }

        let response = self.client.post(&self.target_url).form(&form).send().await?;
        Self::read_response(response).await
    }

    async fn read_response(response: reqwest::Response) -> Result<LoginResponse, NetworkError> {
        let status_code = response.status().as_u16();
        // resolved after any redirects the client followed
        let final_url = response.url().to_string();

        let body_bytes = response.bytes().await.unwrap_or_default();
        let body = if body_bytes.len() > MAX_BODY_SIZE {
            String::from_utf8_lossy(&body_bytes[..MAX_BODY_SIZE]).to_string()
        } else {
            String::from_utf8_lossy(&body_bytes).to_string()
        };

        Ok(LoginResponse {
            status_code,
            final_url,
            body,
        })
    }
}

/// Response descriptor for one attempt
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub status_code: u16,
    /// URL the exchange ended at, post-redirect
    pub final_url: String,
    pub body: String,
}

impl LoginResponse {
    pub fn contains(&self, pattern: &str) -> bool {
        self.body.contains(pattern)
    }
}
