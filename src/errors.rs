// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Engine Error Types
 * Production-ready error handling with thiserror
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::time::Duration;
use thiserror::Error;

/// Main engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration errors - fatal, surfaced before any attempt starts
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network-related errors on an individual attempt
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Success-record log file errors
    #[error("Log file error for {path}: {reason}")]
    LogFile { path: String, reason: String },
}

/// Network-specific errors with detailed classification
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Connection timeout after {timeout:?} to {url}")]
    ConnectionTimeout { url: String, timeout: Duration },

    #[error("Connection refused for {url}")]
    ConnectionRefused { url: String },

    #[error("TLS handshake failed for {url}: {reason}")]
    TlsHandshakeFailed { url: String, reason: String },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Network error: {0}")]
    Other(String),
}

impl NetworkError {
    /// Whether the request failed before any response bytes arrived
    pub fn is_connect(&self) -> bool {
        matches!(
            self,
            NetworkError::ConnectionRefused { .. } | NetworkError::TlsHandshakeFailed { .. }
        )
    }
}

/// Convert reqwest errors to our error types
impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();

        if err.is_timeout() {
            NetworkError::ConnectionTimeout {
                url,
                timeout: Duration::from_secs(30),
            }
        } else if err.is_connect() {
            NetworkError::ConnectionRefused { url }
        } else if err.is_builder() {
            NetworkError::InvalidUrl { url }
        } else {
            NetworkError::Other(err.to_string())
        }
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
