// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Run Metrics
 * Throughput aggregate finalized once at the end of a run
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use serde::Serialize;
use std::time::Duration;

use crate::jobs::CredentialPair;

/// Final report for one run.
///
/// `total_attempts` is the full cross-product size, even when the run
/// terminated early on a success; `executed_attempts` counts the attempts
/// that actually completed before the stop, and `transport_errors` the
/// subset of those that failed at the network layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetrics {
    pub total_attempts: u64,
    pub executed_attempts: u64,
    pub transport_errors: u64,
    pub elapsed_seconds: f64,
    pub attempts_per_minute: f64,
    pub credentials: Option<CredentialPair>,
}

impl RunMetrics {
    pub fn finalize(
        total_attempts: u64,
        executed_attempts: u64,
        transport_errors: u64,
        elapsed: Duration,
        credentials: Option<CredentialPair>,
    ) -> Self {
        let elapsed_seconds = elapsed.as_secs_f64();
        let attempts_per_minute = if elapsed_seconds > 0.0 {
            total_attempts as f64 / elapsed_seconds * 60.0
        } else {
            0.0
        };

        Self {
            total_attempts,
            executed_attempts,
            transport_errors,
            elapsed_seconds,
            attempts_per_minute,
            credentials,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.credentials.is_some()
    }
}

impl std::fmt::Display for RunMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total attempts: {}", self.total_attempts)?;
        writeln!(f, "Elapsed time: {:.2} seconds", self.elapsed_seconds)?;
        writeln!(f, "Attempts per minute: {:.2}", self.attempts_per_minute)?;
        match &self.credentials {
            Some(pair) => writeln!(
                f,
                "Success! Username: {}, Password: {}",
                pair.username, pair.password
            ),
            None => writeln!(f, "No match found"),
        }
    }
}
