// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Credential Attempt Engine
 * Bounded-concurrency dispatch loop with early termination on success
 *
 * Jobs are streamed through a semaphore-bounded pool rather than
 * materialized up front, so a millions-of-pairs search space never sits
 * in memory at once. Outcomes are consumed in completion order; the first
 * Success ends the run. Cancellation is best-effort: the stop signal is
 * checked before an attempt starts, never mid-flight, so requests already
 * dispatched run to completion in the background and their results are
 * discarded.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error, info, warn};

use crate::classifier::{PhraseClassifier, SuccessClassifier, Verdict};
use crate::config::RunConfig;
use crate::errors::{EngineError, EngineResult, NetworkError};
use crate::jobs::{CredentialPair, CredentialSpace};
use crate::metrics::RunMetrics;
use crate::token;
use crate::transport::LoginClient;

/// Tagged result of one attempt, fanned in to the dispatch loop.
///
/// Transport errors are a distinct variant: a connection failure must
/// never read as a valid login, and must stay distinguishable from an
/// ordinary failed guess when it is surfaced.
#[derive(Debug)]
pub enum AttemptOutcome {
    Success(CredentialPair),
    Failure,
    Error(NetworkError),
}

/// Engine for one credential-testing run.
pub struct CredentialEngine {
    config: Arc<RunConfig>,
    client: LoginClient,
    classifier: Arc<dyn SuccessClassifier>,
}

impl CredentialEngine {
    /// Build an engine, failing fast on configuration errors
    pub fn new(config: RunConfig) -> EngineResult<Self> {
        config.validate()?;
        let client = LoginClient::new(&config)?;

        Ok(Self {
            config: Arc::new(config),
            client,
            classifier: Arc::new(PhraseClassifier),
        })
    }

    /// Replace the built-in phrase/redirect heuristic with a custom
    /// classification policy
    pub fn with_classifier(mut self, classifier: Arc<dyn SuccessClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the full search space to the first success or exhaustion.
    ///
    /// The reported `total_attempts` is always the cross-product size,
    /// whether or not the run stopped early; `executed_attempts` carries
    /// the number that actually completed.
    pub async fn run(&self, space: CredentialSpace) -> EngineResult<RunMetrics> {
        let total = space.len() as u64;
        info!(
            "Starting run against {}: {} candidate pairs, {} workers",
            self.config.target_url, total, self.config.workers
        );

        let start = Instant::now();
        let cancelled = Arc::new(AtomicBool::new(false));
        let executed = Arc::new(AtomicU64::new(0));
        let semaphore = Arc::new(Semaphore::new(self.config.workers));
        let (tx, mut rx) = mpsc::unbounded_channel::<AttemptOutcome>();

        // Submission task: walks the cross product, acquiring a pool slot
        // per job. Holds the only original sender; once it finishes and
        // every in-flight worker drops its clone, the channel closes and
        // the consume loop below sees exhaustion.
        let _submitter = {
            let cancelled = Arc::clone(&cancelled);
            let executed = Arc::clone(&executed);
            let semaphore = Arc::clone(&semaphore);
            let config = Arc::clone(&self.config);
            let classifier = Arc::clone(&self.classifier);
            let client = self.client.clone();

            tokio::spawn(async move {
                for pair in space.into_pairs() {
                    if cancelled.load(Ordering::Relaxed) {
                        debug!("stop signal observed, no further attempts submitted");
                        break;
                    }

                    let permit = match Arc::clone(&semaphore).acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => break,
                    };

                    let cancelled = Arc::clone(&cancelled);
                    let executed = Arc::clone(&executed);
                    let config = Arc::clone(&config);
                    let classifier = Arc::clone(&classifier);
                    let client = client.clone();
                    let tx = tx.clone();

                    tokio::spawn(async move {
                        let _permit = permit;

                        // checked once more here: the permit wait above can
                        // straddle the stop signal
                        if cancelled.load(Ordering::Relaxed) {
                            return;
                        }

                        let outcome = attempt(&client, classifier.as_ref(), &config, pair).await;
                        executed.fetch_add(1, Ordering::Relaxed);

                        if matches!(outcome, AttemptOutcome::Failure) && config.delay_secs > 0.0 {
                            tokio::time::sleep(Duration::from_secs_f64(config.delay_secs)).await;
                        }

                        // the receiver is gone once a winner was consumed;
                        // late results are discarded
                        let _ = tx.send(outcome);
                    });
                }
            })
        };

        let mut transport_errors = 0u64;
        let mut winner: Option<CredentialPair> = None;

        while let Some(outcome) = rx.recv().await {
            match outcome {
                AttemptOutcome::Success(pair) => {
                    info!("Valid credentials found for user '{}'", pair.username);
                    cancelled.store(true, Ordering::Relaxed);
                    winner = Some(pair);
                    break;
                }
                AttemptOutcome::Failure => {}
                AttemptOutcome::Error(e) => {
                    warn!("Attempt failed at the transport layer: {}", e);
                    transport_errors += 1;
                }
            }
        }

        let elapsed = start.elapsed();
        if winner.is_none() {
            info!("Search space exhausted with no match");
        }

        let metrics = RunMetrics::finalize(
            total,
            executed.load(Ordering::Relaxed),
            transport_errors,
            elapsed,
            winner,
        );

        if let Some(pair) = &metrics.credentials {
            if let Some(path) = &self.config.log_file {
                if let Err(e) = append_success_record(path, pair) {
                    error!("{}", e);
                }
            }
        }

        Ok(metrics)
    }
}

/// One worker execution: optional token fetch, login POST, classification
async fn attempt(
    client: &LoginClient,
    classifier: &dyn SuccessClassifier,
    config: &RunConfig,
    pair: CredentialPair,
) -> AttemptOutcome {
    if config.verbosity > 0 {
        info!("Trying {}", pair);
    }

    let csrf_token = if config.fetch_csrf_token {
        match token::fetch_csrf_token(client).await {
            Ok(token) => token,
            Err(e) => return AttemptOutcome::Error(e),
        }
    } else {
        None
    };

    match client.submit(&pair, csrf_token.as_deref()).await {
        Ok(response) => {
            debug!(
                status = response.status_code,
                final_url = %response.final_url,
                "attempt completed"
            );
            match classifier.classify(&response, config) {
                Verdict::Success => AttemptOutcome::Success(pair),
                Verdict::Failure => AttemptOutcome::Failure,
            }
        }
        Err(e) => AttemptOutcome::Error(e),
    }
}

/// Append the winning pair to the configured log file.
///
/// Called at most once per run, when the run-ending success is consumed.
fn append_success_record(path: &Path, pair: &CredentialPair) -> EngineResult<()> {
    use std::io::Write;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| EngineError::LogFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    writeln!(
        file,
        "Success! Username: {}, Password: {}",
        pair.username, pair.password
    )
    .map_err(|e| EngineError::LogFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}
