// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Success Classifier
 * Pure decision logic mapping a login response to Success/Failure
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use url::Url;

use crate::config::RunConfig;
use crate::transport::LoginResponse;

/// Outcome of classifying one response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Success,
    Failure,
}

/// Pluggable classification policy.
///
/// Classification is total: every response maps to a verdict, it never
/// fails. The engine uses [`PhraseClassifier`] unless a caller supplies an
/// alternative.
pub trait SuccessClassifier: Send + Sync {
    fn classify(&self, response: &LoginResponse, config: &RunConfig) -> Verdict;
}

/// Default heuristic classifier.
///
/// 1. Any configured error phrase present in the body -> Failure. With
///    `sensitive_error_check`, a phrase counts as present when any single
///    whitespace-separated word of it appears anywhere in the body.
/// 2. No phrase matched and `redirect_check` on -> Success only when the
///    exchange ended at a different URL than the one requested.
/// 3. No phrase matched and `redirect_check` off -> Success.
///
/// An empty phrase list with `redirect_check` off classifies everything as
/// Success; a degenerate but valid configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseClassifier;

impl PhraseClassifier {
    fn phrase_matches(body: &str, phrase: &str, sensitive: bool) -> bool {
        if sensitive {
            phrase.split_whitespace().any(|word| body.contains(word))
        } else {
            body.contains(phrase)
        }
    }

    fn redirected_away(final_url: &str, requested_url: &str) -> bool {
        // compare parsed forms so trailing-slash and percent-encoding
        // differences don't register as a redirect
        match (Url::parse(final_url), Url::parse(requested_url)) {
            (Ok(a), Ok(b)) => a != b,
            _ => final_url != requested_url,
        }
    }
}

impl SuccessClassifier for PhraseClassifier {
    fn classify(&self, response: &LoginResponse, config: &RunConfig) -> Verdict {
        for phrase in &config.error_phrases {
            if Self::phrase_matches(&response.body, phrase, config.sensitive_error_check) {
                return Verdict::Failure;
            }
        }

        if config.redirect_check {
            if Self::redirected_away(&response.final_url, &config.target_url) {
                Verdict::Success
            } else {
                Verdict::Failure
            }
        } else {
            Verdict::Success
        }
    }
}
