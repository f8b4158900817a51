// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Hauki Engine Library
 * Concurrent HTTP login credential-testing engine
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod classifier;
pub mod config;
pub mod engine;
pub mod jobs;
pub mod metrics;
pub mod token;
pub mod transport;
pub mod wordlist;

// Production error handling
pub mod errors;
