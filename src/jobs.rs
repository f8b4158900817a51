// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Credential Job Enumeration
 * Cross-product job model over username and password candidate lists
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use serde::{Deserialize, Serialize};

/// One (username, password) candidate under test.
///
/// Immutable once enumerated; consumed exactly once by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub username: String,
    pub password: String,
}

impl std::fmt::Display for CredentialPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.username, self.password)
    }
}

/// The full candidate search space for a run.
///
/// Pairs are yielded lazily in username-major order: every password for
/// usernames[0], then every password for usernames[1], and so on. Repeated
/// entries are kept as-is; no deduplication happens at this layer.
#[derive(Debug, Clone)]
pub struct CredentialSpace {
    usernames: Vec<String>,
    passwords: Vec<String>,
}

impl CredentialSpace {
    /// Build the space from raw candidate lists, trimming surrounding
    /// whitespace from each entry.
    pub fn new(usernames: Vec<String>, passwords: Vec<String>) -> Self {
        Self {
            usernames: usernames.into_iter().map(|u| u.trim().to_string()).collect(),
            passwords: passwords.into_iter().map(|p| p.trim().to_string()).collect(),
        }
    }

    /// Size of the full cross product, without materializing it
    pub fn len(&self) -> usize {
        self.usernames.len() * self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usernames.is_empty() || self.passwords.is_empty()
    }

    /// Borrowing iterator over the cross product
    pub fn iter(&self) -> impl Iterator<Item = CredentialPair> + '_ {
        self.usernames.iter().flat_map(move |username| {
            self.passwords.iter().map(move |password| CredentialPair {
                username: username.clone(),
                password: password.clone(),
            })
        })
    }

    /// Owning iterator over the cross product, for handing the whole job
    /// stream to the dispatch loop
    pub fn into_pairs(self) -> impl Iterator<Item = CredentialPair> {
        let passwords = self.passwords;
        self.usernames.into_iter().flat_map(move |username| {
            passwords
                .clone()
                .into_iter()
                .map(move |password| CredentialPair {
                    username: username.clone(),
                    password,
                })
        })
    }
}
