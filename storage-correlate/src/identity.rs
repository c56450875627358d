// SPDX-License-Identifier: GPL-3.0-only

//! Identity normalization for disk serials and virtual disk UUIDs.
//!
//! The platform reports disk UUIDs hyphenated in fixed byte groups while guest
//! firmware reports the same value as a free-form serial. Dropping spaces and
//! hyphens and lowercasing lets the two compare equal.
//!
//! This is a heuristic: it does not prove two disks are the same, it only
//! makes the common formatting differences irrelevant.

use serde::{Deserialize, Serialize};

/// Canonical comparison key derived from a serial number or UUID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty key carries no identity and never joins.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remove every space and hyphen, then lowercase.
pub fn normalize_identity(raw: &str) -> IdentityKey {
    IdentityKey(
        raw.chars()
            .filter(|c| *c != ' ' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect(),
    )
}
