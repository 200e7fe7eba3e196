//! Wire types for the tag protection endpoints.
//!
//! # Design
//! Server-assigned fields are `Option` rather than sentinel values. serde_json
//! decodes both `null` and a missing key to `None`, so the two states collapse
//! into one "not present" value on the way in. On the way out `None` is
//! written as `null`, which is what the server sends.
//!
//! The mock-server crate defines its own copies of these shapes; integration
//! tests catch schema drift between the two.

use serde::{Deserialize, Serialize};

/// A tag protection rule on a repository, as returned by the server.
///
/// Values are snapshots of server state. Nothing in this crate mutates one
/// after it is decoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagProtection {
    pub id: Option<i64>,
    /// Glob matched against tag names, e.g. `v*`.
    pub pattern: Option<String>,
}

/// Request payload for creating a tag protection rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagProtectionRequest {
    pub pattern: String,
}

impl TagProtectionRequest {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}
