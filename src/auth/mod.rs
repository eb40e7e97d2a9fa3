//! API token authentication for TaskFlow.
//!
//! Every API route is protected by a signed bearer token carrying the
//! user identifier and an expiry. [`token::TokenCodec`] issues and
//! verifies tokens; verification failures are distinguishable so the
//! caller can log the precise reason while the API surface collapses
//! them all to an authentication failure.

pub mod token;

pub use token::{TOKEN_TTL_SECS, TokenCodec, TokenError};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wraps a raw user identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
