//! Time and randomness sources for OAuth 1.0 signing.
//!
//! Strategies never read the system clock or RNG directly. They draw a
//! timestamp from a [`Clock`] and a nonce from a [`NonceSource`] on every
//! application, which lets tests pin both values.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;

/// Minimum number of random bytes in a generated nonce.
pub const MIN_NONCE_BYTES: usize = 16;

/// Source of the `oauth_timestamp` value.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Seconds since the Unix epoch.
    fn unix_seconds(&self) -> u64;
}

/// Source of the `oauth_nonce` value.
pub trait NonceSource: Send + Sync + fmt::Debug {
    /// A fresh single-use nonce.
    fn nonce(&self) -> String;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> u64 {
        // A clock set before 1970 yields 0.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> u64 {
        self.0
    }
}

/// Hex-encoded nonces from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomNonce {
    bytes: usize,
}

impl RandomNonce {
    /// Nonces of `bytes` random bytes, never fewer than [`MIN_NONCE_BYTES`].
    pub fn with_len(bytes: usize) -> Self {
        Self {
            bytes: bytes.max(MIN_NONCE_BYTES),
        }
    }
}

impl Default for RandomNonce {
    fn default() -> Self {
        Self::with_len(MIN_NONCE_BYTES)
    }
}

impl NonceSource for RandomNonce {
    fn nonce(&self) -> String {
        let mut buf = vec![0u8; self.bytes];
        rand::rng().fill_bytes(&mut buf);
        hex::encode(buf)
    }
}

/// Always returns the same nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedNonce(pub String);

impl FixedNonce {
    pub fn new(nonce: impl Into<String>) -> Self {
        Self(nonce.into())
    }
}

impl NonceSource for FixedNonce {
    fn nonce(&self) -> String {
        self.0.clone()
    }
}
