//! Cache Entry Module
//!
//! Defines individual cache entries and the expiration options applied to them.

use std::time::Duration;

// == Entry Options ==
/// Expiration policy applied when an entry is written.
///
/// Both windows are optional. When both are set, whichever deadline comes
/// first wins, so sliding access can never keep an entry alive past its
/// absolute deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheEntryOptions {
    /// Idle window; reset by every successful read or write of the key
    pub sliding_expiration: Option<Duration>,
    /// Hard lifetime measured from insertion
    pub absolute_expiration: Option<Duration>,
}

impl CacheEntryOptions {
    /// Creates options with no expiration at all.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sliding_expiration(mut self, window: Duration) -> Self {
        self.sliding_expiration = Some(window);
        self
    }

    pub fn with_absolute_expiration(mut self, lifetime: Duration) -> Self {
        self.absolute_expiration = Some(lifetime);
        self
    }
}

// == Cache Entry ==
/// A single cache entry with value and expiration metadata.
///
/// All timestamps are Unix milliseconds as reported by the store's clock.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Timestamp of the last successful read or write
    pub last_accessed: u64,
    /// Sliding window in milliseconds, None = no idle expiry
    pub sliding_ms: Option<u64>,
    /// Absolute deadline, None = no hard expiry
    pub expires_at: Option<u64>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped at `now` with the given options.
    pub fn new(value: V, options: &CacheEntryOptions, now: u64) -> Self {
        Self {
            value,
            last_accessed: now,
            sliding_ms: options.sliding_expiration.map(duration_ms),
            expires_at: options
                .absolute_expiration
                .map(|lifetime| now.saturating_add(duration_ms(lifetime))),
        }
    }

    // == Effective Deadline ==
    /// Returns the instant this entry dies if it is not touched again.
    ///
    /// The sliding deadline is clamped to the absolute one.
    pub fn deadline(&self) -> Option<u64> {
        let sliding = self
            .sliding_ms
            .map(|window| self.last_accessed.saturating_add(window));

        match (sliding, self.expires_at) {
            (Some(s), Some(a)) => Some(s.min(a)),
            (Some(s), None) => Some(s),
            (None, Some(a)) => Some(a),
            (None, None) => None,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now` reaches its deadline.
    pub fn is_expired(&self, now: u64) -> bool {
        match self.deadline() {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Touch ==
    /// Restarts the sliding window from `now`. The absolute deadline is untouched.
    pub fn touch(&mut self, now: u64) {
        self.last_accessed = now;
    }
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
