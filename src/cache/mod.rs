//! Cache Module
//!
//! Provides a thread-safe in-memory cache with sliding and absolute expiration.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, CacheEntryOptions};
pub use stats::CacheStats;
pub use store::{CacheStore, Ticket};
