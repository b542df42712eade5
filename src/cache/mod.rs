//! Cache Module
//!
//! In-memory caching with TTL expiry, oldest-first eviction and tag-based
//! invalidation.

mod age_index;
pub mod aside;
mod clock;
mod entry;
pub mod key;
mod policy;
mod stats;
mod store;
mod subscribers;
mod tag_index;


// Re-export public types
pub use age_index::AgeIndex;
pub use aside::{get_or_fetch, try_get_or_fetch};
pub use clock::{duration_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{response_key, CacheKey};
pub use policy::{TtlPolicy, DEFAULT_CATEGORY};
pub use stats::{CacheCounters, CacheSnapshot, EntrySnapshot};
pub use store::TaggedCache;
pub use subscribers::{Subscribers, Subscription, TagCallback};
pub use tag_index::TagIndex;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
