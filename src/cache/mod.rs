//! Result cache module
//!
//! Keeps the records of a fully retrieved list for a fixed window so
//! repeated requests for the same list do not hit the network again.
//!
//! # Overview
//!
//! The cache module provides:
//! - `CacheEntry` / `CacheKey` - what is stored and under which key
//! - `CacheStore` - keyed storage, in memory (`MemoryStore`) or as a JSON file (`FileStore`)
//! - `Clock` - injectable time source
//! - `ResultCache` - get-or-fetch over a store
//!
//! Entries are only ever written whole, after a retrieval succeeded.

mod clock;
mod result_cache;
mod store;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use result_cache::ResultCache;
pub use store::{CacheStore, FileStore, MemoryStore};
pub use types::{CacheEntry, CacheKey, CacheSnapshot};
