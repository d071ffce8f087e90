//! Local key-value store for feed snapshots
//!
//! `CacheManager` persists one JSON file per key in the user's cache directory.
//! `ReadThroughCache` layers the freshness-window policy on top of it and is the
//! only way feeds touch the store.

mod manager;
mod read_through;

pub use manager::{CacheManager, CachedData};
pub use read_through::{Fetched, ReadThroughCache, Source};
