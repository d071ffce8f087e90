//! Read-through cache shared by every feed
//!
//! A lookup is parameterised by a key, a freshness window and a fetch function.
//! A fresh entry short-circuits the fetch; anything else costs exactly one call.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use super::CacheManager;

/// Where a value handed back by [`ReadThroughCache::get_or_fetch`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Fetched from the network just now
    Network,
    /// Served from a cache entry younger than the freshness window
    Cache,
    /// The fetch failed and an older cache entry was served instead
    Stale {
        /// Message of the failure that forced the fallback
        error: String,
    },
}

/// A value together with its provenance
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub source: Source,
    /// When the request that produced `data` was issued
    pub fetched_at: DateTime<Utc>,
}

impl<T> Fetched<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            data: f(self.data),
            source: self.source,
            fetched_at: self.fetched_at,
        }
    }
}

/// Generic read-through layer over the on-disk [`CacheManager`]
#[derive(Debug, Clone, Default)]
pub struct ReadThroughCache {
    store: Option<CacheManager>,
}

impl ReadThroughCache {
    pub fn new(store: Option<CacheManager>) -> Self {
        Self { store }
    }

    /// A cache that never stores anything; every lookup hits the network
    pub fn disabled() -> Self {
        Self { store: None }
    }

    /// Returns the entry for `key` if it is younger than `window`, otherwise
    /// calls `fetch` once.
    ///
    /// A successful fetch is written back stamped with the time the request was
    /// issued. A failed fetch falls back to any older entry (reported as
    /// [`Source::Stale`]) and only surfaces the error when nothing is cached.
    pub async fn get_or_fetch<T, E, F, Fut>(
        &self,
        key: &str,
        window: Duration,
        fetch: F,
    ) -> Result<Fetched<T>, E>
    where
        T: Serialize + DeserializeOwned,
        E: Display,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let cached = self.store.as_ref().and_then(|store| store.read::<T>(key));

        let cached = match cached {
            Some(entry) if entry.is_fresh(window) => {
                tracing::debug!(key, cached_at = %entry.cached_at, "cache hit");
                return Ok(Fetched {
                    data: entry.data,
                    source: Source::Cache,
                    fetched_at: entry.cached_at,
                });
            }
            other => other,
        };

        let issued_at = Utc::now();
        tracing::debug!(key, "cache miss, fetching");

        match fetch().await {
            Ok(data) => {
                if let Some(store) = &self.store {
                    if let Err(e) = store.write_at(key, &data, issued_at) {
                        tracing::warn!(key, error = %e, "failed to write cache entry");
                    }
                }
                Ok(Fetched {
                    data,
                    source: Source::Network,
                    fetched_at: issued_at,
                })
            }
            Err(err) => match cached {
                Some(entry) => {
                    tracing::warn!(key, error = %err, "fetch failed, serving stale cache entry");
                    Ok(Fetched {
                        data: entry.data,
                        source: Source::Stale {
                            error: err.to_string(),
                        },
                        fetched_at: entry.cached_at,
                    })
                }
                None => Err(err),
            },
        }
    }
}
