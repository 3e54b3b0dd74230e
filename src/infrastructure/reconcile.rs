//! Repository reconciliation policy
//!
//! Every repository routes its calls through a [`Reconciler`], which owns the
//! rules for combining the remote data source, the local cache and the
//! connectivity probe:
//!
//! - reads probe connectivity (per [`ReadPolicy`]), prefer the remote, write
//!   the result through to the cache and fall back to the cached copy when the
//!   remote fails with a server or network error;
//! - writes refuse to run offline and never fall back to the cache;
//! - cache side effects are best-effort: their failures are logged and
//!   discarded, never turning a successful operation into a failure.
//!
//! Nothing here retries. Each failure is final for that call.

use crate::domain::shared::{Failure, Result};
use crate::infrastructure::connectivity::ConnectivityProbe;
use crate::infrastructure::error::{DataSourceError, DataSourceResult};
use crate::infrastructure::local::LocalCache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Reported when offline with nothing cached
pub const OFFLINE_NO_CACHE: &str = "No internet connection and no cached data available";

/// How a read consults the cache and the connectivity probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Probe connectivity, then remote with cache fallback
    NetworkFirst,
    /// Serve a cache hit without touching the network, otherwise `NetworkFirst`
    CacheFirst,
    /// Skip the probe; remote with cache fallback
    Direct,
}

/// Cache entry a read may write through to and fall back on
pub type CacheSlot<'a, M> = Option<(&'a LocalCache<M>, &'a str)>;

/// Applies the reconciliation policy on behalf of a repository
#[derive(Clone)]
pub struct Reconciler {
    connectivity: Arc<dyn ConnectivityProbe>,
}

impl Reconciler {
    pub fn new(connectivity: Arc<dyn ConnectivityProbe>) -> Self {
        Self { connectivity }
    }

    pub async fn is_online(&self) -> bool {
        self.connectivity.is_online().await
    }

    /// Read path
    pub async fn read<M, E, F, Fut>(
        &self,
        op: &str,
        policy: ReadPolicy,
        cache: CacheSlot<'_, M>,
        remote: F,
        map: impl FnOnce(M) -> E,
    ) -> Result<E>
    where
        M: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = DataSourceResult<M>>,
    {
        if policy == ReadPolicy::CacheFirst {
            if let Some(cached) = cached_value(op, cache).await {
                debug!("{}: served from cache", op);
                return Ok(map(cached));
            }
        }

        if policy != ReadPolicy::Direct && !self.connectivity.is_online().await {
            return match cached_value(op, cache).await {
                Some(cached) => {
                    warn!("{}: offline, serving cached data", op);
                    Ok(map(cached))
                }
                None => Err(Failure::network(OFFLINE_NO_CACHE)),
            };
        }

        match remote().await {
            Ok(model) => {
                if let Some((cache, id)) = cache {
                    best_effort(op, cache.put(id, &model)).await;
                }
                debug!("{}: fetched from remote", op);
                Ok(map(model))
            }
            Err(e) if e.allows_cache_fallback() => match cached_value(op, cache).await {
                Some(cached) => {
                    warn!("{}: remote failed ({}), serving cached data", op, e);
                    Ok(map(cached))
                }
                None => Err(translate(op, e)),
            },
            Err(e) => Err(translate(op, e)),
        }
    }

    /// Write path. `action` completes the sentence "Cannot ... while offline".
    pub async fn write<T, F, Fut>(&self, action: &str, remote: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = DataSourceResult<T>>,
    {
        if !self.connectivity.is_online().await {
            debug!("{}: refused while offline", action);
            return Err(Failure::network(format!("Cannot {} while offline", action)));
        }
        remote().await.map_err(|e| translate(action, e))
    }
}

/// Local-only operation; cache errors surface as `Failure::Cache`
pub async fn local<T, Fut>(op: &str, operation: Fut) -> Result<T>
where
    Fut: Future<Output = DataSourceResult<T>>,
{
    operation.await.map_err(|e| translate(op, e))
}

/// Await a cache side effect, logging and discarding its failure
pub async fn best_effort<Fut>(label: &str, side_effect: Fut)
where
    Fut: Future<Output = DataSourceResult<()>>,
{
    if let Err(e) = side_effect.await {
        warn!("{}: ignoring cache failure: {}", label, e);
    }
}

/// Fallback lookup: a failing cache read counts as a miss
async fn cached_value<M>(op: &str, cache: CacheSlot<'_, M>) -> Option<M>
where
    M: Serialize + DeserializeOwned,
{
    let (cache, id) = cache?;
    match cache.get(id).await {
        Ok(value) => value,
        Err(e) => {
            warn!("{}: cache read failed, treating as miss: {}", op, e);
            None
        }
    }
}

fn translate(op: &str, e: DataSourceError) -> Failure {
    match &e {
        DataSourceError::Unexpected(detail) => error!("{}: unexpected failure: {}", op, detail),
        other => debug!("{}: {}", op, other),
    }
    e.into_failure()
}
