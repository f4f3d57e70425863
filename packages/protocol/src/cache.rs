//! Single-slot protocol cache with single-flight population.
//!
//! The cache is EMPTY until the first request, which starts one fetch on a
//! spawned task. Every request arriving while that fetch runs waits for the
//! same outcome instead of fetching again. A successful fetch leaves the
//! cache POPULATED for the rest of the process; there is no TTL and no
//! freshness check, so a newer session only becomes visible after
//! [`ProtocolCache::reset`] or a restart. A failed fetch leaves the cache
//! EMPTY and every waiting request receives the same
//! [`ProtocolError::RemoteUnavailable`]. A fetch task that dies without a
//! result (panic or runtime shutdown) also leaves the cache EMPTY.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::error::{ProtocolError, Result};
use crate::source::ProtocolSource;

/// Raw protocol XML shared between requests.
pub type ProtocolBytes = Arc<[u8]>;

/// Outcome broadcast to everyone waiting on a fetch; `None` while running.
type FetchOutcome = Option<std::result::Result<ProtocolBytes, String>>;

enum Slot {
    Empty,
    Fetching {
        generation: u64,
        outcome: watch::Receiver<FetchOutcome>,
    },
    Populated(ProtocolBytes),
}

struct CacheState {
    slot: Slot,
    /// Incremented per fetch, so a fetch finishing after a reset is discarded.
    generation: u64,
}

/// Holds the most recently fetched protocol.
///
/// Cloning is cheap and yields a handle to the same slot.
#[derive(Clone)]
pub struct ProtocolCache {
    source: Arc<dyn ProtocolSource>,
    state: Arc<Mutex<CacheState>>,
}

impl ProtocolCache {
    pub fn new(source: impl ProtocolSource + 'static) -> Self {
        Self::from_source(Arc::new(source))
    }

    pub fn from_source(source: Arc<dyn ProtocolSource>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(CacheState {
                slot: Slot::Empty,
                generation: 0,
            })),
        }
    }

    /// Return the cached protocol, fetching it first if the cache is empty.
    pub async fn get(&self) -> Result<ProtocolBytes> {
        let (generation, mut receiver) = {
            let mut state = self.state.lock().await;
            let in_flight = match &state.slot {
                Slot::Populated(bytes) => return Ok(Arc::clone(bytes)),
                // A closed channel means the fetch task died without reporting
                Slot::Fetching {
                    generation,
                    outcome,
                } if outcome.has_changed().is_ok() => Some((*generation, outcome.clone())),
                Slot::Fetching { generation, .. } => {
                    tracing::warn!(generation, "previous protocol fetch died, fetching again");
                    None
                }
                Slot::Empty => None,
            };
            match in_flight {
                Some(joined) => {
                    tracing::debug!("joining in-flight protocol fetch");
                    joined
                }
                None => self.start_fetch(&mut state),
            }
        };

        let waited = receiver
            .wait_for(Option::is_some)
            .await
            .map(|outcome| outcome.clone());

        match waited {
            Ok(Some(Ok(bytes))) => Ok(bytes),
            Ok(Some(Err(message))) => Err(ProtocolError::RemoteUnavailable(message)),
            Ok(None) => Err(ProtocolError::RemoteUnavailable(
                "protocol fetch finished without a result".to_string(),
            )),
            Err(_) => {
                self.abandon(generation).await;
                Err(ProtocolError::RemoteUnavailable(
                    "protocol fetch was abandoned".to_string(),
                ))
            }
        }
    }

    /// Return a dead FETCHING slot to EMPTY so the next request fetches again.
    async fn abandon(&self, generation: u64) {
        let mut state = self.state.lock().await;
        if matches!(state.slot, Slot::Fetching { generation: g, .. } if g == generation) {
            tracing::warn!(generation, "protocol fetch ended without a result");
            state.slot = Slot::Empty;
        }
    }

    /// Drop the cached protocol so the next request fetches again.
    ///
    /// A fetch still running when the cache is reset does not populate it.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.slot = Slot::Empty;
        tracing::info!("protocol cache reset");
    }

    /// Whether a protocol is currently cached.
    pub async fn is_populated(&self) -> bool {
        matches!(self.state.lock().await.slot, Slot::Populated(_))
    }

    /// Move EMPTY -> FETCHING and spawn the fetch. Called with the lock held.
    fn start_fetch(&self, state: &mut CacheState) -> (u64, watch::Receiver<FetchOutcome>) {
        state.generation += 1;
        let generation = state.generation;
        let (sender, receiver) = watch::channel(None);
        state.slot = Slot::Fetching {
            generation,
            outcome: receiver.clone(),
        };

        tracing::info!(generation, "fetching plenary protocol");

        let source = Arc::clone(&self.source);
        let shared = Arc::clone(&self.state);
        tokio::spawn(async move {
            let result = source.fetch_protocol().await;

            let outcome = {
                let mut state = shared.lock().await;
                let current = matches!(
                    state.slot,
                    Slot::Fetching { generation: g, .. } if g == generation
                );

                match result {
                    Ok(bytes) => {
                        let bytes: ProtocolBytes = bytes.into();
                        if current {
                            tracing::info!(bytes = bytes.len(), "protocol cached");
                            state.slot = Slot::Populated(Arc::clone(&bytes));
                        } else {
                            tracing::debug!(generation, "discarding fetch superseded by reset");
                        }
                        Ok(bytes)
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "protocol fetch failed");
                        if current {
                            state.slot = Slot::Empty;
                        }
                        Err(match err {
                            ProtocolError::RemoteUnavailable(message) => message,
                            other => other.to_string(),
                        })
                    }
                }
            };

            sender.send_replace(Some(outcome));
        });

        (generation, receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FailingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProtocolSource for FailingSource {
        async fn fetch_protocol(&self) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err(ProtocolError::RemoteUnavailable("DIP timed out".to_string()))
        }
    }

    #[tokio::test]
    async fn test_get_populates_cache() {
        let cache = ProtocolCache::new(StaticSource::new(b"<a/>".to_vec()));
        assert!(!cache.is_populated().await);

        let bytes = cache.get().await.unwrap();
        assert_eq!(&bytes[..], b"<a/>");
        assert!(cache.is_populated().await);
    }

    #[tokio::test]
    async fn test_failure_is_shared_and_leaves_cache_empty() {
        let source = Arc::new(FailingSource {
            calls: AtomicUsize::new(0),
        });
        let cache = ProtocolCache::from_source(source.clone());

        let (first, second) = tokio::join!(cache.get(), cache.get());
        for result in [first, second] {
            match result {
                Err(ProtocolError::RemoteUnavailable(message)) => {
                    assert_eq!(message, "DIP timed out")
                }
                other => panic!("expected RemoteUnavailable, got {other:?}"),
            }
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(!cache.is_populated().await);

        assert!(cache.get().await.is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    /// Panics on the first fetch, serves `<a/>` afterwards.
    struct PanicOnce {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProtocolSource for PanicOnce {
        async fn fetch_protocol(&self) -> Result<Vec<u8>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("source crashed");
            }
            Ok(b"<a/>".to_vec())
        }
    }

    #[tokio::test]
    async fn test_crashed_fetch_returns_cache_to_empty() {
        let source = Arc::new(PanicOnce {
            calls: AtomicUsize::new(0),
        });
        let cache = ProtocolCache::from_source(source.clone());

        let first = cache.get().await;
        assert!(matches!(first, Err(ProtocolError::RemoteUnavailable(_))));
        assert!(!cache.is_populated().await);

        assert_eq!(&cache.get().await.unwrap()[..], b"<a/>");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_crashed_fetch_without_waiters_is_retried() {
        let source = Arc::new(PanicOnce {
            calls: AtomicUsize::new(0),
        });
        let cache = ProtocolCache::from_source(source.clone());

        let caller = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get().await })
        };
        // Let the caller start the fetch, then drop it before the fetch ends
        tokio::task::yield_now().await;
        caller.abort();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(&cache.get().await.unwrap()[..], b"<a/>");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reset_empties_cache() {
        let cache = ProtocolCache::new(StaticSource::new(b"<a/>".to_vec()));
        cache.get().await.unwrap();

        cache.reset().await;
        assert!(!cache.is_populated().await);
    }
}
