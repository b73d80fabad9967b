//! Cached view of the remote store's reachability.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use super::sync_traits::ConnectivityProbeTrait;
use crate::constants::CONNECTIVITY_CACHE_SECS;

#[derive(Clone, Copy)]
struct Sample {
    online: bool,
    taken_at: Instant,
}

/// Caches the connectivity probe result for a short interval so the write
/// path does not pay a probe round-trip on every operation.
///
/// The cached value is an optimization, never a correctness dependency: a
/// stale "online" answer is corrected by the write path catching the failed
/// write and calling `mark_offline`.
pub struct ConnectivityMonitor {
    probe: Arc<dyn ConnectivityProbeTrait>,
    ttl: Duration,
    last_sample: RwLock<Option<Sample>>,
}

impl ConnectivityMonitor {
    pub fn new(probe: Arc<dyn ConnectivityProbeTrait>) -> Self {
        Self::with_ttl(probe, Duration::from_secs(CONNECTIVITY_CACHE_SECS))
    }

    pub fn with_ttl(probe: Arc<dyn ConnectivityProbeTrait>, ttl: Duration) -> Self {
        ConnectivityMonitor {
            probe,
            ttl,
            last_sample: RwLock::new(None),
        }
    }

    /// Cached connectivity state, probing when the cache has expired.
    pub async fn is_online(&self) -> bool {
        if let Some(sample) = *self.last_sample.read().unwrap() {
            if sample.taken_at.elapsed() < self.ttl {
                return sample.online;
            }
        }
        let online = self.probe.probe().await;
        self.store(online);
        online
    }

    /// Record an observed successful remote round-trip.
    pub fn mark_online(&self) {
        self.store(true);
    }

    /// Record an observed remote failure.
    pub fn mark_offline(&self) {
        self.store(false);
    }

    fn store(&self, online: bool) {
        *self.last_sample.write().unwrap() = Some(Sample {
            online,
            taken_at: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct CountingProbe {
        online: AtomicBool,
        calls: AtomicUsize,
    }

    impl CountingProbe {
        fn new(online: bool) -> Self {
            CountingProbe {
                online: AtomicBool::new(online),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ConnectivityProbeTrait for CountingProbe {
        async fn probe(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.online.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    async fn test_probe_result_is_cached() {
        let probe = Arc::new(CountingProbe::new(true));
        let monitor = ConnectivityMonitor::with_ttl(probe.clone(), Duration::from_secs(60));

        assert!(monitor.is_online().await);
        assert!(monitor.is_online().await);
        assert!(monitor.is_online().await);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_reprobes() {
        let probe = Arc::new(CountingProbe::new(true));
        let monitor = ConnectivityMonitor::with_ttl(probe.clone(), Duration::from_millis(0));

        assert!(monitor.is_online().await);
        probe.online.store(false, Ordering::SeqCst);
        assert!(!monitor.is_online().await);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_mark_offline_overrides_cache() {
        let probe = Arc::new(CountingProbe::new(true));
        let monitor = ConnectivityMonitor::with_ttl(probe.clone(), Duration::from_secs(60));

        assert!(monitor.is_online().await);
        monitor.mark_offline();
        assert!(!monitor.is_online().await);
        // The failed-write signal replaced the cached sample without probing
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }
}
