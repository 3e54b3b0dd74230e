//! Connectivity probe

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Answers "is the device currently online"
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_online(&self) -> bool;
}

/// Probe with a switchable answer
#[derive(Debug)]
pub struct StaticConnectivity {
    online: AtomicBool,
    probes: AtomicUsize,
}

impl StaticConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
            probes: AtomicUsize::new(0),
        }
    }

    pub fn online() -> Self {
        Self::new(true)
    }

    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Number of times the probe was consulted
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl Default for StaticConnectivity {
    fn default() -> Self {
        Self::online()
    }
}

#[async_trait]
impl ConnectivityProbe for StaticConnectivity {
    async fn is_online(&self) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.online.load(Ordering::SeqCst)
    }
}
