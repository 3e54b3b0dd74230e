//! Repository implementations
//!
//! Each repository pairs a remote data source with its local caches and
//! routes every operation through the shared [`Reconciler`] policy, mapping
//! wire models to entities on the way out.
//!
//! [`Reconciler`]: crate::infrastructure::reconcile::Reconciler

pub mod auth;
pub mod business;
pub mod chat;
pub mod feed;
pub mod notification;
pub mod profile;
pub mod review;
pub mod settings;
pub mod wishlist;

pub use auth::AuthRepositoryImpl;
pub use business::BusinessRepositoryImpl;
pub use chat::ChatRepositoryImpl;
pub use feed::FeedRepositoryImpl;
pub use notification::NotificationRepositoryImpl;
pub use profile::ProfileRepositoryImpl;
pub use review::ReviewRepositoryImpl;
pub use settings::SettingsRepositoryImpl;
pub use wishlist::WishlistRepositoryImpl;

/// Cache id of a feature's first page
pub(crate) const FIRST_PAGE: &str = "first";

#[cfg(test)]
pub(crate) mod test_support {
    use crate::infrastructure::connectivity::StaticConnectivity;
    use crate::infrastructure::error::DataSourceError;
    use crate::infrastructure::local::MemoryKeyValueStore;
    use crate::infrastructure::reconcile::Reconciler;
    use std::sync::Arc;

    pub struct Harness {
        pub storage: Arc<MemoryKeyValueStore>,
        pub probe: Arc<StaticConnectivity>,
        pub reconciler: Reconciler,
    }

    pub fn harness(online: bool) -> Harness {
        let probe = Arc::new(StaticConnectivity::new(online));
        Harness {
            storage: Arc::new(MemoryKeyValueStore::new()),
            reconciler: Reconciler::new(probe.clone()),
            probe,
        }
    }

    pub fn server_down() -> DataSourceError {
        DataSourceError::server("backend unavailable").with_code("unavailable")
    }
}
