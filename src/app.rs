//! Application wiring
//!
//! Builds every repository over one set of platform adapters, one device
//! store and one connectivity probe, plus the view-state stores on top.

use crate::application::auth::SignOut;
use crate::config::Config;
use crate::domain::auth::AuthRepository;
use crate::domain::business::BusinessRepository;
use crate::domain::chat::ChatRepository;
use crate::domain::feed::FeedRepository;
use crate::domain::notification::NotificationRepository;
use crate::domain::review::ReviewRepository;
use crate::domain::settings::SettingsRepository;
use crate::domain::shared::Result;
use crate::domain::user::ProfileRepository;
use crate::domain::wishlist::WishlistRepository;
use crate::infrastructure::connectivity::ConnectivityProbe;
use crate::infrastructure::local::KeyValueStore;
use crate::infrastructure::platform::{
    deploy_user_functions, AuthProvider, DocumentStore, FunctionsClient, MemoryAuthProvider,
    MemoryDocumentStore, MemoryFunctions, RemoteConfig, StaticRemoteConfig,
};
use crate::infrastructure::reconcile::Reconciler;
use crate::infrastructure::remote::{
    PlatformAuthDataSource, PlatformBusinessDataSource, PlatformChatDataSource, PlatformFeedDataSource,
    PlatformNotificationDataSource, PlatformProfileDataSource, PlatformReviewDataSource,
    PlatformSettingsDataSource, PlatformWishlistDataSource,
};
use crate::infrastructure::repositories::{
    AuthRepositoryImpl, BusinessRepositoryImpl, ChatRepositoryImpl, FeedRepositoryImpl,
    NotificationRepositoryImpl, ProfileRepositoryImpl, ReviewRepositoryImpl, SettingsRepositoryImpl,
    WishlistRepositoryImpl,
};
use crate::interface::{FeedStore, NotificationStore, WishlistStore};
use std::sync::Arc;
use tracing::info;

/// Platform SDK surfaces the data sources talk to
#[derive(Clone)]
pub struct Platform {
    pub store: Arc<dyn DocumentStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub functions: Arc<dyn FunctionsClient>,
    pub remote_config: Arc<dyn RemoteConfig>,
}

/// In-process platform with the user callables deployed
pub struct MemoryPlatform {
    pub store: Arc<MemoryDocumentStore>,
    pub auth: Arc<MemoryAuthProvider>,
    pub functions: Arc<MemoryFunctions>,
    pub remote_config: Arc<StaticRemoteConfig>,
}

impl MemoryPlatform {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let functions = Arc::new(MemoryFunctions::new());
        deploy_user_functions(&functions, store.clone()).await;
        Self {
            store,
            auth: Arc::new(MemoryAuthProvider::new()),
            functions,
            remote_config: Arc::new(StaticRemoteConfig::default()),
        }
    }

    pub fn platform(&self) -> Platform {
        Platform {
            store: self.store.clone(),
            auth: self.auth.clone(),
            functions: self.functions.clone(),
            remote_config: self.remote_config.clone(),
        }
    }
}

pub struct App {
    pub config: Config,
    pub auth: Arc<dyn AuthRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub businesses: Arc<dyn BusinessRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub feed: Arc<dyn FeedRepository>,
    pub chat: Arc<dyn ChatRepository>,
    pub wishlist: Arc<dyn WishlistRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub feed_store: FeedStore,
    pub notification_store: NotificationStore,
    pub wishlist_store: WishlistStore,
}

impl App {
    pub fn new(
        config: Config,
        platform: Platform,
        storage: Arc<dyn KeyValueStore>,
        connectivity: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        let reconciler = Reconciler::new(connectivity);
        let page_size = config.pagination.page_size;

        let auth: Arc<dyn AuthRepository> = Arc::new(AuthRepositoryImpl::new(
            Arc::new(PlatformAuthDataSource::new(platform.auth.clone(), platform.store.clone())),
            storage.clone(),
            reconciler.clone(),
        ));
        let profiles: Arc<dyn ProfileRepository> = Arc::new(ProfileRepositoryImpl::new(
            Arc::new(PlatformProfileDataSource::new(platform.store.clone(), platform.functions.clone())),
            storage.clone(),
            reconciler.clone(),
        ));
        let businesses: Arc<dyn BusinessRepository> = Arc::new(BusinessRepositoryImpl::new(
            Arc::new(PlatformBusinessDataSource::new(platform.store.clone())),
            storage.clone(),
            reconciler.clone(),
        ));
        let reviews: Arc<dyn ReviewRepository> = Arc::new(ReviewRepositoryImpl::new(
            Arc::new(PlatformReviewDataSource::new(platform.store.clone())),
            storage.clone(),
            reconciler.clone(),
        ));
        let feed: Arc<dyn FeedRepository> = Arc::new(FeedRepositoryImpl::new(
            Arc::new(PlatformFeedDataSource::new(platform.store.clone())),
            storage.clone(),
            reconciler.clone(),
        ));
        let chat: Arc<dyn ChatRepository> = Arc::new(ChatRepositoryImpl::new(
            Arc::new(PlatformChatDataSource::new(platform.store.clone())),
            storage.clone(),
            reconciler.clone(),
        ));
        let wishlist: Arc<dyn WishlistRepository> = Arc::new(WishlistRepositoryImpl::new(
            Arc::new(PlatformWishlistDataSource::new(platform.store.clone())),
            storage.clone(),
            reconciler.clone(),
        ));
        let notifications: Arc<dyn NotificationRepository> = Arc::new(NotificationRepositoryImpl::new(
            Arc::new(PlatformNotificationDataSource::new(platform.store.clone())),
            storage.clone(),
            reconciler.clone(),
        ));
        let settings: Arc<dyn SettingsRepository> = Arc::new(SettingsRepositoryImpl::new(
            Arc::new(PlatformSettingsDataSource::new(platform.store, platform.remote_config)),
            storage,
            reconciler,
        ));

        info!("Repositories initialized (page size {})", page_size);

        Self {
            feed_store: FeedStore::new(feed.clone(), page_size),
            notification_store: NotificationStore::new(notifications.clone(), page_size),
            wishlist_store: WishlistStore::new(wishlist.clone()),
            config,
            auth,
            profiles,
            businesses,
            reviews,
            feed,
            chat,
            wishlist,
            notifications,
            settings,
        }
    }

    /// Sign out and drop every per-user view state
    pub async fn sign_out(&self) -> Result<()> {
        SignOut::new(self.auth.clone()).execute().await?;
        self.feed_store.reset().await;
        self.notification_store.reset().await;
        self.wishlist_store.reset().await;
        Ok(())
    }
}
