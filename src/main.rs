use reviewhub::application::business::CreateBusiness;
use reviewhub::application::feed::CreatePost;
use reviewhub::application::profile::{RegisterBusinessOwner, RequirePermission};
use reviewhub::application::review::CreateReview;
use reviewhub::domain::auth::SignUp;
use reviewhub::domain::business::NewBusiness;
use reviewhub::domain::feed::NewPost;
use reviewhub::domain::review::NewReview;
use reviewhub::domain::user::{BusinessOwnerRegistration, Permission};
use reviewhub::infrastructure::connectivity::StaticConnectivity;
use reviewhub::infrastructure::local::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use reviewhub::{App, Config, Fold, MemoryPlatform};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting ReviewHub core");
    info!("Configuration loaded: {:?}", config);

    let storage: Arc<dyn KeyValueStore> = if config.cache.persistent {
        let store = FileKeyValueStore::open(config.cache.file()).await?;
        info!("Using persistent cache at {}", store.path().display());
        Arc::new(store)
    } else {
        Arc::new(MemoryKeyValueStore::new())
    };

    let platform = MemoryPlatform::new().await;
    let connectivity = Arc::new(StaticConnectivity::online());
    let app = App::new(config, platform.platform(), storage, connectivity.clone());

    demo_session(&app, &connectivity).await?;

    info!("ReviewHub core shut down");
    Ok(())
}

/// Walk through one user session against the in-process backend
async fn demo_session(app: &App, connectivity: &StaticConnectivity) -> anyhow::Result<()> {
    let user = app
        .auth
        .sign_up(SignUp {
            email: "ada@example.com".to_string(),
            password: "correct horse".to_string(),
            display_name: "Ada".to_string(),
        })
        .await?;
    info!("Signed up {} ({})", user.email, user.id);

    let business_dashboard = RequirePermission::new(app.profiles.clone());
    if let Err(denied) = business_dashboard.execute(&user.id, Permission::BusinessDashboard).await {
        info!("Business dashboard closed: {}", denied);
    }
    RegisterBusinessOwner::new(app.profiles.clone())
        .execute(BusinessOwnerRegistration {
            user_id: user.id.clone(),
            business_name: "Blue Door Cafe".to_string(),
            phone: None,
        })
        .await?;
    let owner = business_dashboard
        .execute(&user.id, Permission::BusinessDashboard)
        .await?;
    info!("Business dashboard open for {} ({})", owner.display_name, owner.role);

    let business = CreateBusiness::new(app.businesses.clone())
        .execute(NewBusiness {
            owner_id: None,
            name: "Blue Door Cafe".to_string(),
            category: "food".to_string(),
            description: "Coffee and pastries".to_string(),
            address: "1 Harbour Street".to_string(),
            phone: None,
            image_url: None,
        })
        .await?;

    CreateReview::new(app.reviews.clone())
        .execute(NewReview {
            business_id: business.id.clone(),
            author_id: user.id.clone(),
            author_name: "Ada".to_string(),
            rating: 5,
            comment: "Best croissant in town".to_string(),
        })
        .await?;
    let business = app.businesses.get_business(&business.id).await?;
    info!(
        "{} has {} review(s), average {:.1}",
        business.name, business.review_count, business.rating_average
    );

    let post = CreatePost::new(app.feed.clone())
        .execute(NewPost {
            author_id: user.id.clone(),
            author_name: "Ada".to_string(),
            content: format!("Just reviewed {}", business.name),
            image_url: None,
        })
        .await?;

    app.feed_store.load_first_page(&user.id).await?;
    app.feed_store.toggle_like(&post.id, &user.id).await?;
    let feed = app.feed_store.snapshot().await;
    let liked = feed.posts.iter().any(|p| p.id == post.id && p.is_liked);
    info!("Feed has {} post(s); new post liked: {}", feed.posts.len(), liked);

    connectivity.set_online(false);
    let outcome = app.feed_store.toggle_like(&post.id, &user.id).await;
    let message = outcome.fold(|failure| failure.message().to_string(), |_| "accepted".to_string());
    warn!("Offline unlike: {}", message);

    // Reads still come from the cache
    let cached = app.businesses.get_business(&business.id).await?;
    info!("Offline read of {} served from cache", cached.name);

    connectivity.set_online(true);
    app.sign_out().await?;
    info!("Signed out; feed state cleared: {}", app.feed_store.snapshot().await.posts.is_empty());
    Ok(())
}
