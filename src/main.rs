use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mindcare_companion::catalog::ReferenceData;
use mindcare_companion::config::AppConfig;
use mindcare_companion::db::{MemoryUserStore, PgUserStore, UserStore};
use mindcare_companion::middleware::RateLimiter;
use mindcare_companion::services::{Companion, RandomPicker, TurnTracker};
use mindcare_companion::state::{AppState, SharedState};
use mindcare_companion::web;
use sqlx::postgres::PgPoolOptions;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const IDLE_CONVERSATION: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let data = ReferenceData::load(config.catalog_path.as_deref())?;
    let companion = Companion::new(&data, Arc::new(RandomPicker), config.precedence)?;
    tracing::info!(
        "Companion ready: stages {:?}",
        companion.selector().stage_names()
    );

    let users = connect_user_store(&config).await?;

    let shared: SharedState = Arc::new(AppState {
        users,
        companion: Arc::new(companion),
        turns: TurnTracker::new(),
        auth_limiter: RateLimiter::new(config.login_rate_limit, config.login_rate_window_secs),
        session_key: config.session_key.clone(),
        session_ttl: config.session_ttl,
        typing_delay: config.typing_delay,
        secure_cookies: config.secure_cookies,
    });

    let scheduler = JobScheduler::new().await?;

    // Cleanup - stale rate-limit windows and idle conversations every hour
    let shared_for_cleanup = shared.clone();
    scheduler
        .add(Job::new_async("0 0 * * * *", move |_uuid, _l| {
            let state = shared_for_cleanup.clone();
            Box::pin(async move {
                let limited = state.auth_limiter.cleanup().await;
                let pruned = state.turns.prune(IDLE_CONVERSATION).await;
                if pruned > 0 {
                    tracing::info!(
                        "Pruned {} idle conversations ({} clients still rate limited)",
                        pruned,
                        limited
                    );
                }
            })
        })?)
        .await?;

    scheduler.start().await?;
    tracing::info!("Scheduler started: hourly cleanup");

    let app = web::app(shared);

    tracing::info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

async fn connect_user_store(config: &AppConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, accounts are kept in memory and lost on restart");
        return Ok(Arc::new(MemoryUserStore::new()));
    };

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(database_url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            e
        })?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to run database migrations: {}", e);
            e
        })?;
    tracing::info!("Database migrations completed");

    Ok(Arc::new(PgUserStore::new(pool)))
}
