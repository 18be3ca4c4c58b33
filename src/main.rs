use mimalloc::MiMalloc;
use taskforge::config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskforge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().expect("Failed to load configuration");

    let pool = taskforge::db::create_pool(&config.database_url, config.database_max_connections)
        .await?;
    taskforge::db::migrate(&pool).await?;

    let addr = config.bind_addr()?;
    tracing::info!(host = %addr, "Starting TaskForge API server");

    let state = taskforge::AppState { db: pool, config };
    let app = taskforge::routes::build(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
