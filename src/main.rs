use tripwire::bot::{self, error::Error};
use tripwire::{config::Settings, db};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tripwire {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = start().await {
        error!("Fatal: {}", e);
        std::process::exit(1);
    }
}

/// Settings, then the database, then the gateway. Returns only on failure or shutdown.
async fn start() -> Result<(), Error> {
    let settings = Settings::from_env().map_err(|e| Error::custom(format!("settings: {e}")))?;

    let pool = db::pool::create_pool(&settings.database_url).await?;
    db::pool::run_migrations(&pool).await?;
    info!("Database ready");

    bot::framework::run(settings, pool).await
}
