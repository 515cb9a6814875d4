use anyhow::Result;
use tracing::info;

use viit_onboarding_api::jobs::{BirthdayCheckJob, JobScheduler};
use viit_onboarding_api::services::EmailService;
use viit_onboarding_api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging and metrics
    middleware::logging::init_logging(&config.logging);
    middleware::metrics::init_metrics();

    info!("Starting Onboarding API v{}", env!("CARGO_PKG_VERSION"));

    // Create database pool
    let pool = persistence::db::create_pool(&config.database_config()).await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    // Optionally run the birthday check in-process instead of relying on an
    // external scheduler hitting /api/cron/check-birthday.
    let mut scheduler = JobScheduler::new();
    if config.cron.enable_internal_schedule {
        let repo = persistence::repositories::SubmissionRepository::new(pool.clone());
        let email = EmailService::new(config.email.clone());
        scheduler.register(BirthdayCheckJob::new(repo, email));
        scheduler.start();
    }

    // Build application
    let app = app::create_app(config.clone(), pool);

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    scheduler.shutdown().await;

    Ok(())
}
