use std::net::SocketAddr;

use pawspots_backend::bootstrap::{self, ReadinessState};
use pawspots_backend::config::AppConfig;
use pawspots_backend::{db, handlers, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let config = AppConfig::load()?;
    log::info!("Loaded config: {:?}", config);

    let db = db::connect(&config.database_url)?;

    // Migrations and seeding run detached so the server can accept traffic
    // before the store is ready; /health/ready tracks their progress.
    let readiness = ReadinessState::new();
    tokio::spawn(bootstrap::initialize(db.clone(), readiness.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config, db, readiness);
    let app = handlers::app(state);

    log::info!("Starting server on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
