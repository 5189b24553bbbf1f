pub mod bootstrap;
pub mod codec;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repos;
pub mod schema;
pub mod seed;

use std::sync::Arc;

use crate::bootstrap::ReadinessState;
use crate::config::AppConfig;
use crate::db::Db;
use crate::repos::{
    ListingRepository, ReviewRepository, SqliteListingRepository, SqliteReviewRepository,
};

/// Everything the HTTP layer needs, wired once at startup. Repositories
/// are trait objects so handlers stay storage-agnostic.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: Db,
    pub readiness: ReadinessState,
    pub listings: Arc<dyn ListingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl AppState {
    pub fn new(config: AppConfig, db: Db, readiness: ReadinessState) -> Self {
        Self {
            listings: Arc::new(SqliteListingRepository::new(db.clone())),
            reviews: Arc::new(SqliteReviewRepository::new(db.clone())),
            config,
            db,
            readiness,
        }
    }
}
