//! Background database initialization and the readiness state machine.
//!
//! The server starts accepting traffic immediately; this task waits a fixed
//! delay, then migrates, seeds and verifies the store. `/health/ready`
//! reports the current state. Initialization failure is fatal to this task
//! only: the state parks at `Degraded` and the process keeps serving.

use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::db::{self, Db};
use crate::error::StorageError;
use crate::seed;

/// Delay before touching the database, so the process can come up before
/// the store does.
pub const STARTUP_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Readiness {
    NotReady,
    Migrating,
    Ready,
    Degraded,
}

/// Shared handle onto the readiness state.
#[derive(Clone)]
pub struct ReadinessState(Arc<RwLock<Readiness>>);

impl ReadinessState {
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(Readiness::NotReady)))
    }

    pub fn get(&self) -> Readiness {
        match self.0.read() {
            Ok(guard) => *guard,
            Err(_) => Readiness::Degraded,
        }
    }

    pub fn set(&self, state: Readiness) {
        if let Ok(mut guard) = self.0.write() {
            *guard = state;
        }
    }
}

impl Default for ReadinessState {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs schema migration, seeding and a connectivity check after a fixed
/// startup delay, advancing the readiness state as it goes.
pub async fn initialize(db: Db, readiness: ReadinessState) {
    tokio::time::sleep(STARTUP_DELAY).await;
    readiness.set(Readiness::Migrating);
    match run(&db) {
        Ok(()) => {
            readiness.set(Readiness::Ready);
            log::info!("Database initialized and ready");
        }
        Err(err) => {
            readiness.set(Readiness::Degraded);
            log::error!("Background database initialization failed: {}", err);
        }
    }
}

fn run(db: &Db) -> Result<(), StorageError> {
    let mut conn = db.lock().map_err(|_| StorageError::LockPoisoned)?;
    db::run_migrations(&mut conn)?;
    seed::seed_demo_data(&mut conn)?;
    db::ping(&mut conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_ready_and_advances() {
        let state = ReadinessState::new();
        assert_eq!(state.get(), Readiness::NotReady);
        state.set(Readiness::Migrating);
        assert_eq!(state.get(), Readiness::Migrating);
        state.set(Readiness::Ready);
        assert_eq!(state.get(), Readiness::Ready);
    }

    #[test]
    fn readiness_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&Readiness::NotReady).unwrap(),
            "\"notReady\""
        );
        assert_eq!(serde_json::to_string(&Readiness::Ready).unwrap(), "\"ready\"");
    }

    #[test]
    fn run_migrates_and_seeds_a_fresh_database() {
        let db = crate::db::connect(":memory:").unwrap();
        run(&db).unwrap();
        // Re-running must be a no-op, not a duplicate seed.
        run(&db).unwrap();
    }

    #[test]
    fn run_reports_a_poisoned_connection_lock() {
        let db = crate::db::connect(":memory:").unwrap();
        let poisoner = db.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(matches!(run(&db), Err(StorageError::LockPoisoned)));
    }
}
