//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - The Postgres implementation of the core ledger ports
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    CourseRepository, CreateCourseInput, EnrollmentRepository, SeaOrmLedgerStore,
    SeaOrmUnitOfWork, SettingsRepository, UserRepository, WalletRepository,
};

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tuition_core::enrollment::{LedgerGuard, TracingEventSink};
use tuition_core::wallet::WalletService;
use tuition_shared::config::DatabaseConfig;

/// Ledger guard wired to Postgres and the tracing event sink.
pub type EnrollmentGuard = LedgerGuard<SeaOrmLedgerStore, TracingEventSink>;

/// Wallet funding service wired to Postgres.
pub type WalletFunding = WalletService<SeaOrmLedgerStore>;

/// Establishes a pooled connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .sqlx_logging(false);
    Database::connect(options).await
}

/// Builds the enrollment guard on top of a connection pool.
#[must_use]
pub fn enrollment_guard(db: &DatabaseConnection) -> EnrollmentGuard {
    LedgerGuard::new(SeaOrmLedgerStore::new(db.clone()), TracingEventSink)
}

/// Builds the wallet funding service on top of a connection pool.
#[must_use]
pub fn wallet_funding(db: &DatabaseConnection) -> WalletFunding {
    WalletService::new(SeaOrmLedgerStore::new(db.clone()))
}
