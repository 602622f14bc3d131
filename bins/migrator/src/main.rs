//! Database migration runner for the tuition backend.
//!
//! Usage:
//!   migrator up      - Run all pending migrations (creates the settings row, fee 0)
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! Reads `DATABASE_URL`.

use sea_orm_migration::prelude::*;
use tuition_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI sets up its own tracing
    cli::run_cli(Migrator).await;
}
