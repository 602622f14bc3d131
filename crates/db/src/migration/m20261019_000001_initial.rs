//! Initial database migration.
//!
//! Creates users with wallets, courses, enrollments and the settings singleton.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CORE TABLES
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(COURSES_SQL).await?;
        db.execute_unprepared(ENROLLMENTS_SQL).await?;
        db.execute_unprepared(SETTINGS_SQL).await?;

        // ============================================================
        // PART 3: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_SETTINGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE enrollment_status AS ENUM ('active', 'completed', 'dropped');
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    email VARCHAR(255) NOT NULL UNIQUE,
    full_name VARCHAR(255) NOT NULL,
    wallet_balance NUMERIC(19, 4) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- Last line of defence: a debit can never leave a negative wallet
    CONSTRAINT chk_wallet_balance_non_negative CHECK (wallet_balance >= 0)
);
";

const COURSES_SQL: &str = r"
CREATE TABLE courses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title VARCHAR(255) NOT NULL,
    description TEXT,
    price NUMERIC(19, 4) NOT NULL DEFAULT 0,
    is_published BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_course_price_non_negative CHECK (price >= 0)
);

CREATE INDEX idx_courses_published ON courses(created_at DESC) WHERE is_published;
";

const ENROLLMENTS_SQL: &str = r"
CREATE TABLE enrollments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    course_id UUID NOT NULL REFERENCES courses(id) ON DELETE RESTRICT,
    status enrollment_status NOT NULL DEFAULT 'active',
    progress SMALLINT NOT NULL DEFAULT 0,
    enrolled_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- At most one enrollment per (user, course)
    CONSTRAINT uq_enrollments_user_course UNIQUE (user_id, course_id),
    CONSTRAINT chk_enrollment_progress CHECK (progress BETWEEN 0 AND 100)
);

CREATE INDEX idx_enrollments_user ON enrollments(user_id, enrolled_at DESC);
CREATE INDEX idx_enrollments_course ON enrollments(course_id);
";

const SETTINGS_SQL: &str = r"
CREATE TABLE settings (
    id SMALLINT PRIMARY KEY,
    site_name VARCHAR(255) NOT NULL DEFAULT 'Tuition',
    enrollment_fee NUMERIC(19, 4),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_settings_singleton CHECK (id = 1),
    CONSTRAINT chk_enrollment_fee_non_negative CHECK (enrollment_fee IS NULL OR enrollment_fee >= 0)
);
";

const SEED_SETTINGS_SQL: &str = r"
INSERT INTO settings (id, enrollment_fee) VALUES (1, 0)
ON CONFLICT (id) DO NOTHING;
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS settings CASCADE;
DROP TABLE IF EXISTS enrollments CASCADE;
DROP TABLE IF EXISTS courses CASCADE;
DROP TABLE IF EXISTS users CASCADE;
DROP TYPE IF EXISTS enrollment_status;
";
