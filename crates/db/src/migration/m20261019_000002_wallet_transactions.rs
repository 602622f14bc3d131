//! Wallet statement migration.
//!
//! Creates the wallet_transactions table written alongside every balance change.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(WALLET_TRANSACTIONS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS wallet_transactions CASCADE; DROP TYPE IF EXISTS wallet_transaction_kind;",
        )
        .await?;
        Ok(())
    }
}

const WALLET_TRANSACTIONS_SQL: &str = r"
CREATE TYPE wallet_transaction_kind AS ENUM ('funding', 'enrollment_fee');

CREATE TABLE wallet_transactions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    kind wallet_transaction_kind NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    balance_after NUMERIC(19, 4) NOT NULL,
    enrollment_id UUID REFERENCES enrollments(id) ON DELETE RESTRICT,
    description TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_wallet_tx_amount_positive CHECK (amount > 0),
    CONSTRAINT chk_wallet_tx_balance_non_negative CHECK (balance_after >= 0),
    CONSTRAINT chk_wallet_tx_fee_has_enrollment CHECK (
        kind <> 'enrollment_fee' OR enrollment_id IS NOT NULL
    )
);

-- Statement listing (newest first)
CREATE INDEX idx_wallet_transactions_user ON wallet_transactions(user_id, created_at DESC);
";
