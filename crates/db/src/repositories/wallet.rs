//! Wallet repository: balances and the statement.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tuition_core::ledger::WalletTransaction;
use tuition_shared::types::{EnrollmentId, PageRequest, PageResponse, UserId, WalletTransactionId};

use crate::entities::{users, wallet_transactions};

impl From<wallet_transactions::Model> for WalletTransaction {
    fn from(model: wallet_transactions::Model) -> Self {
        Self {
            id: WalletTransactionId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            kind: model.kind.into(),
            amount: model.amount,
            balance_after: model.balance_after,
            enrollment_id: model.enrollment_id.map(EnrollmentId::from_uuid),
            description: model.description,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Read access to wallets. Writes go through the ledger unit of work.
#[derive(Debug, Clone)]
pub struct WalletRepository {
    db: DatabaseConnection,
}

impl WalletRepository {
    /// Creates a new wallet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the current balance, or `None` for unknown users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn balance(&self, user_id: UserId) -> Result<Option<Decimal>, DbErr> {
        let user = users::Entity::find_by_id(user_id.into_inner())
            .one(&self.db)
            .await?;
        Ok(user.map(|u| u.wallet_balance))
    }

    /// Returns one page of the user's statement, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn statement(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> Result<PageResponse<WalletTransaction>, DbErr> {
        let page = page.normalized();
        let query = wallet_transactions::Entity::find()
            .filter(wallet_transactions::Column::UserId.eq(user_id.into_inner()));

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(wallet_transactions::Column::CreatedAt)
            .order_by_desc(wallet_transactions::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(
            rows.into_iter().map(WalletTransaction::from).collect(),
            page.page,
            page.per_page,
            total,
        ))
    }
}
