//! Settings repository: the singleton row and the enrollment fee.

use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set};
use tracing::info;
use tuition_core::settings::{SettingsError, resolve_enrollment_fee, validate_enrollment_fee};

use super::ledger::store_error;
use crate::entities::settings::{self, SINGLETON_ID};

/// Settings repository.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    db: DatabaseConnection,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the settings row, if it has been created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self) -> Result<Option<settings::Model>, DbErr> {
        settings::Entity::find_by_id(SINGLETON_ID).one(&self.db).await
    }

    /// Returns the fee enrollment would charge right now.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the query fails or the stored fee is invalid.
    pub async fn current_enrollment_fee(&self) -> Result<Decimal, SettingsError> {
        let stored = self.get().await.map_err(store_error)?;
        resolve_enrollment_fee(stored.and_then(|s| s.enrollment_fee))
    }

    /// Sets the flat enrollment fee, creating the settings row if needed.
    ///
    /// The write is a single `INSERT ... ON CONFLICT (id) DO UPDATE`, so two
    /// admins saving at once both succeed and the last write wins.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::NegativeFee` for negative amounts,
    /// `SettingsError::ExcessPrecision` for more than four decimal places, or
    /// an infrastructure error if the write fails.
    pub async fn update_enrollment_fee(&self, fee: Decimal) -> Result<Decimal, SettingsError> {
        let fee = validate_enrollment_fee(fee)?;
        let now = chrono::Utc::now().into();

        let model = settings::Entity::insert(settings::ActiveModel {
            id: Set(SINGLETON_ID),
            site_name: Set("Tuition".to_string()),
            enrollment_fee: Set(Some(fee)),
            updated_at: Set(now),
        })
        .on_conflict(
            OnConflict::column(settings::Column::Id)
                .update_columns([settings::Column::EnrollmentFee, settings::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_with_returning(&self.db)
        .await
        .map_err(store_error)?;

        info!(enrollment_fee = %fee, "Enrollment fee updated");
        resolve_enrollment_fee(model.enrollment_fee)
    }
}
