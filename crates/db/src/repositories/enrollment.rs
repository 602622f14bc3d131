//! Enrollment repository for read access.
//!
//! Enrollments are only ever created by the ledger guard through
//! `SeaOrmUnitOfWork::insert_enrollment`.

use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use tuition_core::enrollment::Enrollment;
use tuition_shared::types::{CourseId, EnrollmentId, UserId};

use crate::entities::enrollments;

impl From<enrollments::Model> for Enrollment {
    fn from(model: enrollments::Model) -> Self {
        Self {
            id: EnrollmentId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            course_id: CourseId::from_uuid(model.course_id),
            status: model.status.into(),
            progress: model.progress,
            enrolled_at: model.enrolled_at.with_timezone(&Utc),
        }
    }
}

/// Enrollment repository.
#[derive(Debug, Clone)]
pub struct EnrollmentRepository {
    db: DatabaseConnection,
}

impl EnrollmentRepository {
    /// Creates a new enrollment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the enrollment for a (user, course) pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, DbErr> {
        let found = enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user_id.into_inner()))
            .filter(enrollments::Column::CourseId.eq(course_id.into_inner()))
            .one(&self.db)
            .await?;
        Ok(found.map(Enrollment::from))
    }

    /// Lists a user's enrollments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Enrollment>, DbErr> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user_id.into_inner()))
            .order_by_desc(enrollments::Column::EnrolledAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Enrollment::from).collect())
    }
}
