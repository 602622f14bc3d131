//! Course repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tuition_shared::types::{CourseId, PageRequest, PageResponse};

use crate::entities::courses;

/// Input for creating a course.
#[derive(Debug, Clone)]
pub struct CreateCourseInput {
    /// Course ID, usually `CourseId::new()`.
    pub id: CourseId,
    /// Course title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Listed tuition price. Not charged on enrollment.
    pub price: Decimal,
    /// Whether the course shows up in the catalogue.
    pub is_published: bool,
}

/// Course repository.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    db: DatabaseConnection,
}

impl CourseRepository {
    /// Creates a new course repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a course.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateCourseInput) -> Result<courses::Model, DbErr> {
        let now = chrono::Utc::now().into();
        courses::ActiveModel {
            id: Set(input.id.into_inner()),
            title: Set(input.title),
            description: Set(input.description),
            price: Set(input.price),
            is_published: Set(input.is_published),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Finds a course by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: CourseId) -> Result<Option<courses::Model>, DbErr> {
        courses::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Lists published courses, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_published(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<courses::Model>, DbErr> {
        let page = page.normalized();
        let query = courses::Entity::find().filter(courses::Column::IsPublished.eq(true));

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(courses::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(rows, page.page, page.per_page, total))
    }
}
