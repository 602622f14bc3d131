//! Integration tests for User and Course repositories.

mod common;

use common::{connect, create_course};
use rust_decimal::Decimal;
use tuition_db::{CourseRepository, UserRepository};
use tuition_shared::types::{PageRequest, UserId};
use uuid::Uuid;

#[tokio::test]
async fn test_user_create_and_find() {
    let db = connect().await;
    let repo = UserRepository::new(db.clone());
    let email = format!("test-{}@example.com", Uuid::new_v4());

    let id = UserId::new();

    let user = repo
        .create(id, &email, "Test User")
        .await
        .expect("Failed to create user");

    assert_eq!(user.id, id.into_inner());
    assert_eq!(user.email, email);
    assert_eq!(user.wallet_balance, Decimal::ZERO);

    let by_email = repo
        .find_by_email(&email)
        .await
        .expect("Failed to find user")
        .expect("User should exist");
    assert_eq!(by_email.id, user.id);
    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let db = connect().await;
    let repo = UserRepository::new(db.clone());
    let email = format!("dup-{}@example.com", Uuid::new_v4());

    repo.create(UserId::new(), &email, "First").await.unwrap();
    assert!(repo.create(UserId::new(), &email, "Second").await.is_err());
}

#[tokio::test]
async fn test_published_courses_are_listed() {
    let db = connect().await;
    let course = create_course(&db).await;
    let repo = CourseRepository::new(db.clone());

    let found = repo.find_by_id(course).await.unwrap().expect("Course should exist");
    assert!(found.is_published);

    let page = repo
        .list_published(&PageRequest { page: 1, per_page: 100 })
        .await
        .unwrap();
    assert!(page.meta.total >= 1);
    assert!(page.data.len() <= 100);
}
