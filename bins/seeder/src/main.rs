//! Database seeder for tuition development and testing.
//!
//! Seeds a student with a funded wallet, an admin, a few published courses
//! and a non-zero enrollment fee. Safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use tuition_db::{
    CourseRepository, CreateCourseInput, SettingsRepository, UserRepository, WalletRepository,
};
use tuition_shared::config::DatabaseConfig;
use tuition_shared::types::{CourseId, UserId};
use tuition_shared::{AppConfig, JwtService, Role};
use uuid::Uuid;

/// Test student ID (consistent for all seeds)
const TEST_STUDENT_ID: Uuid = Uuid::from_u128(0x2);
/// Test admin ID (consistent for all seeds)
const TEST_ADMIN_ID: Uuid = Uuid::from_u128(0x3);
/// Starting wallet balance for the test student.
const STUDENT_BALANCE: Decimal = dec!(10000);
/// Enrollment fee used in development.
const DEV_ENROLLMENT_FEE: Decimal = dec!(5000);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = tuition_db::connect(&DatabaseConfig {
        url: database_url,
        max_connections: 2,
        min_connections: 1,
        acquire_timeout_secs: 5,
    })
    .await
    .expect("Failed to connect to database");

    println!("Seeding users...");
    seed_user(&db, TEST_STUDENT_ID, "student@tuition.dev", "Test Student").await;
    seed_user(&db, TEST_ADMIN_ID, "admin@tuition.dev", "Test Admin").await;

    println!("Funding student wallet...");
    fund_student(&db).await;

    println!("Seeding courses...");
    seed_courses(&db).await;

    println!("Setting enrollment fee...");
    match SettingsRepository::new(db.clone())
        .update_enrollment_fee(DEV_ENROLLMENT_FEE)
        .await
    {
        Ok(fee) => println!("  Enrollment fee: {fee}"),
        Err(e) => println!("  Failed to set enrollment fee: {e}"),
    }

    print_dev_tokens();

    println!("Seeding complete!");
}

/// Seeds a user with an empty wallet, skipping emails that already exist.
async fn seed_user(db: &DatabaseConnection, id: Uuid, email: &str, full_name: &str) {
    let repo = UserRepository::new(db.clone());
    if repo.find_by_email(email).await.ok().flatten().is_some() {
        println!("  {email} already exists, skipping...");
        return;
    }

    match repo.create(UserId::from_uuid(id), email, full_name).await {
        Ok(_) => println!("  Created {email}"),
        Err(e) => println!("  Failed to create {email}: {e}"),
    }
}

/// Tops the student up to `STUDENT_BALANCE` through the ledger, so the
/// statement shows where the money came from.
async fn fund_student(db: &DatabaseConnection) {
    let student = UserId::from_uuid(TEST_STUDENT_ID);
    let balance = match WalletRepository::new(db.clone()).balance(student).await {
        Ok(Some(balance)) => balance,
        Ok(None) => {
            println!("  Student missing, skipping...");
            return;
        }
        Err(e) => {
            println!("  Failed to read balance: {e}");
            return;
        }
    };

    if balance >= STUDENT_BALANCE {
        println!("  Balance already {balance}, skipping...");
        return;
    }

    match tuition_db::wallet_funding(db)
        .fund(student, STUDENT_BALANCE - balance)
        .await
    {
        Ok(line) => println!("  Balance now {}", line.balance_after),
        Err(e) => println!("  Failed to fund wallet: {e}"),
    }
}

/// Seeds published courses with fixed IDs.
async fn seed_courses(db: &DatabaseConnection) {
    let catalogue = [
        (0x101_u128, "Rust for Backend Engineers", dec!(149)),
        (0x102, "Relational Databases in Depth", dec!(99)),
        (0x103, "Distributed Systems Basics", dec!(0)),
    ];

    let repo = CourseRepository::new(db.clone());
    for (id, title, price) in catalogue {
        let id = CourseId::from_uuid(Uuid::from_u128(id));
        if repo.find_by_id(id).await.ok().flatten().is_some() {
            println!("  {title} already exists, skipping...");
            continue;
        }

        let input = CreateCourseInput {
            id,
            title: title.to_string(),
            description: None,
            price,
            is_published: true,
        };
        match repo.create(input).await {
            Ok(_) => println!("  Created {title} ({id})"),
            Err(e) => println!("  Failed to create {title}: {e}"),
        }
    }
}

/// Prints bearer tokens for the seeded users when JWT settings are available.
fn print_dev_tokens() {
    let Ok(config) = AppConfig::load() else {
        println!("No JWT configuration found, skipping dev tokens");
        return;
    };
    let jwt = JwtService::new(config.jwt.to_jwt_config());

    for (label, id, role) in [
        ("student", TEST_STUDENT_ID, Role::Student),
        ("admin", TEST_ADMIN_ID, Role::Admin),
    ] {
        match jwt.generate_access_token(id, role) {
            Ok(token) => println!("  {label} token: Bearer {token}"),
            Err(e) => println!("  Failed to sign {label} token: {e}"),
        }
    }
}
