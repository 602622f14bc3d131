//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod course;
pub mod enrollment;
pub mod ledger;
pub mod settings;
pub mod user;
pub mod wallet;

pub use course::{CourseRepository, CreateCourseInput};
pub use enrollment::EnrollmentRepository;
pub use ledger::{SeaOrmLedgerStore, SeaOrmUnitOfWork};
pub use settings::SettingsRepository;
pub use user::UserRepository;
pub use wallet::WalletRepository;
