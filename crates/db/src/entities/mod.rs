//! `SeaORM` entity definitions.

pub mod courses;
pub mod enrollments;
pub mod sea_orm_active_enums;
pub mod settings;
pub mod users;
pub mod wallet_transactions;
