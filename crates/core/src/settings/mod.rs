//! Platform settings rules.
//!
//! The settings row is a singleton. Only the enrollment fee is interpreted by
//! the core; everything else is opaque configuration.

pub mod error;
pub mod fee;

pub use error::SettingsError;
pub use fee::{DEFAULT_ENROLLMENT_FEE, resolve_enrollment_fee, validate_enrollment_fee};
