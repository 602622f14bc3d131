//! Course enrollment paid from the wallet.
//!
//! `LedgerGuard::enroll` is the only way an enrollment comes into existence.
//! It charges the flat enrollment fee and creates the enrollment row in one
//! unit of work, so a wallet debit never exists without its enrollment and
//! vice versa.

pub mod error;
pub mod events;
pub mod guard;
pub mod types;

#[cfg(test)]
mod guard_props;

pub use error::EnrollError;
pub use events::{EnrollmentEvent, EnrollmentEventSink, TracingEventSink};
pub use guard::LedgerGuard;
pub use types::{Enrollment, EnrollmentStatus, NewEnrollment};
