//! Property-based tests for the ledger guard.
//!
//! - Successful enrollment debits exactly the fee
//! - Rejected enrollment changes nothing
//! - Wallet balance never goes negative across a sequence of enrollments

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::EnrollError;
use super::guard::LedgerGuard;
use super::types::EnrollmentStatus;
use crate::testing::{MemoryLedger, RecordingSink};

/// Strategy for money amounts from 0.00 to 20,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..2_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Enrollment succeeds iff `balance >= fee`, and only success moves money.
    #[test]
    fn prop_enroll_debits_exactly_fee_or_nothing(
        balance in amount(),
        fee in amount(),
    ) {
        let (result, balance_after, enrollments) = block_on(async {
            let ledger = MemoryLedger::new();
            let user = ledger.add_user(balance).await;
            let course = ledger.add_course().await;
            ledger.set_fee(Some(fee)).await;
            let guard = LedgerGuard::new(ledger.clone(), RecordingSink::default());

            let result = guard.enroll(user, course).await;
            let balance_after = ledger.balance(user).await.unwrap();
            let enrollments = ledger.snapshot().await.enrollments.len();
            (result, balance_after, enrollments)
        });

        if balance >= fee {
            let enrollment = result.unwrap();
            prop_assert_eq!(enrollment.status, EnrollmentStatus::Active);
            prop_assert_eq!(enrollment.progress, 0);
            prop_assert_eq!(balance_after, balance - fee);
            prop_assert_eq!(enrollments, 1);
        } else {
            prop_assert_eq!(result, Err(EnrollError::InsufficientFunds { balance, fee }));
            prop_assert_eq!(balance_after, balance);
            prop_assert_eq!(enrollments, 0);
        }
    }

    /// Enrolling in many courses never overdraws and debits once per success.
    #[test]
    fn prop_balance_never_negative(
        balance in amount(),
        fee in amount(),
        courses in 1usize..8,
    ) {
        let (successes, balance_after) = block_on(async {
            let ledger = MemoryLedger::new();
            let user = ledger.add_user(balance).await;
            ledger.set_fee(Some(fee)).await;
            let guard = LedgerGuard::new(ledger.clone(), RecordingSink::default());

            let mut successes = 0u32;
            for _ in 0..courses {
                let course = ledger.add_course().await;
                if guard.enroll(user, course).await.is_ok() {
                    successes += 1;
                }
            }
            (successes, ledger.balance(user).await.unwrap())
        });

        prop_assert!(balance_after >= Decimal::ZERO);
        prop_assert_eq!(balance_after, balance - fee * Decimal::from(successes));
    }
}
