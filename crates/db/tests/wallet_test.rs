//! Integration tests for wallet funding and the statement.

mod common;

use common::{connect, create_user_with_balance};
use rust_decimal_macros::dec;
use tuition_core::ledger::WalletTransactionKind;
use tuition_core::wallet::WalletError;
use tuition_db::WalletRepository;
use tuition_shared::types::{PageRequest, UserId};

#[tokio::test]
async fn test_fund_credits_wallet_and_writes_statement() {
    let db = connect().await;
    let user = create_user_with_balance(&db, dec!(0)).await;
    let funding = tuition_db::wallet_funding(&db);

    let line = funding.fund(user, dec!(125.50)).await.expect("Funding failed");

    assert_eq!(line.kind, WalletTransactionKind::Funding);
    assert_eq!(line.balance_after, dec!(125.50));

    let wallets = WalletRepository::new(db.clone());
    assert_eq!(wallets.balance(user).await.unwrap(), Some(dec!(125.50)));
    let statement = wallets
        .statement(user, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(statement.data, vec![line]);
}

#[tokio::test]
async fn test_statement_is_paginated_newest_first() {
    let db = connect().await;
    let user = create_user_with_balance(&db, dec!(0)).await;
    let funding = tuition_db::wallet_funding(&db);
    for amount in [dec!(10), dec!(20), dec!(30)] {
        funding.fund(user, amount).await.unwrap();
    }

    let wallets = WalletRepository::new(db.clone());
    let first = wallets
        .statement(user, &PageRequest { page: 1, per_page: 2 })
        .await
        .unwrap();
    let second = wallets
        .statement(user, &PageRequest { page: 2, per_page: 2 })
        .await
        .unwrap();

    assert_eq!(first.meta.total, 3);
    assert_eq!(first.meta.total_pages, 2);
    let amounts: Vec<_> = first.data.iter().map(|l| l.amount).collect();
    assert_eq!(amounts, vec![dec!(30), dec!(20)]);
    assert_eq!(second.data.len(), 1);
    assert_eq!(second.data[0].balance_after, dec!(10));
}

#[tokio::test]
async fn test_fund_rejects_bad_input() {
    let db = connect().await;
    let user = create_user_with_balance(&db, dec!(0)).await;
    let funding = tuition_db::wallet_funding(&db);

    assert_eq!(
        funding.fund(user, dec!(0)).await.unwrap_err(),
        WalletError::NonPositiveAmount(dec!(0))
    );

    let ghost = UserId::new();
    assert_eq!(
        funding.fund(ghost, dec!(10)).await.unwrap_err(),
        WalletError::UserNotFound(ghost)
    );
}
