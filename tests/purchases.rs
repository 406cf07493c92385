// =====================================================
// 구매 정산 통합 테스트
// =====================================================

mod common;
use common::*;

use game_store::domains::catalog::models::game::UpdateGameRequest;
use game_store::domains::store::models::transaction::{TransactionStatus, TransactionType};
use game_store::shared::errors::StoreError;

/// 테스트: 구매 성공 경로
///
/// 잔고 차감, 소유권 생성, 원장 기록, 다운로드 증가가
/// 모두 반영되는지 확인합니다.
#[tokio::test]
async fn test_purchase_success() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "buyer@example.com", 100_000).await;
    let game = create_game(&app, "Stellar Frontier", 64_000).await;

    let (purchase, new_balance) = app
        .store_state
        .purchase_service
        .purchase(user.id, game.id)
        .await
        .expect("Purchase should succeed");

    // 구매 기록
    assert_eq!(purchase.user_id, user.id);
    assert_eq!(purchase.game_id, game.id);
    assert_eq!(purchase.price_paid, 64_000, "price_paid should snapshot the current price");

    // 잔고 차감
    assert_eq!(new_balance, 36_000);
    let stored = fetch_user(&app, user.id).await;
    assert_eq!(stored.balance, 36_000, "Debit should be persisted");

    // 원장 기록 (승인된 PURCHASE 거래)
    let (transactions, _) = app
        .store_state
        .ledger_service
        .history(user.id, None)
        .await
        .expect("History should succeed");
    assert_eq!(transactions.len(), 1);
    let entry = &transactions[0];
    assert_eq!(entry.transaction_type, TransactionType::Purchase);
    assert_eq!(entry.status, TransactionStatus::Approved);
    assert_eq!(entry.amount, -64_000, "Purchase amount is recorded as a negative delta");
    assert_eq!(entry.balance_before, 100_000);
    assert_eq!(entry.balance_after, 36_000);
    assert_eq!(entry.related_game_id, Some(game.id));

    // 다운로드 수 증가
    let stored_game = fetch_game(&app, game.id).await;
    assert_eq!(stored_game.downloads, 1);

    // 라이브러리 반영
    let library = app
        .store_state
        .purchase_service
        .library(user.id)
        .await
        .expect("Library should succeed");
    assert_eq!(library.len(), 1);
    assert_eq!(library[0].game_id, game.id);
    assert_eq!(library[0].price_paid, 64_000);

    println!("✅ Purchase settled: balance 100000 -> {}", new_balance);
}

/// 테스트: 잔고 부족 시 구매 거절
///
/// 어떤 부수효과도 남지 않아야 합니다 (원자성).
#[tokio::test]
async fn test_purchase_insufficient_balance() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "poor@example.com", 1_000).await;
    let game = create_game(&app, "Expensive Game", 64_000).await;

    let result = app
        .store_state
        .purchase_service
        .purchase(user.id, game.id)
        .await;

    match result {
        Err(StoreError::InsufficientBalance { required, available }) => {
            assert_eq!(required, 64_000);
            assert_eq!(available, 1_000);
        }
        other => panic!("Expected InsufficientBalance, got {:?}", other),
    }

    // 부수효과 없음
    let stored = fetch_user(&app, user.id).await;
    assert_eq!(stored.balance, 1_000, "Balance must be untouched");

    let library = app
        .store_state
        .purchase_service
        .library(user.id)
        .await
        .expect("Library should succeed");
    assert!(library.is_empty(), "No ownership row may exist");

    let (transactions, _) = app
        .store_state
        .ledger_service
        .history(user.id, None)
        .await
        .expect("History should succeed");
    assert!(transactions.is_empty(), "No ledger row may exist");

    let stored_game = fetch_game(&app, game.id).await;
    assert_eq!(stored_game.downloads, 0, "Download count must be untouched");
}

/// 테스트: 존재하지 않는 게임 구매
#[tokio::test]
async fn test_purchase_unknown_game() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "buyer@example.com", 100_000).await;

    let result = app.store_state.purchase_service.purchase(user.id, 999).await;
    assert!(matches!(result, Err(StoreError::GameNotFound { id: 999 })));
}

/// 테스트: 중복 구매 거절
///
/// 같은 게임을 두 번 살 수 없고, 잔고는 한 번만 차감됩니다.
#[tokio::test]
async fn test_purchase_twice_rejected() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "buyer@example.com", 200_000).await;
    let game = create_game(&app, "Stellar Frontier", 64_000).await;

    app.store_state
        .purchase_service
        .purchase(user.id, game.id)
        .await
        .expect("First purchase should succeed");

    let result = app
        .store_state
        .purchase_service
        .purchase(user.id, game.id)
        .await;
    assert!(matches!(result, Err(StoreError::AlreadyPurchased { .. })));

    let stored = fetch_user(&app, user.id).await;
    assert_eq!(stored.balance, 136_000, "Balance is debited exactly once");

    let stored_game = fetch_game(&app, game.id).await;
    assert_eq!(stored_game.downloads, 1, "Download count is incremented exactly once");
}

/// 테스트: 무료 게임 구매 (잔고 0으로도 가능)
#[tokio::test]
async fn test_purchase_free_game() {
    let app = setup_test().await;

    let user = create_user(&app, "free@example.com").await;
    let game = create_game(&app, "Free to Play", 0).await;

    let (purchase, new_balance) = app
        .store_state
        .purchase_service
        .purchase(user.id, game.id)
        .await
        .expect("Free purchase should succeed");

    assert_eq!(purchase.price_paid, 0);
    assert_eq!(new_balance, 0);

    let (transactions, _) = app
        .store_state
        .ledger_service
        .history(user.id, None)
        .await
        .expect("History should succeed");
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].amount, 0);
}

/// 테스트: 잔고와 가격이 정확히 같은 경우
#[tokio::test]
async fn test_purchase_exact_balance() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "exact@example.com", 64_000).await;
    let game = create_game(&app, "Stellar Frontier", 64_000).await;

    let (_, new_balance) = app
        .store_state
        .purchase_service
        .purchase(user.id, game.id)
        .await
        .expect("Exact-balance purchase should succeed");

    assert_eq!(new_balance, 0);
}

/// 테스트: 대기 중 입금은 구매 가능 잔고에 포함되지 않음
///
/// PENDING 입금은 승인 전까지 잔고가 아닙니다.
#[tokio::test]
async fn test_pending_deposit_does_not_fund_purchase() {
    let app = setup_test().await;

    let user = create_user(&app, "hopeful@example.com").await;
    let game = create_game(&app, "Stellar Frontier", 64_000).await;

    // 충분한 금액의 입금을 요청하지만 승인하지 않음
    app.store_state
        .deposit_service
        .request_deposit(user.id, 100_000, None)
        .await
        .expect("Deposit request should succeed");

    let result = app
        .store_state
        .purchase_service
        .purchase(user.id, game.id)
        .await;
    assert!(
        matches!(result, Err(StoreError::InsufficientBalance { .. })),
        "Pending deposits must not count as spendable funds"
    );
}

/// 테스트: 가격 변경은 과거 구매의 price_paid에 영향 없음
#[tokio::test]
async fn test_price_change_keeps_snapshot() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "buyer@example.com", 100_000).await;
    let game = create_game(&app, "Stellar Frontier", 64_000).await;

    app.store_state
        .purchase_service
        .purchase(user.id, game.id)
        .await
        .expect("Purchase should succeed");

    // 가격 인상
    app.catalog_state
        .game_service
        .update_game(
            game.id,
            UpdateGameRequest {
                title: None,
                developer: None,
                genre: None,
                description: None,
                price: Some(80_000),
            },
        )
        .await
        .expect("Price update should succeed");

    let library = app
        .store_state
        .purchase_service
        .library(user.id)
        .await
        .expect("Library should succeed");
    assert_eq!(library[0].price_paid, 64_000, "Snapshot survives price changes");

    let stored_game = fetch_game(&app, game.id).await;
    assert_eq!(stored_game.price, 80_000);
}
