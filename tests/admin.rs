// =====================================================
// 관리자 백오피스 통합 테스트
// =====================================================
// 잔고 조정, 환불, 입금 대기열, 사용자 목록을 검증합니다.
// =====================================================

mod common;
use common::*;

use game_store::domains::auth::models::Role;
use game_store::domains::store::models::transaction::{TransactionStatus, TransactionType};
use game_store::shared::errors::StoreError;

/// 테스트: 양수 조정은 잔고를 올리고 ADMIN_ADJUST 엔트리를 남김
#[tokio::test]
async fn test_adjust_balance_credit() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "target@example.com", 10_000).await;

    let (transaction, new_balance) = app
        .store_state
        .ledger_service
        .adjust_balance(user.id, 50_000, Some("이벤트 보상 지급".to_string()))
        .await
        .expect("Adjustment should succeed");

    assert_eq!(new_balance, 60_000);
    assert_eq!(transaction.transaction_type, TransactionType::AdminAdjust);
    assert_eq!(transaction.status, TransactionStatus::Approved, "Adjustments settle immediately");
    assert_eq!(transaction.amount, 50_000);
    assert_eq!(transaction.balance_before, 10_000);
    assert_eq!(transaction.balance_after, 60_000);
    assert_eq!(transaction.description.as_deref(), Some("이벤트 보상 지급"));

    let stored = fetch_user(&app, user.id).await;
    assert_eq!(stored.balance, 60_000);

    println!("✅ Credit adjustment: 10000 -> {}", new_balance);
}

/// 테스트: 음수 조정은 잔고를 내리되 음수로 만들 수 없음
#[tokio::test]
async fn test_adjust_balance_debit() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "target@example.com", 50_000).await;

    let (transaction, new_balance) = app
        .store_state
        .ledger_service
        .adjust_balance(user.id, -30_000, None)
        .await
        .expect("Debit adjustment should succeed");

    assert_eq!(new_balance, 20_000);
    assert_eq!(transaction.amount, -30_000);
    assert_eq!(
        transaction.description.as_deref(),
        Some("Admin balance adjustment"),
        "A default description is stored when none is given"
    );

    let stored = fetch_user(&app, user.id).await;
    assert_eq!(stored.balance, 20_000);
}

/// 테스트: 0 조정은 의미가 없으므로 거절
#[tokio::test]
async fn test_adjust_balance_zero_rejected() {
    let app = setup_test().await;

    let user = create_user(&app, "target@example.com").await;

    let result = app
        .store_state
        .ledger_service
        .adjust_balance(user.id, 0, None)
        .await;
    assert!(matches!(result, Err(StoreError::InvalidAmount { amount: 0 })));
}

/// 테스트: 잔고를 초과하는 차감 조정은 거절되고 아무 흔적도 남기지 않음
#[tokio::test]
async fn test_adjust_balance_cannot_overdraw() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "target@example.com", 50_000).await;

    let result = app
        .store_state
        .ledger_service
        .adjust_balance(user.id, -100_000, None)
        .await;

    match result {
        Err(StoreError::InsufficientBalance { required, available }) => {
            assert_eq!(required, 100_000);
            assert_eq!(available, 50_000);
        }
        other => panic!("Expected InsufficientBalance, got {:?}", other),
    }

    let stored = fetch_user(&app, user.id).await;
    assert_eq!(stored.balance, 50_000, "Balance must be untouched");

    let (transactions, _) = app
        .store_state
        .ledger_service
        .history(user.id, None)
        .await
        .expect("History should succeed");
    assert!(transactions.is_empty(), "Failed adjustments leave no ledger row");
}

/// 테스트: 존재하지 않는 사용자 조정
#[tokio::test]
async fn test_adjust_balance_unknown_user() {
    let app = setup_test().await;

    let result = app
        .store_state
        .ledger_service
        .adjust_balance(999, 10_000, None)
        .await;
    assert!(matches!(result, Err(StoreError::UserNotFound { id: 999 })));
}

/// 테스트: 환불은 구매의 역연산
///
/// 결제액 환급, REFUND 원장 엔트리, 소유권 회수, 다운로드 감소가
/// 모두 반영되고, 같은 구매를 두 번 환불할 수 없습니다.
#[tokio::test]
async fn test_refund_reverses_purchase() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "buyer@example.com", 100_000).await;
    let game = create_game(&app, "Stellar Frontier", 64_000).await;

    let (purchase, _) = app
        .store_state
        .purchase_service
        .purchase(user.id, game.id)
        .await
        .expect("Purchase should succeed");

    let (refund_tx, new_balance) = app
        .store_state
        .purchase_service
        .refund(purchase.id)
        .await
        .expect("Refund should succeed");

    // 잔고 원상 복구
    assert_eq!(new_balance, 100_000);
    let stored = fetch_user(&app, user.id).await;
    assert_eq!(stored.balance, 100_000);

    // REFUND 원장 엔트리
    assert_eq!(refund_tx.transaction_type, TransactionType::Refund);
    assert_eq!(refund_tx.status, TransactionStatus::Approved);
    assert_eq!(refund_tx.amount, 64_000, "Refund credits the paid amount back");
    assert_eq!(refund_tx.related_game_id, Some(game.id));

    // 소유권 회수
    let library = app
        .store_state
        .purchase_service
        .library(user.id)
        .await
        .expect("Library should succeed");
    assert!(library.is_empty(), "Refund revokes ownership");

    // 다운로드 수 감소
    let stored_game = fetch_game(&app, game.id).await;
    assert_eq!(stored_game.downloads, 0);

    // 원장에는 구매와 환불이 둘 다 남음 (append-only)
    let (transactions, _) = app
        .store_state
        .ledger_service
        .history(user.id, None)
        .await
        .expect("History should succeed");
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].transaction_type, TransactionType::Refund);
    assert_eq!(transactions[1].transaction_type, TransactionType::Purchase);

    // 이중 환불 방지 (구매 기록이 이미 삭제됨)
    let again = app.store_state.purchase_service.refund(purchase.id).await;
    assert!(matches!(again, Err(StoreError::PurchaseNotFound { .. })));

    println!("✅ Refund reversed the purchase, double refund rejected");
}

/// 테스트: 환불액은 현재 판매가가 아니라 구매 시점 스냅샷 기준
#[tokio::test]
async fn test_refund_uses_price_paid_snapshot() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "buyer@example.com", 100_000).await;
    let game = create_game(&app, "Stellar Frontier", 64_000).await;

    let (purchase, _) = app
        .store_state
        .purchase_service
        .purchase(user.id, game.id)
        .await
        .expect("Purchase should succeed");

    // 구매 후 가격 인상
    app.catalog_state
        .game_service
        .update_game(
            game.id,
            game_store::domains::catalog::models::game::UpdateGameRequest {
                title: None,
                developer: None,
                genre: None,
                description: None,
                price: Some(80_000),
            },
        )
        .await
        .expect("Price update should succeed");

    let (refund_tx, new_balance) = app
        .store_state
        .purchase_service
        .refund(purchase.id)
        .await
        .expect("Refund should succeed");

    assert_eq!(refund_tx.amount, 64_000, "Refund pays back what was paid, not the new price");
    assert_eq!(new_balance, 100_000);
}

/// 테스트: 입금 대기열은 요청자 이메일과 함께 오래된 순으로
#[tokio::test]
async fn test_deposit_queue_oldest_first() {
    let app = setup_test().await;

    let alice = create_user(&app, "alice@example.com").await;
    let bob = create_user(&app, "bob@example.com").await;
    let admin = create_admin(&app, "admin@example.com").await;

    let first = app
        .store_state
        .deposit_service
        .request_deposit(alice.id, 10_000, None)
        .await
        .expect("Deposit request should succeed");
    let second = app
        .store_state
        .deposit_service
        .request_deposit(bob.id, 20_000, None)
        .await
        .expect("Deposit request should succeed");
    let third = app
        .store_state
        .deposit_service
        .request_deposit(alice.id, 30_000, None)
        .await
        .expect("Deposit request should succeed");

    // 심사된 요청은 대기열에서 빠짐
    app.store_state
        .deposit_service
        .approve_deposit(admin.id, second.id)
        .await
        .expect("Approval should succeed");

    let queue = app
        .store_state
        .deposit_service
        .pending_queue()
        .await
        .expect("Queue should succeed");

    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0].transaction.id, first.id, "Oldest request comes first");
    assert_eq!(queue[0].user_email, "alice@example.com");
    assert_eq!(queue[1].transaction.id, third.id);
    assert_eq!(queue[1].user_email, "alice@example.com");

    println!("✅ Deposit queue: {} pending, oldest first", queue.len());
}

/// 테스트: 사용자 목록 (가입 순, 역할 포함, 페이지네이션)
#[tokio::test]
async fn test_list_users() {
    let app = setup_test().await;

    let admin = create_admin(&app, "admin@example.com").await;
    let alice = create_user(&app, "alice@example.com").await;
    let bob = create_user_with_balance(&app, "bob@example.com", 77_000).await;

    let users = app
        .auth_state
        .auth_service
        .list_users(None, None)
        .await
        .expect("Listing should succeed");

    assert_eq!(users.len(), 3);
    assert_eq!(users[0].id, admin.id);
    assert_eq!(users[0].role, Role::Admin);
    assert_eq!(users[1].id, alice.id);
    assert_eq!(users[1].role, Role::Customer);
    assert_eq!(users[2].id, bob.id);
    assert_eq!(users[2].balance, 77_000);

    // 페이지네이션: 2명씩 끊으면 두 번째 페이지는 bob 혼자
    let second_page = app
        .auth_state
        .auth_service
        .list_users(Some(2), Some(2))
        .await
        .expect("Listing should succeed");
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].id, bob.id);
}
