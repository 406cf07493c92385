// =====================================================
// 전체 시나리오 통합 테스트
// =====================================================
// 목적: 가입부터 구매/리뷰까지의 여정과 인증 흐름이
//       도메인을 가로질러 올바르게 맞물리는지 검증
//
// 시나리오:
// 1. 가입 -> 게임 등록 -> 입금 요청 -> 관리자 승인
// 2. 구매 -> 라이브러리 -> 리뷰 -> 내역/집계 일치 확인
// =====================================================

mod common;
use common::*;

use game_store::domains::auth::models::{Role, SigninRequest, SignupRequest};
use game_store::domains::store::models::transaction::TransactionType;
use game_store::shared::errors::AuthError;

/// 테스트: 가입부터 리뷰까지의 전체 여정
#[tokio::test]
async fn test_full_customer_journey() {
    let app = setup_test().await;

    // 1. 가입 (항상 CUSTOMER 역할)
    let user = app
        .auth_state
        .auth_service
        .signup(SignupRequest {
            email: "player@example.com".to_string(),
            password: TEST_PASSWORD.to_string(),
            nickname: Some("player1".to_string()),
        })
        .await
        .expect("Signup should succeed");
    assert_eq!(user.role, Role::Customer);
    assert_eq!(user.balance, 0, "New accounts start with zero balance");

    // 2. 관리자 시드 + 게임 등록
    let admin = create_admin(&app, "admin@example.com").await;
    assert_eq!(admin.role, Role::Admin);
    let game = create_game(&app, "Stellar Frontier", 64_000).await;

    // 3. 입금 요청 -> 관리자 대기열 -> 승인
    let deposit = app
        .store_state
        .deposit_service
        .request_deposit(user.id, 100_000, Some("첫 충전".to_string()))
        .await
        .expect("Deposit request should succeed");

    let queue = app
        .store_state
        .deposit_service
        .pending_queue()
        .await
        .expect("Queue should succeed");
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].user_email, "player@example.com");

    let (_, balance_after_deposit) = app
        .store_state
        .deposit_service
        .approve_deposit(admin.id, deposit.id)
        .await
        .expect("Approval should succeed");
    assert_eq!(balance_after_deposit, 100_000);

    // 4. 구매 -> 라이브러리 반영
    let (purchase, balance_after_purchase) = app
        .store_state
        .purchase_service
        .purchase(user.id, game.id)
        .await
        .expect("Purchase should succeed");
    assert_eq!(balance_after_purchase, 36_000);

    let library = app
        .store_state
        .purchase_service
        .library(user.id)
        .await
        .expect("Library should succeed");
    assert_eq!(library.len(), 1);
    assert_eq!(library[0].purchase_id, purchase.id);
    assert_eq!(library[0].title, "Stellar Frontier");

    // 5. 소유한 게임에 리뷰 작성
    app.social_state
        .review_service
        .create_review(user.id, game.id, 5, Some("인생 게임"))
        .await
        .expect("Review should succeed");

    let (reviews, average) = app
        .social_state
        .review_service
        .game_reviews(game.id)
        .await
        .expect("Review listing should succeed");
    assert_eq!(reviews.len(), 1);
    assert_eq!(average, Some(5.0));
    assert_eq!(reviews[0].author, "player1");

    // 6. 내역과 집계가 잔고와 일치
    let (transactions, stats) = app
        .store_state
        .ledger_service
        .history(user.id, None)
        .await
        .expect("History should succeed");
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0].transaction_type, TransactionType::Purchase);
    assert_eq!(transactions[1].transaction_type, TransactionType::Deposit);
    assert_eq!(stats.total_deposited, 100_000);
    assert_eq!(stats.total_spent, 64_000);

    let stored = fetch_user(&app, user.id).await;
    assert_eq!(
        stored.balance,
        stats.total_deposited - stats.total_spent,
        "Live balance must equal the ledger sum"
    );

    println!("✅ Full journey: signup -> deposit -> purchase -> review verified");
}

/// 테스트: 이메일 중복 가입 거절
#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = setup_test().await;

    create_user(&app, "player@example.com").await;

    let result = app
        .auth_state
        .auth_service
        .signup(SignupRequest {
            email: "player@example.com".to_string(),
            password: TEST_PASSWORD.to_string(),
            nickname: None,
        })
        .await;

    match result {
        Err(AuthError::EmailAlreadyExists { email }) => {
            assert_eq!(email, "player@example.com");
        }
        other => panic!("Expected EmailAlreadyExists, got {:?}", other),
    }
}

/// 테스트: 로그인 성공과 실패
#[tokio::test]
async fn test_signin() {
    let app = setup_test().await;

    let user = create_user(&app, "player@example.com").await;

    // 성공: 사용자 정보와 Access Token 반환
    let (signed_in, access_token) = app
        .auth_state
        .auth_service
        .signin(SigninRequest {
            email: "player@example.com".to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await
        .expect("Signin should succeed");
    assert_eq!(signed_in.id, user.id);
    assert!(!access_token.is_empty());

    // 잘못된 비밀번호
    let wrong_password = app
        .auth_state
        .auth_service
        .signin(SigninRequest {
            email: "player@example.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await;
    assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));

    // 존재하지 않는 이메일 (어느 쪽이 틀렸는지 구분하지 않음)
    let unknown_email = app
        .auth_state
        .auth_service
        .signin(SigninRequest {
            email: "nobody@example.com".to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await;
    assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
}

/// 테스트: Refresh Token 회전
///
/// 갱신할 때마다 기존 토큰이 무효화되고 새 토큰이 발급됩니다.
/// 사용된 토큰의 재사용은 거절되어야 합니다.
#[tokio::test]
async fn test_refresh_token_rotation() {
    let app = setup_test().await;

    let user = create_user(&app, "player@example.com").await;

    let refresh_token = app
        .auth_state
        .auth_service
        .create_refresh_token(user.id)
        .await
        .expect("Refresh token creation should succeed");

    // 1차 갱신: 새 Access/Refresh Token 발급
    let (access_token, rotated_token) = app
        .auth_state
        .auth_service
        .refresh_access_token(&refresh_token)
        .await
        .expect("Refresh should succeed");
    assert!(!access_token.is_empty());
    assert_ne!(rotated_token, refresh_token, "Rotation must issue a new token");

    // 사용된 토큰의 재사용 거절
    let reuse = app
        .auth_state
        .auth_service
        .refresh_access_token(&refresh_token)
        .await;
    assert!(
        matches!(reuse, Err(AuthError::InvalidToken)),
        "A rotated-out token must be rejected"
    );

    // 회전으로 받은 새 토큰은 유효
    app.auth_state
        .auth_service
        .refresh_access_token(&rotated_token)
        .await
        .expect("The rotated token should work");

    println!("✅ Refresh rotation: old token dead, new token alive");
}

/// 테스트: 로그아웃은 Refresh Token을 무효화
#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let app = setup_test().await;

    let user = create_user(&app, "player@example.com").await;

    let refresh_token = app
        .auth_state
        .auth_service
        .create_refresh_token(user.id)
        .await
        .expect("Refresh token creation should succeed");

    app.auth_state
        .auth_service
        .logout(&refresh_token)
        .await
        .expect("Logout should succeed");

    let after_logout = app
        .auth_state
        .auth_service
        .refresh_access_token(&refresh_token)
        .await;
    assert!(matches!(after_logout, Err(AuthError::InvalidToken)));
}

/// 테스트: 사용자 정보 조회
#[tokio::test]
async fn test_get_user_info() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "player@example.com", 42_000).await;

    let info = app
        .auth_state
        .auth_service
        .get_user_info(user.id)
        .await
        .expect("Lookup should succeed");
    assert_eq!(info.email, "player@example.com");
    assert_eq!(info.balance, 42_000);

    // 존재하지 않는 사용자
    let missing = app.auth_state.auth_service.get_user_info(999).await;
    assert!(matches!(missing, Err(AuthError::InvalidToken)));
}

/// 테스트: 관리자 시드는 멱등적
#[tokio::test]
async fn test_ensure_admin_idempotent() {
    let app = setup_test().await;

    let first = app
        .auth_state
        .auth_service
        .ensure_admin("admin@example.com", TEST_PASSWORD)
        .await
        .expect("Seeding should succeed");
    assert!(first.is_some(), "First call creates the admin");

    let second = app
        .auth_state
        .auth_service
        .ensure_admin("admin@example.com", TEST_PASSWORD)
        .await
        .expect("Second call should succeed");
    assert!(second.is_none(), "Existing accounts are left untouched");

    let users = app
        .auth_state
        .auth_service
        .list_users(None, None)
        .await
        .expect("Listing should succeed");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, Role::Admin);
}

/// 테스트: 만료 토큰 정리는 유효한 토큰을 건드리지 않음
#[tokio::test]
async fn test_cleanup_expired_tokens() {
    let app = setup_test().await;

    let user = create_user(&app, "player@example.com").await;

    let refresh_token = app
        .auth_state
        .auth_service
        .create_refresh_token(user.id)
        .await
        .expect("Refresh token creation should succeed");

    // 만료된 토큰 하나를 직접 심음
    sqlx::query(
        "INSERT INTO refresh_tokens (user_id, token_hash, expires_at, revoked, created_at)
         VALUES (?, ?, datetime('now', '-1 day'), 0, datetime('now', '-8 day'))",
    )
    .bind(user.id as i64)
    .bind("stale-hash")
    .execute(app.db.pool())
    .await
    .expect("Failed to seed expired token");

    let deleted = app
        .auth_state
        .auth_service
        .cleanup_expired_tokens()
        .await
        .expect("Cleanup should succeed");
    assert_eq!(deleted, 1, "Only the expired token is removed");

    // 유효한 토큰은 그대로 동작
    app.auth_state
        .auth_service
        .refresh_access_token(&refresh_token)
        .await
        .expect("Valid tokens must survive the cleanup");
}
