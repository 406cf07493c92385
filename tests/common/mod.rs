// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 모든 통합 테스트에서 공통으로 사용하는 셋업/시드 함수 제공
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let app = setup_test().await;
//     // 테스트 코드...
// }
// ```
//
// 각 테스트는 자기만의 인메모리 SQLite DB를 사용하므로
// 테스트 간 간섭이 없고 별도의 티어다운이 필요 없음.
// =====================================================

use game_store::domains::auth::models::{SignupRequest, User};
use game_store::domains::catalog::models::game::{CreateGameRequest, Game};
use game_store::shared::database::{Database, GameRepository, UserRepository};
use game_store::shared::services::AppState;

// 테스트용 상수
pub const TEST_DATABASE_URL: &str = "sqlite::memory:";
pub const TEST_PASSWORD: &str = "password123!";

/// 테스트 전 초기화
///
/// 인메모리 데이터베이스 연결, 마이그레이션, AppState 구성을 수행합니다.
pub async fn setup_test() -> AppState {
    // 1. 데이터베이스 연결 (테스트마다 새 인메모리 DB)
    let db = Database::new(TEST_DATABASE_URL)
        .await
        .expect("Failed to connect to database");

    // 2. 마이그레이션 실행
    db.initialize()
        .await
        .expect("Failed to initialize database");

    // 3. AppState 구성 (모든 도메인 서비스 포함)
    AppState::new(db).expect("Failed to initialize AppState")
}

/// 일반 사용자 생성 (잔고 0)
pub async fn create_user(app: &AppState, email: &str) -> User {
    app.auth_state
        .auth_service
        .signup(SignupRequest {
            email: email.to_string(),
            password: TEST_PASSWORD.to_string(),
            nickname: Some(format!("nick_{}", email.split('@').next().unwrap())),
        })
        .await
        .expect("Failed to create test user")
}

/// 일반 사용자 생성 + 잔고 설정
pub async fn create_user_with_balance(app: &AppState, email: &str, balance: i64) -> User {
    let user = create_user(app, email).await;
    set_balance(app, user.id, balance).await;
    fetch_user(app, user.id).await
}

/// 관리자 계정 생성
pub async fn create_admin(app: &AppState, email: &str) -> User {
    app.auth_state
        .auth_service
        .ensure_admin(email, TEST_PASSWORD)
        .await
        .expect("Failed to create admin user")
        .expect("Admin email already taken")
}

/// 게임 등록 (관리자 서비스 경유)
pub async fn create_game(app: &AppState, title: &str, price: i64) -> Game {
    app.catalog_state
        .game_service
        .create_game(CreateGameRequest {
            title: title.to_string(),
            developer: Some("Test Studio".to_string()),
            genre: Some("RPG".to_string()),
            description: None,
            price,
        })
        .await
        .expect("Failed to create test game")
}

/// 잔고 직접 설정 (시드용)
pub async fn set_balance(app: &AppState, user_id: u64, balance: i64) {
    sqlx::query("UPDATE users SET balance = ? WHERE id = ?")
        .bind(balance)
        .bind(user_id as i64)
        .execute(app.db.pool())
        .await
        .expect("Failed to set test balance");
}

/// 사용자 재조회
pub async fn fetch_user(app: &AppState, user_id: u64) -> User {
    UserRepository::new(app.db.pool().clone())
        .get_user_by_id(user_id)
        .await
        .expect("Failed to fetch user")
        .expect("User not found")
}

/// 게임 재조회
pub async fn fetch_game(app: &AppState, game_id: u64) -> Game {
    GameRepository::new(app.db.pool().clone())
        .get_by_id(game_id)
        .await
        .expect("Failed to fetch game")
        .expect("Game not found")
}
