// Catalog domain routes
// 카탈로그 도메인 라우터
use axum::{routing::{get, post, put}, Router};
use crate::domains::catalog::handlers::game_handler;
use crate::shared::services::AppState;

/// 게임 카탈로그 라우터 생성 (공개)
/// Create games router (public)
///
/// # Routes
/// - `GET /api/games` - 게임 목록 (검색/필터/정렬)
/// - `GET /api/games/:game_id` - 게임 상세
pub fn create_games_router() -> Router<AppState> {
    Router::new()
        .route("/", get(game_handler::list_games))
        .route("/:game_id", get(game_handler::get_game))
}

/// 추천 라우터 생성 (로그인 사용자 전용)
/// Create recommendations router (authenticated users)
///
/// # Routes
/// - `GET /api/customer/recommendations` - 맞춤 추천 목록
pub fn create_recommendations_router() -> Router<AppState> {
    Router::new()
        .route("/recommendations", get(game_handler::recommendations))
}

/// 카탈로그 관리자 라우터 생성
/// Create catalog admin router
///
/// # Routes
/// - `POST /api/admin/games` - 게임 등록
/// - `PUT  /api/admin/games/:game_id` - 게임 수정
pub fn create_catalog_admin_router() -> Router<AppState> {
    Router::new()
        .route("/games", post(game_handler::create_game))
        .route("/games/:game_id", put(game_handler::update_game))
}
