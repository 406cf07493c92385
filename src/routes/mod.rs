// Routes module: 라우팅 설정
// 역할: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

use axum::Router;
use crate::shared::services::AppState;

// 각 도메인의 routes import
use crate::domains::auth::routes::{create_auth_admin_router, create_auth_router};
use crate::domains::catalog::routes::{
    create_catalog_admin_router, create_games_router, create_recommendations_router,
};
use crate::domains::social::routes::{create_game_reviews_router, create_social_router};
use crate::domains::store::routes::{create_store_admin_router, create_store_router};

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
///
/// Prefix 구성:
/// - `/api/auth` - 회원가입/로그인/토큰
/// - `/api/games` - 공개 카탈로그 (목록/상세/리뷰)
/// - `/api/customer` - 로그인 사용자 기능 (구매/잔고/리뷰/위시리스트/추천)
/// - `/api/admin` - 관리자 백오피스 (입금 심사/게임 관리/잔고 조정/환불)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", create_auth_router())
        .nest(
            "/api/games",
            create_games_router().merge(create_game_reviews_router()),
        )
        .nest(
            "/api/customer",
            create_store_router()
                .merge(create_social_router())
                .merge(create_recommendations_router()),
        )
        .nest(
            "/api/admin",
            create_store_admin_router()
                .merge(create_catalog_admin_router())
                .merge(create_auth_admin_router()),
        )
}
