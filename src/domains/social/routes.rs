// Social domain routes
// 소셜 도메인 라우터 (리뷰/위시리스트)
use axum::{routing::{delete, get, post}, Router};
use crate::domains::social::handlers::{review_handler, wishlist_handler};
use crate::shared::services::AppState;

/// 소셜 라우터 생성 (로그인 사용자 전용)
/// Create social router (authenticated users)
///
/// # Routes
/// - `POST   /api/customer/reviews` - 리뷰 작성
/// - `GET    /api/customer/reviews` - 내가 쓴 리뷰 목록
/// - `GET    /api/customer/wishlist` - 위시리스트 목록
/// - `POST   /api/customer/wishlist` - 위시리스트 추가
/// - `DELETE /api/customer/wishlist/:game_id` - 위시리스트 삭제
pub fn create_social_router() -> Router<AppState> {
    Router::new()
        .route("/reviews",
            post(review_handler::create_review)
                .get(review_handler::list_my_reviews)
        )
        .route("/wishlist",
            get(wishlist_handler::list_wishlist)
                .post(wishlist_handler::add_to_wishlist)
        )
        .route("/wishlist/:game_id", delete(wishlist_handler::remove_from_wishlist))
}

/// 게임별 리뷰 라우터 생성 (공개, /api/games 아래에 중첩)
/// Create per-game review router (public, nested under /api/games)
///
/// # Routes
/// - `GET /api/games/:game_id/reviews` - 게임별 리뷰 목록
pub fn create_game_reviews_router() -> Router<AppState> {
    Router::new()
        .route("/:game_id/reviews", get(review_handler::list_game_reviews))
}
