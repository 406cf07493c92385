use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 리뷰/위시리스트 관련 에러
/// Review/wishlist errors
#[derive(Error, Debug)]
pub enum SocialError {
    /// 게임을 찾을 수 없음
    /// Game not found
    #[error("Game not found: id={id}")]
    GameNotFound { id: u64 },

    /// 구매하지 않은 게임 (리뷰는 소유자만 작성 가능)
    /// Game not purchased (only owners may review)
    #[error("Game not purchased: game_id={game_id}")]
    NotPurchased { game_id: u64 },

    /// 잘못된 평점 (1~5 범위 밖)
    /// Invalid rating (outside 1..=5)
    #[error("Invalid rating: {rating}")]
    InvalidRating { rating: i64 },

    /// 이미 리뷰를 작성함
    /// Review already exists
    #[error("Review already exists: game_id={game_id}")]
    AlreadyReviewed { game_id: u64 },

    /// 이미 위시리스트에 있음
    /// Already wishlisted
    #[error("Already wishlisted: game_id={game_id}")]
    AlreadyWishlisted { game_id: u64 },

    /// 위시리스트에 없음
    /// Not on the wishlist
    #[error("Not wishlisted: game_id={game_id}")]
    NotWishlisted { game_id: u64 },

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// SocialError를 HTTP 응답으로 변환
impl From<SocialError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: SocialError) -> Self {
        let (status, code) = match &err {
            SocialError::GameNotFound { .. } => {
                (StatusCode::NOT_FOUND, "GAME_NOT_FOUND")
            }
            SocialError::NotPurchased { .. } => {
                (StatusCode::FORBIDDEN, "NOT_PURCHASED")
            }
            SocialError::InvalidRating { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_RATING")
            }
            SocialError::AlreadyReviewed { .. } => {
                (StatusCode::BAD_REQUEST, "ALREADY_REVIEWED")
            }
            SocialError::AlreadyWishlisted { .. } => {
                (StatusCode::BAD_REQUEST, "ALREADY_WISHLISTED")
            }
            SocialError::NotWishlisted { .. } => {
                (StatusCode::NOT_FOUND, "NOT_WISHLISTED")
            }
            SocialError::DatabaseError(_) => {
                tracing::error!("social error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR")
            }
        };

        (status, Json(json!({ "error": code })))
    }
}
