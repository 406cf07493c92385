use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 카탈로그 관련 에러
/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// 게임을 찾을 수 없음
    /// Game not found
    #[error("Game not found: id={id}")]
    GameNotFound { id: u64 },

    /// 잘못된 가격 (음수)
    /// Invalid price (negative)
    #[error("Invalid price: {price}")]
    InvalidPrice { price: i64 },

    /// 잘못된 제목 (빈 문자열)
    /// Invalid title (blank)
    #[error("Invalid title")]
    InvalidTitle,

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// CatalogError를 HTTP 응답으로 변환
impl From<CatalogError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: CatalogError) -> Self {
        let (status, code) = match &err {
            CatalogError::GameNotFound { .. } => {
                (StatusCode::NOT_FOUND, "GAME_NOT_FOUND")
            }
            CatalogError::InvalidPrice { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_PRICE")
            }
            CatalogError::InvalidTitle => {
                (StatusCode::BAD_REQUEST, "INVALID_TITLE")
            }
            CatalogError::DatabaseError(_) => {
                tracing::error!("catalog error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR")
            }
        };

        (status, Json(json!({ "error": code })))
    }
}
