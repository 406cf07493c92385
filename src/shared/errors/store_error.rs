use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 구매/원장 관련 에러
/// Purchase/ledger errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// 잘못된 금액 (0 이하의 입금, 0인 조정 등)
    /// Invalid amount (non-positive deposit, zero adjustment, ...)
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: i64 },

    /// 잔고 부족
    /// Insufficient balance
    #[error("Insufficient balance: required={required}, available={available}")]
    InsufficientBalance { required: i64, available: i64 },

    /// 이미 구매한 게임
    /// Game already purchased
    #[error("Game already purchased: game_id={game_id}")]
    AlreadyPurchased { game_id: u64 },

    /// 심사할 수 없는 거래 상태
    /// Transaction is not in a reviewable state
    #[error("Transaction not reviewable: id={id}, status={status}")]
    InvalidTransactionStatus { id: u64, status: String },

    /// 게임을 찾을 수 없음
    /// Game not found
    #[error("Game not found: id={id}")]
    GameNotFound { id: u64 },

    /// 사용자를 찾을 수 없음
    /// User not found
    #[error("User not found: id={id}")]
    UserNotFound { id: u64 },

    /// 거래를 찾을 수 없음
    /// Transaction not found
    #[error("Transaction not found: id={id}")]
    TransactionNotFound { id: u64 },

    /// 구매 기록을 찾을 수 없음
    /// Purchase not found
    #[error("Purchase not found: id={id}")]
    PurchaseNotFound { id: u64 },

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// StoreError를 HTTP 응답으로 변환
/// 응답 본문은 항상 { "error": CODE } 형태의 안정적인 코드
impl From<StoreError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: StoreError) -> Self {
        let (status, code) = match &err {
            StoreError::InvalidAmount { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_AMOUNT")
            }
            StoreError::InsufficientBalance { .. } => {
                (StatusCode::BAD_REQUEST, "INSUFFICIENT_BALANCE")
            }
            StoreError::AlreadyPurchased { .. } => {
                (StatusCode::BAD_REQUEST, "ALREADY_PURCHASED")
            }
            StoreError::InvalidTransactionStatus { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_TRANSACTION_STATUS")
            }
            StoreError::GameNotFound { .. } => {
                (StatusCode::NOT_FOUND, "GAME_NOT_FOUND")
            }
            StoreError::UserNotFound { .. } => {
                (StatusCode::NOT_FOUND, "USER_NOT_FOUND")
            }
            StoreError::TransactionNotFound { .. } => {
                (StatusCode::NOT_FOUND, "TRANSACTION_NOT_FOUND")
            }
            StoreError::PurchaseNotFound { .. } => {
                (StatusCode::NOT_FOUND, "PURCHASE_NOT_FOUND")
            }
            StoreError::DatabaseError(_) => {
                // 내부 원인은 로그로만 남기고 클라이언트에는 일반 코드만 노출
                // Internal detail stays in the log; clients only see the generic code
                tracing::error!("store error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR")
            }
        };

        (status, Json(json!({ "error": code })))
    }
}
