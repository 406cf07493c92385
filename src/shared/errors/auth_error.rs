use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// 인증 관련 에러
/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// 이메일이 이미 존재함
    /// Email already exists
    #[error("Email already exists: {email}")]
    EmailAlreadyExists { email: String },

    /// 잘못된 이메일 또는 비밀번호
    /// Invalid email or password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// 사용자를 찾을 수 없음
    /// User not found
    #[error("User not found: id={id}")]
    UserNotFound { id: u64 },

    /// 비밀번호 해싱 실패
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    PasswordHashingFailed(String),

    /// 비밀번호 검증 실패
    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    PasswordVerificationFailed(String),

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러
    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),

    /// 잘못된 또는 만료된 토큰
    /// Invalid or expired token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// 토큰이 제공되지 않음
    /// Token not provided
    #[error("Token not provided")]
    MissingToken,

    /// 관리자 권한 필요
    /// Admin role required
    #[error("Admin role required")]
    Forbidden,
}

/// AuthError를 HTTP 응답으로 변환
/// 응답 본문은 항상 { "error": CODE } 형태의 안정적인 코드
impl From<AuthError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: AuthError) -> Self {
        let (status, code) = match &err {
            AuthError::EmailAlreadyExists { .. } => {
                (StatusCode::BAD_REQUEST, "EMAIL_EXISTS")
            }
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
            }
            AuthError::UserNotFound { .. } => {
                (StatusCode::NOT_FOUND, "USER_NOT_FOUND")
            }
            AuthError::PasswordHashingFailed(_)
            | AuthError::PasswordVerificationFailed(_)
            | AuthError::DatabaseError(_)
            | AuthError::Internal(_) => {
                // 내부 원인은 로그로만 남기고 클라이언트에는 일반 코드만 노출
                // Internal detail stays in the log; clients only see the generic code
                tracing::error!("auth error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR")
            }
            AuthError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "INVALID_TOKEN")
            }
            AuthError::MissingToken => {
                (StatusCode::UNAUTHORIZED, "MISSING_TOKEN")
            }
            AuthError::Forbidden => {
                (StatusCode::FORBIDDEN, "FORBIDDEN")
            }
        };

        (status, Json(json!({ "error": code })))
    }
}
