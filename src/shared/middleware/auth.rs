use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use crate::domains::auth::models::user::Role;
use crate::shared::services::AppState;
use crate::shared::errors::AuthError;

// Rejection 타입으로 변환하는 로컬 헬퍼 (코드 기반 에러 본문 유지)
// Local helper producing the rejection tuple (keeps the code-based error body)
fn reject(err: AuthError) -> (StatusCode, axum::Json<serde_json::Value>) {
    err.into()
}

/// 인증된 사용자 정보 (JWT 토큰에서 추출)
/// Authenticated user information (extracted from JWT token)
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: u64,
    pub email: String,
    pub role: Role,
}

/// AuthenticatedUser를 Axum Extractor로 구현
///
/// 사용법:
/// ```rust,ignore
/// pub async fn purchase_game(
///     State(app_state): State<AppState>,
///     authenticated_user: AuthenticatedUser,  // <- 이렇게 사용!
/// ) -> Result<...> {
///     let user_id = authenticated_user.user_id;
///     // ...
/// }
/// ```
#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = (StatusCode, axum::Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. Authorization 헤더에서 토큰 추출
        let headers = &parts.headers;
        let auth_header = headers
            .get("Authorization")
            .ok_or_else(|| reject(AuthError::MissingToken))?
            .to_str()
            .map_err(|_| reject(AuthError::InvalidToken))?;

        // 2. "Bearer <token>" 형식 파싱
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| reject(AuthError::MissingToken))?;

        // 3. JWT Service로 토큰 검증 (AppState에서 가져옴)
        let claims = state
            .auth_state
            .jwt_service
            .verify_access_token(token)
            .map_err(reject)?;

        // 4. AuthenticatedUser 반환
        Ok(AuthenticatedUser {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// 관리자 사용자 (role=ADMIN claim 필수)
/// Admin user (requires the role=ADMIN claim)
///
/// 관리자 전용 핸들러는 이 추출기를 받는 것만으로 보호됨.
/// Admin-only handlers are protected just by taking this extractor.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: u64,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = (StatusCode, axum::Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 일반 인증을 먼저 통과한 뒤 role claim 확인
        // Run the regular authentication first, then check the role claim
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if user.role != Role::Admin {
            return Err(reject(AuthError::Forbidden));
        }

        Ok(AdminUser {
            user_id: user.user_id,
            email: user.email,
        })
    }
}
