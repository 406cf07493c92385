use crate::domains::social::models::wishlist::{
    AddWishlistRequest, AddWishlistResponse, RemoveWishlistResponse, WishlistResponse,
};
use crate::shared::errors::SocialError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

// =====================================================
// Wishlist Handler
// =====================================================
// 역할: 위시리스트 HTTP API 엔드포인트
// =====================================================

/// 위시리스트 추가 핸들러
/// Add to wishlist handler
///
/// # Authentication
/// JWT 토큰 필요 (Bearer token)
///
/// # Request Body
/// - game_id: 찜할 게임 ID
///
/// # Response
/// - 201: 추가 성공
/// - 400: 이미 위시리스트에 있음
/// - 404: 게임을 찾을 수 없음
#[utoipa::path(
    post,
    path = "/api/customer/wishlist",
    request_body = AddWishlistRequest,
    responses(
        (status = 201, description = "Game added to wishlist", body = AddWishlistResponse),
        (status = 400, description = "Game already wishlisted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Game not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Social",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn add_to_wishlist(
    State(app_state): State<AppState>,
    AuthenticatedUser { user_id, .. }: AuthenticatedUser,
    Json(request): Json<AddWishlistRequest>,
) -> Result<(StatusCode, Json<AddWishlistResponse>), (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let item = app_state
        .social_state
        .wishlist_service
        .add(user_id, request.game_id)
        .await
        .map_err(|e: SocialError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok((
        StatusCode::CREATED,
        Json(AddWishlistResponse {
            item,
            message: "Game added to wishlist".to_string(),
        }),
    ))
}

/// 위시리스트 삭제 핸들러
/// Remove from wishlist handler
///
/// # Authentication
/// JWT 토큰 필요 (Bearer token)
///
/// # Path Parameters
/// - game_id: 제거할 게임 ID
///
/// # Response
/// - 200: 삭제 성공
/// - 404: 위시리스트에 없음
#[utoipa::path(
    delete,
    path = "/api/customer/wishlist/{game_id}",
    params(
        ("game_id" = u64, Path, description = "Game ID to remove from the wishlist")
    ),
    responses(
        (status = 200, description = "Game removed from wishlist", body = RemoveWishlistResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Game not on the wishlist"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Social",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn remove_from_wishlist(
    State(app_state): State<AppState>,
    AuthenticatedUser { user_id, .. }: AuthenticatedUser,
    Path(game_id): Path<u64>,
) -> Result<Json<RemoveWishlistResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    app_state
        .social_state
        .wishlist_service
        .remove(user_id, game_id)
        .await
        .map_err(|e: SocialError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(RemoveWishlistResponse {
        message: "Game removed from wishlist".to_string(),
    }))
}

/// 위시리스트 목록 핸들러
/// List wishlist handler
///
/// 찜한 게임 목록을 최근 추가 순으로 반환합니다.
///
/// # Authentication
/// JWT 토큰 필요 (Bearer token)
///
/// # Response
/// - 200: 위시리스트 조회 성공
/// - 401: 인증 실패
#[utoipa::path(
    get,
    path = "/api/customer/wishlist",
    responses(
        (status = 200, description = "Wishlist retrieved successfully", body = WishlistResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Social",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn list_wishlist(
    State(app_state): State<AppState>,
    AuthenticatedUser { user_id, .. }: AuthenticatedUser,
) -> Result<Json<WishlistResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let items = app_state
        .social_state
        .wishlist_service
        .list(user_id)
        .await
        .map_err(|e: SocialError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(WishlistResponse { items }))
}
