use crate::domains::store::models::purchase::{
    LibraryResponse, PurchaseRequest, PurchaseResponse, RefundResponse,
};
use crate::shared::errors::StoreError;
use crate::shared::middleware::auth::{AdminUser, AuthenticatedUser};
use crate::shared::services::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

// =====================================================
// Purchase Handler
// =====================================================
// 역할: 구매/라이브러리/환불 HTTP API 엔드포인트
//
// 처리 흐름:
// HTTP Request → Handler → Service → Repository → Response
// =====================================================

/// 게임 구매 핸들러
/// Purchase game handler
///
/// 잔고를 차감하고 소유권과 원장 거래를 한 트랜잭션으로 기록합니다.
///
/// # Authentication
/// JWT 토큰 필요 (Bearer token)
///
/// # Request Body
/// - game_id: 구매할 게임 ID
///
/// # Response
/// - 201: 구매 성공 (구매 기록 + 차감 후 잔고)
/// - 400: 잔고 부족 또는 이미 구매한 게임
/// - 401: 인증 실패
/// - 404: 게임을 찾을 수 없음
#[utoipa::path(
    post,
    path = "/api/customer/purchases",
    request_body = PurchaseRequest,
    responses(
        (status = 201, description = "Purchase settled successfully", body = PurchaseResponse),
        (status = 400, description = "Insufficient balance or already purchased"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Game not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Store",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn purchase_game(
    State(app_state): State<AppState>,
    AuthenticatedUser { user_id, .. }: AuthenticatedUser,
    Json(request): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<PurchaseResponse>), (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let (purchase, new_balance) = app_state
        .store_state
        .purchase_service
        .purchase(user_id, request.game_id)
        .await
        .map_err(|e: StoreError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok((
        StatusCode::CREATED,
        Json(PurchaseResponse {
            purchase,
            new_balance,
            message: "Purchase completed successfully".to_string(),
        }),
    ))
}

/// 내 라이브러리 조회 핸들러
/// Get my library handler
///
/// 구매한 게임 목록을 게임 정보와 함께 반환합니다 (최근 구매 순).
///
/// # Authentication
/// JWT 토큰 필요 (Bearer token)
///
/// # Response
/// - 200: 라이브러리 조회 성공
/// - 401: 인증 실패
#[utoipa::path(
    get,
    path = "/api/customer/library",
    responses(
        (status = 200, description = "Library retrieved successfully", body = LibraryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Store",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn get_library(
    State(app_state): State<AppState>,
    AuthenticatedUser { user_id, .. }: AuthenticatedUser,
) -> Result<Json<LibraryResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let games = app_state
        .store_state
        .purchase_service
        .library(user_id)
        .await
        .map_err(|e: StoreError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(LibraryResponse { games }))
}

/// 구매 환불 핸들러 (관리자 전용)
/// Refund purchase handler (admin only)
///
/// 구매 금액을 돌려주고 소유권을 회수합니다. REFUND 거래가 기록됩니다.
///
/// # Authentication
/// JWT 토큰 필요 (ADMIN 권한)
///
/// # Path Parameters
/// - purchase_id: 환불할 구매 기록 ID
///
/// # Response
/// - 200: 환불 성공
/// - 403: 관리자 권한 없음
/// - 404: 구매 기록을 찾을 수 없음 (이미 환불된 경우 포함)
#[utoipa::path(
    post,
    path = "/api/admin/purchases/{purchase_id}/refund",
    params(
        ("purchase_id" = u64, Path, description = "Purchase ID to refund")
    ),
    responses(
        (status = 200, description = "Purchase refunded successfully", body = RefundResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Purchase not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn refund_purchase(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(purchase_id): Path<u64>,
) -> Result<Json<RefundResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let (transaction, new_balance) = app_state
        .store_state
        .purchase_service
        .refund(purchase_id)
        .await
        .map_err(|e: StoreError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(RefundResponse {
        transaction,
        new_balance,
        message: "Purchase refunded successfully".to_string(),
    }))
}
