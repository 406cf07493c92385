use crate::domains::store::models::transaction::{
    DepositQueueResponse, DepositRequest, DepositRequestResponse, PendingDepositsResponse,
    RejectDepositRequest, ReviewDepositResponse,
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
// Deposit Handler
// =====================================================
// 역할: 입금 요청/심사 HTTP API 엔드포인트
//
// 입금 흐름:
// 1. 고객이 입금 요청 → PENDING 거래 생성 (잔고 변화 없음)
// 2. 관리자가 대기열 확인 → 승인(잔고 반영) 또는 거절(사유 기록)
// =====================================================

/// 입금 요청 핸들러
/// Request deposit handler
///
/// PENDING 거래를 만듭니다. 잔고는 관리자 승인 시점에 반영됩니다.
///
/// # Authentication
/// JWT 토큰 필요 (Bearer token)
///
/// # Request Body
/// - amount: 입금 금액 (양수)
/// - description: 설명 (optional)
///
/// # Response
/// - 201: 입금 요청 접수 (PENDING 거래 반환)
/// - 400: 금액이 0 이하
/// - 401: 인증 실패
#[utoipa::path(
    post,
    path = "/api/customer/balance/deposits",
    request_body = DepositRequest,
    responses(
        (status = 201, description = "Deposit request accepted", body = DepositRequestResponse),
        (status = 400, description = "Amount must be positive"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Store",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn request_deposit(
    State(app_state): State<AppState>,
    AuthenticatedUser { user_id, .. }: AuthenticatedUser,
    Json(request): Json<DepositRequest>,
) -> Result<(StatusCode, Json<DepositRequestResponse>), (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let transaction = app_state
        .store_state
        .deposit_service
        .request_deposit(user_id, request.amount, request.description)
        .await
        .map_err(|e: StoreError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok((
        StatusCode::CREATED,
        Json(DepositRequestResponse {
            transaction,
            message: "Deposit request submitted for review".to_string(),
        }),
    ))
}

/// 내 대기 중 입금 목록 핸들러
/// My pending deposits handler
///
/// 아직 심사되지 않은 내 입금 요청 목록 (최신순).
///
/// # Authentication
/// JWT 토큰 필요 (Bearer token)
///
/// # Response
/// - 200: 대기 중 입금 목록
/// - 401: 인증 실패
#[utoipa::path(
    get,
    path = "/api/customer/balance/deposits/pending",
    responses(
        (status = 200, description = "Pending deposits retrieved successfully", body = PendingDepositsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Store",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn my_pending_deposits(
    State(app_state): State<AppState>,
    AuthenticatedUser { user_id, .. }: AuthenticatedUser,
) -> Result<Json<PendingDepositsResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let deposits = app_state
        .store_state
        .deposit_service
        .my_pending_deposits(user_id)
        .await
        .map_err(|e: StoreError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(PendingDepositsResponse { deposits }))
}

/// 입금 대기열 조회 핸들러 (관리자 전용)
/// Deposit review queue handler (admin only)
///
/// 심사 대기 중인 입금 요청을 오래된 순서로 반환합니다 (공정한 선입선출).
///
/// # Authentication
/// JWT 토큰 필요 (ADMIN 권한)
///
/// # Response
/// - 200: 대기열 조회 성공
/// - 403: 관리자 권한 없음
#[utoipa::path(
    get,
    path = "/api/admin/deposits",
    responses(
        (status = 200, description = "Deposit queue retrieved successfully", body = DepositQueueResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn deposit_queue(
    State(app_state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<DepositQueueResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let deposits = app_state
        .store_state
        .deposit_service
        .pending_queue()
        .await
        .map_err(|e: StoreError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(DepositQueueResponse { deposits }))
}

/// 입금 승인 핸들러 (관리자 전용)
/// Approve deposit handler (admin only)
///
/// PENDING 입금을 승인하고 승인 시점의 잔고에 금액을 반영합니다.
///
/// # Authentication
/// JWT 토큰 필요 (ADMIN 권한)
///
/// # Path Parameters
/// - transaction_id: 승인할 입금 거래 ID
///
/// # Response
/// - 200: 승인 성공 (반영 후 잔고 포함)
/// - 400: 이미 심사된 거래이거나 입금 거래가 아님
/// - 403: 관리자 권한 없음
/// - 404: 거래를 찾을 수 없음
#[utoipa::path(
    post,
    path = "/api/admin/deposits/{transaction_id}/approve",
    params(
        ("transaction_id" = u64, Path, description = "Deposit transaction ID to approve")
    ),
    responses(
        (status = 200, description = "Deposit approved successfully", body = ReviewDepositResponse),
        (status = 400, description = "Transaction already reviewed or not a deposit"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Transaction not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn approve_deposit(
    State(app_state): State<AppState>,
    AdminUser { user_id: admin_id, .. }: AdminUser,
    Path(transaction_id): Path<u64>,
) -> Result<Json<ReviewDepositResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let (transaction, new_balance) = app_state
        .store_state
        .deposit_service
        .approve_deposit(admin_id, transaction_id)
        .await
        .map_err(|e: StoreError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(ReviewDepositResponse {
        transaction,
        new_balance: Some(new_balance),
        message: "Deposit approved".to_string(),
    }))
}

/// 입금 거절 핸들러 (관리자 전용)
/// Reject deposit handler (admin only)
///
/// PENDING 입금을 거절합니다. 잔고는 변하지 않고 사유가 기록됩니다.
///
/// # Authentication
/// JWT 토큰 필요 (ADMIN 권한)
///
/// # Path Parameters
/// - transaction_id: 거절할 입금 거래 ID
///
/// # Request Body
/// - reason: 거절 사유 (optional, 없으면 기본 문구)
///
/// # Response
/// - 200: 거절 성공
/// - 400: 이미 심사된 거래이거나 입금 거래가 아님
/// - 403: 관리자 권한 없음
/// - 404: 거래를 찾을 수 없음
#[utoipa::path(
    post,
    path = "/api/admin/deposits/{transaction_id}/reject",
    params(
        ("transaction_id" = u64, Path, description = "Deposit transaction ID to reject")
    ),
    request_body = RejectDepositRequest,
    responses(
        (status = 200, description = "Deposit rejected successfully", body = ReviewDepositResponse),
        (status = 400, description = "Transaction already reviewed or not a deposit"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Transaction not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn reject_deposit(
    State(app_state): State<AppState>,
    AdminUser { user_id: admin_id, .. }: AdminUser,
    Path(transaction_id): Path<u64>,
    Json(request): Json<RejectDepositRequest>,
) -> Result<Json<ReviewDepositResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let transaction = app_state
        .store_state
        .deposit_service
        .reject_deposit(admin_id, transaction_id, request.reason)
        .await
        .map_err(|e: StoreError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(ReviewDepositResponse {
        transaction,
        new_balance: None,
        message: "Deposit rejected".to_string(),
    }))
}
