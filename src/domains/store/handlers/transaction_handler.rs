use crate::domains::store::models::transaction::{
    BalanceAdjustmentRequest, BalanceAdjustmentResponse, TransactionHistoryResponse,
};
use crate::shared::errors::StoreError;
use crate::shared::middleware::auth::{AdminUser, AuthenticatedUser};
use crate::shared::services::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

// =====================================================
// Transaction Handler
// =====================================================
// 역할: 원장 조회/잔고 조정 HTTP API 엔드포인트
// =====================================================

/// 쿼리 파라미터 (거래 내역)
/// Query parameters for transaction history
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct HistoryQuery {
    /// 최대 조회 개수 (기본: 20, 최대: 100)
    /// Limit (default: 20, max: 100)
    #[serde(default)]
    pub limit: Option<i64>,
}

/// 거래 내역 조회 핸들러
/// Transaction history handler
///
/// 승인된 거래 내역(최신순)과 입금/지출 집계를 반환합니다.
/// PENDING/REJECTED 거래는 포함되지 않습니다.
///
/// # Authentication
/// JWT 토큰 필요 (Bearer token)
///
/// # Query Parameters
/// - limit: 최대 조회 개수 (optional, default: 20, max: 100)
///
/// # Response
/// - 200: 거래 내역 조회 성공
/// - 401: 인증 실패
#[utoipa::path(
    get,
    path = "/api/customer/balance/transactions",
    params(
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Transaction history retrieved successfully", body = TransactionHistoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Store",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn transaction_history(
    State(app_state): State<AppState>,
    AuthenticatedUser { user_id, .. }: AuthenticatedUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<TransactionHistoryResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let (transactions, stats) = app_state
        .store_state
        .ledger_service
        .history(user_id, query.limit)
        .await
        .map_err(|e: StoreError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(TransactionHistoryResponse { transactions, stats }))
}

/// 잔고 조정 핸들러 (관리자 전용)
/// Balance adjustment handler (admin only)
///
/// 사용자 잔고를 직접 증감하고 ADMIN_ADJUST 거래를 남깁니다.
/// 음수 조정은 현재 잔고를 넘을 수 없습니다.
///
/// # Authentication
/// JWT 토큰 필요 (ADMIN 권한)
///
/// # Path Parameters
/// - user_id: 조정 대상 사용자 ID
///
/// # Request Body
/// - amount: 조정 금액 (0이 아닌 부호 있는 값)
/// - description: 조정 사유 (optional)
///
/// # Response
/// - 200: 조정 성공
/// - 400: 금액이 0이거나 잔고 부족
/// - 403: 관리자 권한 없음
/// - 404: 사용자를 찾을 수 없음
#[utoipa::path(
    post,
    path = "/api/admin/users/{user_id}/balance",
    params(
        ("user_id" = u64, Path, description = "User whose balance to adjust")
    ),
    request_body = BalanceAdjustmentRequest,
    responses(
        (status = 200, description = "Balance adjusted successfully", body = BalanceAdjustmentResponse),
        (status = 400, description = "Zero amount or insufficient balance"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn adjust_balance(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<u64>,
    Json(request): Json<BalanceAdjustmentRequest>,
) -> Result<Json<BalanceAdjustmentResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let (transaction, new_balance) = app_state
        .store_state
        .ledger_service
        .adjust_balance(user_id, request.amount, request.description)
        .await
        .map_err(|e: StoreError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(BalanceAdjustmentResponse {
        transaction,
        new_balance,
        message: "Balance adjusted successfully".to_string(),
    }))
}
