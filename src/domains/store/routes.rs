// Store domain routes
// 스토어 도메인 라우터 (구매/입금/원장)
use axum::{routing::{get, post}, Router};
use crate::domains::store::handlers::{deposit_handler, purchase_handler, transaction_handler};
use crate::shared::services::AppState;

/// 스토어 고객 라우터 생성
/// Create store customer router
///
/// # Routes
/// - `POST /api/customer/purchases` - 게임 구매 (정산)
/// - `GET  /api/customer/library` - 내 라이브러리
/// - `GET  /api/customer/balance/transactions` - 거래 내역 + 집계
/// - `POST /api/customer/balance/deposits` - 입금 요청
/// - `GET  /api/customer/balance/deposits/pending` - 내 대기 중 입금
pub fn create_store_router() -> Router<AppState> {
    Router::new()
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Purchases (구매)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        .route("/purchases", post(purchase_handler::purchase_game))
        .route("/library", get(purchase_handler::get_library))

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Balance (잔고/원장)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        .route("/balance/transactions", get(transaction_handler::transaction_history))
        .route("/balance/deposits", post(deposit_handler::request_deposit))
        .route("/balance/deposits/pending", get(deposit_handler::my_pending_deposits))
}

/// 스토어 관리자 라우터 생성
/// Create store admin router
///
/// # Routes
/// - `GET  /api/admin/deposits` - 입금 심사 대기열 (오래된 순)
/// - `POST /api/admin/deposits/:transaction_id/approve` - 입금 승인
/// - `POST /api/admin/deposits/:transaction_id/reject` - 입금 거절
/// - `POST /api/admin/users/:user_id/balance` - 잔고 조정
/// - `POST /api/admin/purchases/:purchase_id/refund` - 구매 환불
pub fn create_store_admin_router() -> Router<AppState> {
    Router::new()
        .route("/deposits", get(deposit_handler::deposit_queue))
        .route("/deposits/:transaction_id/approve", post(deposit_handler::approve_deposit))
        .route("/deposits/:transaction_id/reject", post(deposit_handler::reject_deposit))
        .route("/users/:user_id/balance", post(transaction_handler::adjust_balance))
        .route("/purchases/:purchase_id/refund", post(purchase_handler::refund_purchase))
}
