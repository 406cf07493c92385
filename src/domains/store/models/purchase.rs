use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};

// =====================================================
// Purchase 모델 (구매/소유권)
// =====================================================
// 역할: 사용자의 게임 소유권 기록
// 설명: 정산이 성공한 순간 생성되며, (user_id, game_id) 쌍은 유일함.
//       price_paid는 구매 시점 가격의 스냅샷 (이후 게임 가격이 바뀌어도 유지)
// =====================================================

/// 구매 기록 (데이터베이스에서 조회한 소유권)
/// Purchase record (ownership row retrieved from the database)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = Purchase)]
pub struct Purchase {
    /// Purchase ID (DB에서 자동 생성)
    pub id: u64,

    /// 구매자 ID
    pub user_id: u64,

    /// 구매한 게임 ID
    pub game_id: u64,

    /// 구매 시점 가격 스냅샷
    /// Price snapshot captured at settlement time
    #[schema(example = 64000)]
    pub price_paid: i64,

    /// 구매 시각
    pub created_at: DateTime<Utc>,
}

/// 구매 요청 모델
/// Purchase request model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = PurchaseRequest)]
pub struct PurchaseRequest {
    /// 구매할 게임 ID
    /// Game to purchase
    #[schema(example = 1)]
    pub game_id: u64,
}

/// 구매 응답 모델
/// Purchase response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = PurchaseResponse)]
pub struct PurchaseResponse {
    /// 생성된 구매 기록
    /// The created purchase record
    pub purchase: Purchase,

    /// 차감 후 잔고
    /// Balance after the debit
    pub new_balance: i64,

    /// 성공 메시지
    pub message: String,
}

/// 라이브러리 항목 (구매 기록 + 게임 정보 조인)
/// Library item (purchase joined with game details)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = LibraryItem)]
pub struct LibraryItem {
    /// 구매 기록 ID
    pub purchase_id: u64,

    /// 게임 ID
    pub game_id: u64,

    /// 게임 제목
    pub title: String,

    /// 개발사
    pub developer: Option<String>,

    /// 장르
    pub genre: Option<String>,

    /// 구매 시점 가격
    pub price_paid: i64,

    /// 구매 시각
    pub purchased_at: DateTime<Utc>,
}

/// 라이브러리 응답 모델
/// Library response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = LibraryResponse)]
pub struct LibraryResponse {
    pub games: Vec<LibraryItem>,
}

/// 환불 응답 모델 (관리자 전용)
/// Refund response model (admin only)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = RefundResponse)]
pub struct RefundResponse {
    /// 기록된 REFUND 거래
    /// The recorded REFUND transaction
    pub transaction: super::transaction::BalanceTransaction,

    /// 환불 후 잔고
    pub new_balance: i64,

    /// 성공 메시지
    pub message: String,
}
