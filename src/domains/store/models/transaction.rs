use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};

// =====================================================
// BalanceTransaction 모델 (잔고 원장)
// =====================================================
// 역할: 잔고를 움직이는 모든 이벤트를 기록하는 원장 엔트리
// 설명: 입금 요청, 구매 차감, 환불, 관리자 조정이 전부 이 테이블에 남음
//
// 상태 규칙:
// - PURCHASE / REFUND / ADMIN_ADJUST: 생성 시점에 APPROVED (자동 정산)
// - DEPOSIT: PENDING으로 생성되고, 관리자 심사로 정확히 한 번
//   APPROVED 또는 REJECTED로 전이됨
//
// 스냅샷 규칙:
// - 생성 시점에 항상 balance_after = balance_before + amount
// - PENDING 입금의 balance_after는 아직 적용되지 않은 "예상값(projection)"
//   (실제 잔고는 승인 시점의 live 잔고 기준으로 다시 계산되어 반영됨)
// =====================================================

/// 거래 종류
/// Transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// 입금 (고객 요청, 관리자 승인 필요)
    /// Deposit (customer-requested, requires admin review)
    Deposit,
    /// 구매 차감 (자동 승인)
    /// Purchase debit (auto-approved)
    Purchase,
    /// 환불 크레딧 (자동 승인)
    /// Refund credit (auto-approved)
    Refund,
    /// 관리자 잔고 조정 (자동 승인)
    /// Admin balance adjustment (auto-approved)
    AdminAdjust,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Purchase => "PURCHASE",
            TransactionType::Refund => "REFUND",
            TransactionType::AdminAdjust => "ADMIN_ADJUST",
        }
    }

    /// DB에 저장된 문자열을 enum으로 복원
    /// Parse the stored string back into the enum
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DEPOSIT" => Some(TransactionType::Deposit),
            "PURCHASE" => Some(TransactionType::Purchase),
            "REFUND" => Some(TransactionType::Refund),
            "ADMIN_ADJUST" => Some(TransactionType::AdminAdjust),
            _ => None,
        }
    }
}

/// 거래 상태
/// Transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// 심사 대기 중 (DEPOSIT 전용)
    /// Awaiting review (DEPOSIT only)
    Pending,
    /// 승인됨 (종결 상태)
    /// Approved (terminal)
    Approved,
    /// 거절됨 (종결 상태)
    /// Rejected (terminal)
    Rejected,
}

/// 허용되지 않는 상태 전이
/// Illegal status transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: TransactionStatus,
    pub to: TransactionStatus,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Approved => "APPROVED",
            TransactionStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(TransactionStatus::Pending),
            "APPROVED" => Some(TransactionStatus::Approved),
            "REJECTED" => Some(TransactionStatus::Rejected),
            _ => None,
        }
    }

    /// 종결 상태 여부 (APPROVED / REJECTED는 더 이상 전이 불가)
    /// Terminal statuses admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Approved | TransactionStatus::Rejected)
    }

    /// 단일 전이 함수: 전이 테이블의 유일한 관문
    /// The single transition function - the only authority on the table
    ///
    /// 허용되는 전이는 PENDING -> APPROVED, PENDING -> REJECTED 두 가지뿐.
    /// 그 외의 모든 전이는 InvalidTransition으로 거절됨.
    pub fn transition(self, next: TransactionStatus) -> Result<TransactionStatus, InvalidTransition> {
        match (self, next) {
            (TransactionStatus::Pending, TransactionStatus::Approved)
            | (TransactionStatus::Pending, TransactionStatus::Rejected) => Ok(next),
            (from, to) => Err(InvalidTransition { from, to }),
        }
    }
}

/// 잔고 원장 엔트리 (데이터베이스에서 조회한 거래)
/// Balance ledger entry (transaction retrieved from the database)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = BalanceTransaction)]
pub struct BalanceTransaction {
    /// Transaction ID (DB에서 자동 생성)
    pub id: u64,

    /// 이 거래의 대상 사용자 ID
    /// Owner of this ledger entry
    pub user_id: u64,

    /// 부호 있는 금액 (크레딧 양수, 차감 음수)
    /// Signed amount (+ credit, - debit)
    #[schema(example = 200000)]
    pub amount: i64,

    /// 생성 시점 잔고 스냅샷
    /// Balance snapshot at creation time
    pub balance_before: i64,

    /// 생성 시점의 balance_before + amount
    /// PENDING 입금에서는 아직 적용되지 않은 예상값
    pub balance_after: i64,

    /// 거래 종류
    pub transaction_type: TransactionType,

    /// 거래 상태
    pub status: TransactionStatus,

    /// 설명 (거절 시 사유가 덧붙음)
    /// Description (annotated with the reason on rejection)
    pub description: Option<String>,

    /// 구매/환불 거래가 가리키는 게임 ID
    /// Game the purchase/refund relates to
    pub related_game_id: Option<u64>,

    /// 심사한 관리자 ID
    /// Reviewing admin
    pub reviewed_by: Option<u64>,

    /// 심사 시각
    /// Review timestamp
    pub reviewed_at: Option<DateTime<Utc>>,

    /// 거절 사유
    /// Rejection reason
    pub reject_reason: Option<String>,

    /// 생성 시각
    pub created_at: DateTime<Utc>,
}

impl BalanceTransaction {
    /// 관리자 심사 대상 여부 (PENDING 상태의 DEPOSIT만 심사 가능)
    /// Only PENDING deposits are reviewable
    pub fn reviewable(&self) -> bool {
        self.status == TransactionStatus::Pending
            && self.transaction_type == TransactionType::Deposit
    }
}

// =====================================================
// 거래 생성용 (Repository에서 사용)
// =====================================================
/// 원장 엔트리 생성 시 사용하는 내부 모델 (DB 저장용)
/// Internal model for inserting ledger entries
#[derive(Debug)]
pub struct BalanceTransactionCreate {
    pub user_id: u64,
    pub amount: i64,
    pub balance_before: i64,
    pub balance_after: i64,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub description: Option<String>,
    pub related_game_id: Option<u64>,
}

// =====================================================
// API 요청/응답 모델
// =====================================================

/// 입금 요청 생성 요청 모델
/// Deposit request creation model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = DepositRequest)]
pub struct DepositRequest {
    /// 입금 금액 (양수)
    /// Deposit amount (must be positive)
    #[schema(example = 200000)]
    pub amount: i64,

    /// 설명 (선택)
    /// Optional description
    #[schema(example = "계좌이체 입금")]
    pub description: Option<String>,
}

/// 입금 요청 응답 모델
/// Deposit request response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = DepositRequestResponse)]
pub struct DepositRequestResponse {
    /// 생성된 PENDING 거래 (추적용 id 포함)
    /// The created PENDING transaction (carries the tracking id)
    pub transaction: BalanceTransaction,

    /// 성공 메시지
    pub message: String,
}

/// 입금 거절 요청 모델
/// Deposit rejection request model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = RejectDepositRequest)]
pub struct RejectDepositRequest {
    /// 거절 사유 (없으면 기본 문구 저장)
    /// Rejection reason (a default is stored when absent)
    #[schema(example = "입금 내역을 확인할 수 없습니다")]
    pub reason: Option<String>,
}

/// 입금 심사 응답 모델 (승인/거절 공용)
/// Deposit review response model (approve/reject)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = ReviewDepositResponse)]
pub struct ReviewDepositResponse {
    /// 심사 후의 거래
    /// The transaction after review
    pub transaction: BalanceTransaction,

    /// 승인 시 반영된 잔고 (거절 시 None)
    /// Balance after approval (None on rejection)
    pub new_balance: Option<i64>,

    /// 성공 메시지
    pub message: String,
}

/// 사용자 원장 집계 (APPROVED 거래만 합산)
/// Per-user ledger stats (summed over APPROVED rows only)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = TransactionStats)]
pub struct TransactionStats {
    /// 승인된 입금 총액
    /// Total approved deposits
    pub total_deposited: i64,

    /// 구매로 차감된 총액 (양수로 표현)
    /// Total spent on purchases (expressed as a positive number)
    pub total_spent: i64,

    /// 승인된 거래 수
    /// Number of approved transactions
    pub transaction_count: i64,
}

/// 거래 내역 + 집계 응답 모델
/// Transaction history + stats response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = TransactionHistoryResponse)]
pub struct TransactionHistoryResponse {
    /// 승인된 거래 목록 (최신순)
    /// Approved transactions, newest first
    pub transactions: Vec<BalanceTransaction>,

    /// 집계
    pub stats: TransactionStats,
}

/// 내 PENDING 입금 목록 응답 모델
/// Own pending deposits response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = PendingDepositsResponse)]
pub struct PendingDepositsResponse {
    pub deposits: Vec<BalanceTransaction>,
}

/// 관리자용 입금 대기열 항목 (요청자 이메일 조인)
/// Admin queue item (requester email joined)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = PendingDepositQueueItem)]
pub struct PendingDepositQueueItem {
    #[serde(flatten)]
    pub transaction: BalanceTransaction,

    /// 요청한 사용자의 이메일
    /// Email of the requesting user
    pub user_email: String,
}

/// 관리자용 입금 대기열 응답 모델 (오래된 요청 우선)
/// Admin deposit queue response model (oldest first)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = DepositQueueResponse)]
pub struct DepositQueueResponse {
    pub deposits: Vec<PendingDepositQueueItem>,
}

/// 관리자 잔고 조정 요청 모델
/// Admin balance adjustment request model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = BalanceAdjustmentRequest)]
pub struct BalanceAdjustmentRequest {
    /// 조정 금액 (0이 아닌 부호 있는 값)
    /// Signed, non-zero adjustment amount
    #[schema(example = -5000)]
    pub amount: i64,

    /// 조정 사유
    /// Reason for the adjustment
    #[schema(example = "이벤트 보상 지급")]
    pub description: Option<String>,
}

/// 관리자 잔고 조정 응답 모델
/// Admin balance adjustment response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = BalanceAdjustmentResponse)]
pub struct BalanceAdjustmentResponse {
    /// 기록된 ADMIN_ADJUST 거래
    /// The recorded ADMIN_ADJUST transaction
    pub transaction: BalanceTransaction,

    /// 조정 후 잔고
    pub new_balance: i64,

    /// 성공 메시지
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 전이 테이블: PENDING에서 두 종결 상태로만 전이 가능
    #[test]
    fn pending_transitions_to_both_terminals() {
        assert_eq!(
            TransactionStatus::Pending.transition(TransactionStatus::Approved),
            Ok(TransactionStatus::Approved)
        );
        assert_eq!(
            TransactionStatus::Pending.transition(TransactionStatus::Rejected),
            Ok(TransactionStatus::Rejected)
        );
    }

    /// 종결 상태에서는 어떤 전이도 불가능
    #[test]
    fn terminal_statuses_admit_no_transition() {
        for from in [TransactionStatus::Approved, TransactionStatus::Rejected] {
            for to in [
                TransactionStatus::Pending,
                TransactionStatus::Approved,
                TransactionStatus::Rejected,
            ] {
                assert_eq!(from.transition(to), Err(InvalidTransition { from, to }));
            }
        }
    }

    /// PENDING -> PENDING 자기 전이도 불가능
    #[test]
    fn pending_cannot_stay_pending_via_transition() {
        assert!(
            TransactionStatus::Pending
                .transition(TransactionStatus::Pending)
                .is_err()
        );
    }

    /// 라운드트립: as_str / parse 대칭
    #[test]
    fn status_and_type_string_roundtrip() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Approved,
            TransactionStatus::Rejected,
        ] {
            assert_eq!(TransactionStatus::parse(status.as_str()), Some(status));
        }
        for ty in [
            TransactionType::Deposit,
            TransactionType::Purchase,
            TransactionType::Refund,
            TransactionType::AdminAdjust,
        ] {
            assert_eq!(TransactionType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(TransactionStatus::parse("CANCELLED"), None);
        assert_eq!(TransactionType::parse("WITHDRAWAL"), None);
    }

    /// 심사 가능 조건: PENDING 상태의 DEPOSIT만
    #[test]
    fn only_pending_deposits_are_reviewable() {
        let mut tx = BalanceTransaction {
            id: 1,
            user_id: 1,
            amount: 1000,
            balance_before: 0,
            balance_after: 1000,
            transaction_type: TransactionType::Deposit,
            status: TransactionStatus::Pending,
            description: None,
            related_game_id: None,
            reviewed_by: None,
            reviewed_at: None,
            reject_reason: None,
            created_at: chrono::Utc::now(),
        };
        assert!(tx.reviewable());

        tx.status = TransactionStatus::Approved;
        assert!(!tx.reviewable());

        tx.status = TransactionStatus::Pending;
        tx.transaction_type = TransactionType::Purchase;
        assert!(!tx.reviewable());
    }
}
