use crate::shared::database::{Database, TransactionRepository, UserRepository};
use crate::domains::store::models::transaction::{
    BalanceTransaction, BalanceTransactionCreate, TransactionStats, TransactionStatus,
    TransactionType,
};
use crate::shared::errors::StoreError;

/// 내역 조회 기본 limit
/// Default history page size
const DEFAULT_HISTORY_LIMIT: i64 = 20;

/// 내역 조회 최대 limit
/// Maximum history page size
const MAX_HISTORY_LIMIT: i64 = 100;

/// 원장 조회/관리 서비스
/// Ledger query/administration service
///
/// 역할:
/// - 승인된 거래 내역 + 집계 조회
/// - 관리자 잔고 조정 (ADMIN_ADJUST 원장 엔트리로만 기록)
///
/// 잔고를 직접 덮어쓰는 경로는 없음: 모든 조정이 원장을 거치므로
/// "live 잔고 = 초기 잔고 + 승인된 거래 합" 불변식이 유지됨.
#[derive(Clone)]
pub struct LedgerService {
    db: Database,
}

impl LedgerService {
    /// 생성자
    /// Constructor
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 승인된 거래 내역 + 집계
    /// Approved transaction history + stats
    ///
    /// # Arguments
    /// * `user_id` - 대상 사용자 ID
    /// * `limit` - 페이지 크기 (기본 20, 최대 100)
    pub async fn history(
        &self,
        user_id: u64,
        limit: Option<i64>,
    ) -> Result<(Vec<BalanceTransaction>, TransactionStats), StoreError> {
        let transaction_repo = TransactionRepository::new(self.db.pool().clone());

        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);

        let transactions = transaction_repo
            .list_approved_by_user(user_id, limit)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to list transactions: {}", e)))?;

        let stats = transaction_repo
            .stats_for_user(user_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to compute stats: {}", e)))?;

        Ok((transactions, stats))
    }

    /// 관리자 잔고 조정
    /// Admin balance adjustment
    ///
    /// # Arguments
    /// * `target_user_id` - 조정 대상 사용자 ID
    /// * `amount` - 부호 있는 조정액 (0은 거절)
    /// * `description` - 조정 사유
    ///
    /// # Returns
    /// * `Ok((BalanceTransaction, i64))` - 기록된 ADMIN_ADJUST 거래와 조정 후 잔고
    /// * `Err(StoreError)` - 금액 0 / 사용자 없음 / 차감이 잔고를 초과 / DB 오류
    ///
    /// 음수 조정은 구매와 같은 조건부 차감을 타므로 잔고를 음수로 만들 수 없음.
    pub async fn adjust_balance(
        &self,
        target_user_id: u64,
        amount: i64,
        description: Option<String>,
    ) -> Result<(BalanceTransaction, i64), StoreError> {
        // 1. 금액 검증 (0은 의미 없는 조정)
        if amount == 0 {
            return Err(StoreError::InvalidAmount { amount });
        }

        let user_repo = UserRepository::new(self.db.pool().clone());
        let transaction_repo = TransactionRepository::new(self.db.pool().clone());

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        // 2. 대상 사용자 조회 (스냅샷용 현재 잔고)
        let user = user_repo
            .get_user_by_id_in_tx(&mut tx, target_user_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .ok_or(StoreError::UserNotFound { id: target_user_id })?;

        // 3. 잔고 반영 (음수는 조건부 차감, 양수는 단순 증가)
        if amount < 0 {
            let debited = user_repo
                .try_debit_balance_in_tx(&mut tx, target_user_id, -amount)
                .await
                .map_err(|e| StoreError::DatabaseError(format!("Failed to debit balance: {}", e)))?;

            if !debited {
                return Err(StoreError::InsufficientBalance {
                    required: -amount,
                    available: user.balance,
                });
            }
        } else {
            user_repo
                .credit_balance_in_tx(&mut tx, target_user_id, amount)
                .await
                .map_err(|e| StoreError::DatabaseError(format!("Failed to credit balance: {}", e)))?;
        }

        let new_balance = user.balance + amount;

        // 4. 자동 승인 ADMIN_ADJUST 엔트리
        let transaction = transaction_repo
            .create_in_tx(
                &mut tx,
                &BalanceTransactionCreate {
                    user_id: target_user_id,
                    amount,
                    balance_before: user.balance,
                    balance_after: new_balance,
                    transaction_type: TransactionType::AdminAdjust,
                    status: TransactionStatus::Approved,
                    description: description
                        .or_else(|| Some("Admin balance adjustment".to_string())),
                    related_game_id: None,
                },
            )
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to record adjustment: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to commit adjustment: {}", e)))?;

        tracing::info!(target_user_id, amount, new_balance, "balance adjusted");

        Ok((transaction, new_balance))
    }
}
