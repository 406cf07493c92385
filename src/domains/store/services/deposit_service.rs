use crate::shared::database::{Database, TransactionRepository, UserRepository};
use crate::domains::store::models::transaction::{
    BalanceTransaction, BalanceTransactionCreate, PendingDepositQueueItem, TransactionStatus,
    TransactionType,
};
use crate::shared::errors::StoreError;

/// 거절 사유가 없을 때 저장되는 기본 문구
/// Default text stored when no rejection reason is supplied
const DEFAULT_REJECT_REASON: &str = "No reason provided";

/// 관리자 대기열 조회 상한
/// Admin queue fetch cap
const PENDING_QUEUE_LIMIT: i64 = 100;

/// 입금 워크플로 서비스
/// Deposit workflow service
///
/// 역할:
/// - 입금 요청 생성 (PENDING 원장 엔트리, 잔고 변경 없음)
/// - 관리자 심사: 승인(잔고 반영) / 거절(사유 기록)
/// - 대기 중인 입금 목록 (본인용 / 관리자 대기열)
///
/// 상태 전이는 TransactionStatus::transition 한 곳에서만 판정됨.
/// 종결된 거래를 다시 심사하려는 시도는 INVALID_TRANSACTION_STATUS로 거절.
#[derive(Clone)]
pub struct DepositService {
    db: Database,
}

impl DepositService {
    /// 생성자
    /// Constructor
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 입금 요청 생성
    /// Create a deposit request
    ///
    /// # Arguments
    /// * `user_id` - 요청자 ID
    /// * `amount` - 입금 금액 (양수만 허용)
    /// * `description` - 설명 (선택)
    ///
    /// # Returns
    /// * `Ok(BalanceTransaction)` - 생성된 PENDING 거래 (추적 id 포함)
    /// * `Err(StoreError)` - 금액이 0 이하 / 사용자 없음 / DB 오류
    ///
    /// 잔고는 변경되지 않음. balance_after는 승인됐을 때를 가정한 예상값.
    pub async fn request_deposit(
        &self,
        user_id: u64,
        amount: i64,
        description: Option<String>,
    ) -> Result<BalanceTransaction, StoreError> {
        // 1. 금액 검증 (0 이하 거절)
        if amount <= 0 {
            return Err(StoreError::InvalidAmount { amount });
        }

        let user_repo = UserRepository::new(self.db.pool().clone());
        let transaction_repo = TransactionRepository::new(self.db.pool().clone());

        // 2. 현재 잔고 스냅샷과 PENDING 엔트리 생성을 한 트랜잭션으로
        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        let user = user_repo
            .get_user_by_id_in_tx(&mut tx, user_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .ok_or(StoreError::UserNotFound { id: user_id })?;

        let transaction = transaction_repo
            .create_in_tx(
                &mut tx,
                &BalanceTransactionCreate {
                    user_id,
                    amount,
                    balance_before: user.balance,
                    balance_after: user.balance + amount,
                    transaction_type: TransactionType::Deposit,
                    status: TransactionStatus::Pending,
                    description,
                    related_game_id: None,
                },
            )
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to create deposit request: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to commit deposit request: {}", e)))?;

        tracing::info!(user_id, amount, transaction_id = transaction.id, "deposit requested");

        Ok(transaction)
    }

    /// 입금 승인 (관리자 전용)
    /// Approve a deposit (admin only)
    ///
    /// # Arguments
    /// * `admin_id` - 심사하는 관리자 ID
    /// * `transaction_id` - 심사 대상 거래 ID
    ///
    /// # Returns
    /// * `Ok((BalanceTransaction, i64))` - 승인된 거래와 반영 후 잔고
    /// * `Err(StoreError)` - 거래 없음 / 심사 불가 상태 / DB 오류
    ///
    /// # 처리 과정
    /// 1. 거래 조회 + 심사 가능 여부 확인 (PENDING DEPOSIT만)
    /// 2. 전이 테이블 통과 (PENDING -> APPROVED)
    /// 3. 승인 시점의 live 잔고에 금액 반영
    ///    (요청 시점 스냅샷이 아니라 현재 잔고 기준 - 그 사이 잔고가 바뀌었을 수 있음)
    /// 4. 거래에 reviewer/시각 기록
    pub async fn approve_deposit(
        &self,
        admin_id: u64,
        transaction_id: u64,
    ) -> Result<(BalanceTransaction, i64), StoreError> {
        let user_repo = UserRepository::new(self.db.pool().clone());
        let transaction_repo = TransactionRepository::new(self.db.pool().clone());

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 1. 거래 조회 + 전이 검증
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let transaction = self
            .load_reviewable(&transaction_repo, &mut tx, transaction_id, TransactionStatus::Approved)
            .await?;

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 2. live 잔고에 금액 반영
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        let user = user_repo
            .get_user_by_id_in_tx(&mut tx, transaction.user_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .ok_or(StoreError::UserNotFound { id: transaction.user_id })?;

        user_repo
            .credit_balance_in_tx(&mut tx, transaction.user_id, transaction.amount)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to credit balance: {}", e)))?;

        let new_balance = user.balance + transaction.amount;

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 3. 전이 기록 + 커밋
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        transaction_repo
            .mark_approved_in_tx(&mut tx, transaction_id, admin_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to mark approved: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to commit approval: {}", e)))?;

        tracing::info!(admin_id, transaction_id, new_balance, "deposit approved");

        // 커밋된 최종 상태를 다시 읽어서 반환
        let approved = self.get_transaction(transaction_id).await?;
        Ok((approved, new_balance))
    }

    /// 입금 거절 (관리자 전용) - 잔고 변경 없음
    /// Reject a deposit (admin only) - no balance mutation
    ///
    /// 사유가 없으면 기본 문구를 저장하고, 감사 추적을 위해
    /// 거래 설명에도 사유를 덧붙임.
    pub async fn reject_deposit(
        &self,
        admin_id: u64,
        transaction_id: u64,
        reason: Option<String>,
    ) -> Result<BalanceTransaction, StoreError> {
        let transaction_repo = TransactionRepository::new(self.db.pool().clone());

        let mut tx = self
            .db
            .pool()
            .begin()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to begin transaction: {}", e)))?;

        // 1. 거래 조회 + 전이 검증
        let transaction = self
            .load_reviewable(&transaction_repo, &mut tx, transaction_id, TransactionStatus::Rejected)
            .await?;

        // 2. 사유 확정 + 설명 주석 달기
        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REJECT_REASON.to_string());

        let base = transaction
            .description
            .clone()
            .unwrap_or_else(|| "Deposit request".to_string());
        let annotated = format!("{} (rejected: {})", base, reason);

        // 3. 전이 기록 + 커밋 (잔고는 건드리지 않음)
        transaction_repo
            .mark_rejected_in_tx(&mut tx, transaction_id, admin_id, &reason, &annotated)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to mark rejected: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to commit rejection: {}", e)))?;

        tracing::info!(admin_id, transaction_id, "deposit rejected");

        self.get_transaction(transaction_id).await
    }

    /// 심사 대상 거래 로드 (전이 가능성 검증 포함)
    /// Load a transaction for review, validating the transition
    ///
    /// 모든 심사 경로가 이 헬퍼를 거치므로 상태 검사가 흩어지지 않음.
    async fn load_reviewable(
        &self,
        transaction_repo: &TransactionRepository,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        transaction_id: u64,
        next: TransactionStatus,
    ) -> Result<BalanceTransaction, StoreError> {
        let transaction = transaction_repo
            .get_by_id_in_tx(tx, transaction_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to fetch transaction: {}", e)))?
            .ok_or(StoreError::TransactionNotFound { id: transaction_id })?;

        // DEPOSIT이 아닌 거래는 상태와 무관하게 심사 대상이 아님
        if transaction.transaction_type != TransactionType::Deposit {
            return Err(StoreError::InvalidTransactionStatus {
                id: transaction_id,
                status: transaction.status.as_str().to_string(),
            });
        }

        // 전이 테이블 통과 (PENDING -> next만 허용)
        transaction
            .status
            .transition(next)
            .map_err(|_| StoreError::InvalidTransactionStatus {
                id: transaction_id,
                status: transaction.status.as_str().to_string(),
            })?;

        Ok(transaction)
    }

    /// 거래 단건 조회
    /// Fetch a single transaction
    pub async fn get_transaction(&self, id: u64) -> Result<BalanceTransaction, StoreError> {
        let transaction_repo = TransactionRepository::new(self.db.pool().clone());

        transaction_repo
            .get_by_id(id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to fetch transaction: {}", e)))?
            .ok_or(StoreError::TransactionNotFound { id })
    }

    /// 내 PENDING 입금 목록
    /// Own pending deposits
    pub async fn my_pending_deposits(
        &self,
        user_id: u64,
    ) -> Result<Vec<BalanceTransaction>, StoreError> {
        let transaction_repo = TransactionRepository::new(self.db.pool().clone());

        transaction_repo
            .list_pending_by_user(user_id)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to list pending deposits: {}", e)))
    }

    /// 전체 PENDING 입금 대기열 (관리자용, 오래된 요청 우선)
    /// Global pending queue (admin view, oldest first)
    pub async fn pending_queue(&self) -> Result<Vec<PendingDepositQueueItem>, StoreError> {
        let transaction_repo = TransactionRepository::new(self.db.pool().clone());

        transaction_repo
            .list_pending_queue(PENDING_QUEUE_LIMIT)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to list deposit queue: {}", e)))
    }
}
