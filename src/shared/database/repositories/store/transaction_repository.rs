use sqlx::{Row, SqlitePool, Sqlite, Transaction};
use sqlx::sqlite::SqliteRow;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use crate::domains::store::models::transaction::{
    BalanceTransaction, BalanceTransactionCreate, PendingDepositQueueItem, TransactionStats,
    TransactionStatus, TransactionType,
};

/// 잔고 원장 Repository
/// Balance ledger repository
///
/// 원장 행은 생성 이후 심사 전이(approve/reject)로만 변경됨.
/// Ledger rows are only ever mutated by the review transition.
pub struct TransactionRepository {
    pool: SqlitePool,
}

// Row -> BalanceTransaction 변환 (컬럼 매핑 한 곳에 모음)
// Map a row to BalanceTransaction (column mapping kept in one place)
fn row_to_transaction(row: &SqliteRow) -> Result<BalanceTransaction> {
    let type_str: String = row.get("transaction_type");
    let transaction_type = TransactionType::parse(&type_str)
        .ok_or_else(|| anyhow!("unknown transaction type: {}", type_str))?;

    let status_str: String = row.get("status");
    let status = TransactionStatus::parse(&status_str)
        .ok_or_else(|| anyhow!("unknown transaction status: {}", status_str))?;

    Ok(BalanceTransaction {
        id: row.get::<i64, _>("id") as u64,
        user_id: row.get::<i64, _>("user_id") as u64,
        amount: row.get("amount"),
        balance_before: row.get("balance_before"),
        balance_after: row.get("balance_after"),
        transaction_type,
        status,
        description: row.get("description"),
        related_game_id: row.get::<Option<i64>, _>("related_game_id").map(|id| id as u64),
        reviewed_by: row.get::<Option<i64>, _>("reviewed_by").map(|id| id as u64),
        reviewed_at: row.get::<Option<DateTime<Utc>>, _>("reviewed_at"),
        reject_reason: row.get("reject_reason"),
        created_at: row.get("created_at"),
    })
}

const SELECT_COLUMNS: &str = r#"
    id, user_id, amount, balance_before, balance_after,
    transaction_type, status, description, related_game_id,
    reviewed_by, reviewed_at, reject_reason, created_at
"#;

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 원장 엔트리 생성 (트랜잭션 안에서)
    /// Insert a ledger entry (inside a transaction)
    ///
    /// 잔고 변경과 원장 기록이 한 트랜잭션에 묶여야 하므로
    /// 쓰기 경로는 전부 tx 실행기를 받음.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        data: &BalanceTransactionCreate,
    ) -> Result<BalanceTransaction> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO balance_transactions
                (user_id, amount, balance_before, balance_after,
                 transaction_type, status, description, related_game_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.user_id as i64)
        .bind(data.amount)
        .bind(data.balance_before)
        .bind(data.balance_after)
        .bind(data.transaction_type.as_str())
        .bind(data.status.as_str())
        .bind(data.description.as_deref())
        .bind(data.related_game_id.map(|id| id as i64))
        .bind(now)
        .execute(&mut *tx)
        .await
        .context("Failed to create balance transaction")?;

        Ok(BalanceTransaction {
            id: result.last_insert_rowid() as u64,
            user_id: data.user_id,
            amount: data.amount,
            balance_before: data.balance_before,
            balance_after: data.balance_after,
            transaction_type: data.transaction_type,
            status: data.status,
            description: data.description.clone(),
            related_game_id: data.related_game_id,
            reviewed_by: None,
            reviewed_at: None,
            reject_reason: None,
            created_at: now,
        })
    }

    /// ID로 거래 조회
    /// Get transaction by ID
    pub async fn get_by_id(&self, id: u64) -> Result<Option<BalanceTransaction>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM balance_transactions WHERE id = ?"
        ))
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch transaction by id")?;

        match row {
            Some(r) => Ok(Some(row_to_transaction(&r)?)),
            None => Ok(None),
        }
    }

    /// ID로 거래 조회 (심사 트랜잭션 안에서)
    /// Get transaction by ID inside the review transaction
    ///
    /// 상태 검사와 전이 사이에 다른 심사가 끼어들 수 없도록
    /// 심사 경로는 같은 트랜잭션에서 행을 읽음.
    pub async fn get_by_id_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: u64,
    ) -> Result<Option<BalanceTransaction>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM balance_transactions WHERE id = ?"
        ))
        .bind(id as i64)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to fetch transaction by id in tx")?;

        match row {
            Some(r) => Ok(Some(row_to_transaction(&r)?)),
            None => Ok(None),
        }
    }

    /// 승인 전이: status/reviewer/시각만 변경 (스냅샷은 생성 시점 값 유지)
    /// Approve transition: only status/reviewer/timestamp change
    pub async fn mark_approved_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: u64,
        reviewed_by: u64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE balance_transactions
            SET status = ?, reviewed_by = ?, reviewed_at = ?
            WHERE id = ?
            "#,
        )
        .bind(TransactionStatus::Approved.as_str())
        .bind(reviewed_by as i64)
        .bind(Utc::now())
        .bind(id as i64)
        .execute(&mut *tx)
        .await
        .context("Failed to mark transaction approved")?;

        Ok(())
    }

    /// 거절 전이: 사유를 기록하고 설명에도 덧붙임 (잔고 변경 없음)
    /// Reject transition: records the reason and annotates the description
    pub async fn mark_rejected_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: u64,
        reviewed_by: u64,
        reason: &str,
        description: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE balance_transactions
            SET status = ?, reviewed_by = ?, reviewed_at = ?, reject_reason = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(TransactionStatus::Rejected.as_str())
        .bind(reviewed_by as i64)
        .bind(Utc::now())
        .bind(reason)
        .bind(description)
        .bind(id as i64)
        .execute(&mut *tx)
        .await
        .context("Failed to mark transaction rejected")?;

        Ok(())
    }

    /// 사용자의 승인된 거래 목록 (최신순, limit 적용)
    /// List a user's approved transactions (newest first, capped)
    pub async fn list_approved_by_user(
        &self,
        user_id: u64,
        limit: i64,
    ) -> Result<Vec<BalanceTransaction>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM balance_transactions
            WHERE user_id = ? AND status = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#
        ))
        .bind(user_id as i64)
        .bind(TransactionStatus::Approved.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list approved transactions")?;

        rows.iter().map(row_to_transaction).collect()
    }

    /// 사용자의 PENDING 입금 목록 (최신순)
    /// List a user's pending deposits (newest first)
    pub async fn list_pending_by_user(&self, user_id: u64) -> Result<Vec<BalanceTransaction>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM balance_transactions
            WHERE user_id = ? AND status = ? AND transaction_type = ?
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(user_id as i64)
        .bind(TransactionStatus::Pending.as_str())
        .bind(TransactionType::Deposit.as_str())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list pending deposits")?;

        rows.iter().map(row_to_transaction).collect()
    }

    /// 전체 PENDING 입금 대기열 (관리자용, 오래된 요청 우선)
    /// Global pending deposit queue (admin view, oldest first for FIFO fairness)
    pub async fn list_pending_queue(&self, limit: i64) -> Result<Vec<PendingDepositQueueItem>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.user_id, t.amount, t.balance_before, t.balance_after,
                   t.transaction_type, t.status, t.description, t.related_game_id,
                   t.reviewed_by, t.reviewed_at, t.reject_reason, t.created_at,
                   u.email AS user_email
            FROM balance_transactions t
            JOIN users u ON u.id = t.user_id
            WHERE t.status = ? AND t.transaction_type = ?
            ORDER BY t.created_at ASC, t.id ASC
            LIMIT ?
            "#,
        )
        .bind(TransactionStatus::Pending.as_str())
        .bind(TransactionType::Deposit.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list pending deposit queue")?;

        rows.iter()
            .map(|row| {
                Ok(PendingDepositQueueItem {
                    transaction: row_to_transaction(row)?,
                    user_email: row.get("user_email"),
                })
            })
            .collect()
    }

    /// 사용자별 원장 집계 (APPROVED 거래만 합산)
    /// Per-user ledger stats (APPROVED rows only; PENDING/REJECTED never count)
    pub async fn stats_for_user(&self, user_id: u64) -> Result<TransactionStats> {
        let row = sqlx::query(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN transaction_type = 'DEPOSIT' THEN amount ELSE 0 END), 0) AS total_deposited,
                COALESCE(SUM(CASE WHEN transaction_type = 'PURCHASE' THEN -amount ELSE 0 END), 0) AS total_spent,
                COUNT(*) AS transaction_count
            FROM balance_transactions
            WHERE user_id = ? AND status = ?
            "#,
        )
        .bind(user_id as i64)
        .bind(TransactionStatus::Approved.as_str())
        .fetch_one(&self.pool)
        .await
        .context("Failed to compute transaction stats")?;

        Ok(TransactionStats {
            total_deposited: row.get("total_deposited"),
            total_spent: row.get("total_spent"),
            transaction_count: row.get("transaction_count"),
        })
    }
}
