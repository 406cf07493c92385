use sqlx::{Row, SqlitePool, Sqlite, Transaction};
use sqlx::sqlite::SqliteRow;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use crate::domains::auth::models::user::{Role, User};

pub struct UserRepository {
    pool: SqlitePool
}

// Row -> User 변환 (컬럼 매핑 한 곳에 모음)
// Map a row to User (column mapping kept in one place)
fn row_to_user(row: &SqliteRow) -> Result<User> {
    let role_str: String = row.get("role");
    let role = Role::parse(&role_str)
        .ok_or_else(|| anyhow!("unknown role: {}", role_str))?;

    Ok(User {
        id: row.get::<i64, _>("id") as u64,
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        nickname: row.get("nickname"),
        role,
        balance: row.get("balance"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        nickname: Option<&str>,
        role: Role,
    ) -> Result<User> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, nickname, role, balance, created_at, updated_at)
            VALUES (?, ?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(nickname)
        .bind(role.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create user")?;

        let id = result.last_insert_rowid() as u64;

        Ok(User {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            nickname: nickname.map(|n| n.to_string()),
            role,
            balance: 0,
            created_at: now,
            updated_at: now,
        })
    }

    // 이메일로 사용자 조회 (로그인용)
    // Get user by email (for login)
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, nickname, role, balance, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")?;

        match row {
            Some(r) => Ok(Some(row_to_user(&r)?)),
            None => Ok(None),
        }
    }

    // ID로 사용자 조회
    // Get user by ID
    pub async fn get_user_by_id(&self, id: u64) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, nickname, role, balance, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id")?;

        match row {
            Some(r) => Ok(Some(row_to_user(&r)?)),
            None => Ok(None),
        }
    }

    // 사용자 목록 (관리자용, 가입순 + 페이지네이션)
    // List users (admin view, by signup order, paginated)
    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, password_hash, nickname, role, balance, created_at, updated_at
            FROM users
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list users")?;

        rows.iter().map(row_to_user).collect()
    }

    // 트랜잭션 안에서 사용자 조회 (live 잔고를 읽어야 하는 정산/승인 경로)
    // Get user inside a transaction (settlement/approval paths read the live balance)
    pub async fn get_user_by_id_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: u64,
    ) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, nickname, role, balance, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to fetch user by id in tx")?;

        match row {
            Some(r) => Ok(Some(row_to_user(&r)?)),
            None => Ok(None),
        }
    }

    // 조건부 차감: balance >= amount일 때만 차감하고 성공 여부를 반환
    // Conditional debit: only succeeds when balance >= amount
    //
    // WHERE 절의 잔고 검사와 차감이 한 문장에서 일어나므로
    // 조회-후-차감 사이에 잔고가 변하는 경쟁을 원천적으로 차단함.
    pub async fn try_debit_balance_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user_id: u64,
        amount: i64,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET balance = balance - ?, updated_at = ?
            WHERE id = ? AND balance >= ?
            "#,
        )
        .bind(amount)
        .bind(Utc::now())
        .bind(user_id as i64)
        .bind(amount)
        .execute(&mut *tx)
        .await
        .context("Failed to debit balance")?;

        Ok(result.rows_affected() == 1)
    }

    // 잔고 증가 (입금 승인, 환불, 양수 조정)
    // Credit balance (deposit approval, refund, positive adjustment)
    pub async fn credit_balance_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user_id: u64,
        amount: i64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET balance = balance + ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(amount)
        .bind(Utc::now())
        .bind(user_id as i64)
        .execute(&mut *tx)
        .await
        .context("Failed to credit balance")?;

        Ok(())
    }
}
