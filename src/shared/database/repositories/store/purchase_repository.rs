use sqlx::{Row, SqlitePool, Sqlite, Transaction};
use sqlx::sqlite::SqliteRow;
use anyhow::{Context, Result};
use chrono::Utc;
use crate::domains::store::models::purchase::{LibraryItem, Purchase};

/// 구매(소유권) Repository
/// Purchase (ownership) repository
pub struct PurchaseRepository {
    pool: SqlitePool,
}

fn row_to_purchase(row: &SqliteRow) -> Purchase {
    Purchase {
        id: row.get::<i64, _>("id") as u64,
        user_id: row.get::<i64, _>("user_id") as u64,
        game_id: row.get::<i64, _>("game_id") as u64,
        price_paid: row.get("price_paid"),
        created_at: row.get("created_at"),
    }
}

impl PurchaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 구매 기록 생성 (정산 트랜잭션 안에서)
    /// Insert a purchase row (inside the settlement transaction)
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user_id: u64,
        game_id: u64,
        price_paid: i64,
    ) -> Result<Purchase> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO purchases (user_id, game_id, price_paid, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id as i64)
        .bind(game_id as i64)
        .bind(price_paid)
        .bind(now)
        .execute(&mut *tx)
        .await
        .context("Failed to create purchase")?;

        Ok(Purchase {
            id: result.last_insert_rowid() as u64,
            user_id,
            game_id,
            price_paid,
            created_at: now,
        })
    }

    /// 소유 여부 확인
    /// Check ownership
    pub async fn exists(&self, user_id: u64, game_id: u64) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM purchases
            WHERE user_id = ? AND game_id = ?
            "#,
        )
        .bind(user_id as i64)
        .bind(game_id as i64)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check purchase existence")?;

        Ok(row.get::<i64, _>("count") > 0)
    }

    /// 소유 여부 확인 (정산 트랜잭션 안에서)
    /// Check ownership inside the settlement transaction
    pub async fn exists_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user_id: u64,
        game_id: u64,
    ) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM purchases
            WHERE user_id = ? AND game_id = ?
            "#,
        )
        .bind(user_id as i64)
        .bind(game_id as i64)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to check purchase existence in tx")?;

        Ok(row.get::<i64, _>("count") > 0)
    }

    /// ID로 구매 기록 조회 (환불 트랜잭션 안에서)
    /// Get purchase by ID inside the refund transaction
    pub async fn get_by_id_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: u64,
    ) -> Result<Option<Purchase>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, game_id, price_paid, created_at
            FROM purchases
            WHERE id = ?
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&mut *tx)
        .await
        .context("Failed to fetch purchase by id in tx")?;

        Ok(row.map(|r| row_to_purchase(&r)))
    }

    /// 구매 기록 삭제 (환불 시 소유권 회수)
    /// Delete a purchase row (ownership is withdrawn on refund)
    pub async fn delete_in_tx(&self, tx: &mut Transaction<'_, Sqlite>, id: u64) -> Result<()> {
        sqlx::query("DELETE FROM purchases WHERE id = ?")
            .bind(id as i64)
            .execute(&mut *tx)
            .await
            .context("Failed to delete purchase")?;

        Ok(())
    }

    /// 사용자 라이브러리 (게임 정보 조인, 최근 구매 우선)
    /// User library (game details joined, most recent first)
    pub async fn list_library(&self, user_id: u64) -> Result<Vec<LibraryItem>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id AS purchase_id, p.game_id, g.title, g.developer, g.genre,
                   p.price_paid, p.created_at AS purchased_at
            FROM purchases p
            JOIN games g ON g.id = p.game_id
            WHERE p.user_id = ?
            ORDER BY p.created_at DESC, p.id DESC
            "#,
        )
        .bind(user_id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list library")?;

        Ok(rows
            .iter()
            .map(|row| LibraryItem {
                purchase_id: row.get::<i64, _>("purchase_id") as u64,
                game_id: row.get::<i64, _>("game_id") as u64,
                title: row.get("title"),
                developer: row.get("developer"),
                genre: row.get("genre"),
                price_paid: row.get("price_paid"),
                purchased_at: row.get("purchased_at"),
            })
            .collect())
    }

    /// 사용자가 소유한 게임 ID 목록 (추천에서 보유작 제외용)
    /// Owned game IDs (recommendations exclude owned titles)
    pub async fn list_owned_game_ids(&self, user_id: u64) -> Result<Vec<u64>> {
        let rows = sqlx::query(
            r#"
            SELECT game_id
            FROM purchases
            WHERE user_id = ?
            "#,
        )
        .bind(user_id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list owned game ids")?;

        Ok(rows
            .iter()
            .map(|row| row.get::<i64, _>("game_id") as u64)
            .collect())
    }
}
