use sqlx::{Row, SqlitePool, Sqlite, Transaction};
use anyhow::{Context, Result};
use chrono::Utc;
use crate::domains::social::models::wishlist::{WishlistEntry, WishlistItem};

/// 위시리스트 Repository
/// Wishlist repository
pub struct WishlistRepository {
    pool: SqlitePool,
}

impl WishlistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 위시리스트에 추가
    /// Add to wishlist
    pub async fn add(&self, user_id: u64, game_id: u64) -> Result<WishlistItem> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO wishlists (user_id, game_id, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(user_id as i64)
        .bind(game_id as i64)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to add wishlist entry")?;

        Ok(WishlistItem {
            id: result.last_insert_rowid() as u64,
            user_id,
            game_id,
            created_at: now,
        })
    }

    /// 이미 찜했는지 확인
    /// Check whether the game is already wishlisted
    pub async fn exists(&self, user_id: u64, game_id: u64) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM wishlists
            WHERE user_id = ? AND game_id = ?
            "#,
        )
        .bind(user_id as i64)
        .bind(game_id as i64)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check wishlist existence")?;

        Ok(row.get::<i64, _>("count") > 0)
    }

    /// 위시리스트에서 제거 (제거 여부 반환)
    /// Remove from wishlist (returns whether a row was removed)
    pub async fn remove(&self, user_id: u64, game_id: u64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM wishlists
            WHERE user_id = ? AND game_id = ?
            "#,
        )
        .bind(user_id as i64)
        .bind(game_id as i64)
        .execute(&self.pool)
        .await
        .context("Failed to remove wishlist entry")?;

        Ok(result.rows_affected() > 0)
    }

    /// 위시리스트에서 제거 (정산 트랜잭션 안에서, 없으면 조용히 지나감)
    /// Remove from wishlist inside the settlement transaction (no-op when absent)
    pub async fn remove_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user_id: u64,
        game_id: u64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM wishlists
            WHERE user_id = ? AND game_id = ?
            "#,
        )
        .bind(user_id as i64)
        .bind(game_id as i64)
        .execute(&mut *tx)
        .await
        .context("Failed to remove wishlist entry in tx")?;

        Ok(())
    }

    /// 사용자의 위시리스트 (게임 정보 조인, 최근 추가 우선)
    /// User wishlist (game details joined, most recent first)
    pub async fn list_by_user(&self, user_id: u64) -> Result<Vec<WishlistEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT w.id, w.game_id, g.title, g.price, g.genre, w.created_at AS added_at
            FROM wishlists w
            JOIN games g ON g.id = w.game_id
            WHERE w.user_id = ?
            ORDER BY w.created_at DESC, w.id DESC
            "#,
        )
        .bind(user_id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list wishlist")?;

        Ok(rows
            .iter()
            .map(|row| WishlistEntry {
                id: row.get::<i64, _>("id") as u64,
                game_id: row.get::<i64, _>("game_id") as u64,
                title: row.get("title"),
                price: row.get("price"),
                genre: row.get("genre"),
                added_at: row.get("added_at"),
            })
            .collect())
    }
}
