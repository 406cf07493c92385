use sqlx::{Row, SqlitePool};
use anyhow::{Context, Result};
use chrono::Utc;
use crate::domains::social::models::review::{GameReviewItem, MyReviewItem, Review};

/// 리뷰 Repository
/// Review repository
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 리뷰 생성
    /// Create a review
    pub async fn create(
        &self,
        user_id: u64,
        game_id: u64,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<Review> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO reviews (user_id, game_id, rating, comment, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id as i64)
        .bind(game_id as i64)
        .bind(rating)
        .bind(comment)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create review")?;

        Ok(Review {
            id: result.last_insert_rowid() as u64,
            user_id,
            game_id,
            rating,
            comment: comment.map(|c| c.to_string()),
            created_at: now,
        })
    }

    /// 이미 리뷰를 작성했는지 확인
    /// Check whether the user already reviewed the game
    pub async fn exists(&self, user_id: u64, game_id: u64) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count
            FROM reviews
            WHERE user_id = ? AND game_id = ?
            "#,
        )
        .bind(user_id as i64)
        .bind(game_id as i64)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check review existence")?;

        Ok(row.get::<i64, _>("count") > 0)
    }

    /// 게임별 리뷰 목록 (작성자 표시명 조인, 최신순)
    /// Per-game reviews (author display name joined, newest first)
    pub async fn list_by_game(&self, game_id: u64) -> Result<Vec<GameReviewItem>> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.user_id, r.game_id, r.rating, r.comment, r.created_at,
                   u.nickname, u.email
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.game_id = ?
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .bind(game_id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list reviews")?;

        Ok(rows
            .iter()
            .map(|row| {
                let nickname: Option<String> = row.get("nickname");
                let email: String = row.get("email");
                // 닉네임이 없으면 이메일 로컬파트를 표시명으로 사용
                // Email local part stands in when the nickname is unset
                let author = nickname.unwrap_or_else(|| {
                    email.split('@').next().unwrap_or(&email).to_string()
                });

                GameReviewItem {
                    review: Review {
                        id: row.get::<i64, _>("id") as u64,
                        user_id: row.get::<i64, _>("user_id") as u64,
                        game_id: row.get::<i64, _>("game_id") as u64,
                        rating: row.get("rating"),
                        comment: row.get("comment"),
                        created_at: row.get("created_at"),
                    },
                    author,
                }
            })
            .collect())
    }

    /// 내가 쓴 리뷰 목록 (게임 제목 조인, 최신순)
    /// Reviews written by a user (game title joined, newest first)
    pub async fn list_by_user(&self, user_id: u64) -> Result<Vec<MyReviewItem>> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.user_id, r.game_id, r.rating, r.comment, r.created_at,
                   g.title AS game_title
            FROM reviews r
            JOIN games g ON g.id = r.game_id
            WHERE r.user_id = ?
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .bind(user_id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list user reviews")?;

        Ok(rows
            .iter()
            .map(|row| MyReviewItem {
                review: Review {
                    id: row.get::<i64, _>("id") as u64,
                    user_id: row.get::<i64, _>("user_id") as u64,
                    game_id: row.get::<i64, _>("game_id") as u64,
                    rating: row.get("rating"),
                    comment: row.get("comment"),
                    created_at: row.get("created_at"),
                },
                game_title: row.get("game_title"),
            })
            .collect())
    }

    /// 게임의 리뷰 통계 (평균 평점 + 리뷰 수, 리뷰가 없으면 평균은 None)
    /// Review stats for a game (average rating + count, None average when unreviewed)
    pub async fn stats_for_game(&self, game_id: u64) -> Result<(Option<f64>, i64)> {
        let row = sqlx::query(
            r#"
            SELECT AVG(rating) AS average, COUNT(*) AS count
            FROM reviews
            WHERE game_id = ?
            "#,
        )
        .bind(game_id as i64)
        .fetch_one(&self.pool)
        .await
        .context("Failed to compute review stats")?;

        Ok((row.get("average"), row.get::<i64, _>("count")))
    }
}
