use sqlx::{Row, SqlitePool, Sqlite, Transaction};
use sqlx::sqlite::SqliteRow;
use anyhow::{Context, Result};
use chrono::Utc;
use crate::domains::catalog::models::game::{Game, GameSort, UpdateGameRequest};

/// 게임 카탈로그 Repository
/// Game catalog repository
pub struct GameRepository {
    pool: SqlitePool,
}

fn row_to_game(row: &SqliteRow) -> Game {
    Game {
        id: row.get::<i64, _>("id") as u64,
        title: row.get("title"),
        developer: row.get("developer"),
        genre: row.get("genre"),
        description: row.get("description"),
        price: row.get("price"),
        downloads: row.get("downloads"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const SELECT_COLUMNS: &str =
    "id, title, developer, genre, description, price, downloads, created_at, updated_at";

impl GameRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 게임 등록
    /// Create a game
    pub async fn create(
        &self,
        title: &str,
        developer: Option<&str>,
        genre: Option<&str>,
        description: Option<&str>,
        price: i64,
    ) -> Result<Game> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO games (title, developer, genre, description, price, downloads, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(title)
        .bind(developer)
        .bind(genre)
        .bind(description)
        .bind(price)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create game")?;

        Ok(Game {
            id: result.last_insert_rowid() as u64,
            title: title.to_string(),
            developer: developer.map(|s| s.to_string()),
            genre: genre.map(|s| s.to_string()),
            description: description.map(|s| s.to_string()),
            price,
            downloads: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// ID로 게임 조회
    /// Get game by ID
    pub async fn get_by_id(&self, id: u64) -> Result<Option<Game>> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM games WHERE id = ?"))
            .bind(id as i64)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch game by id")?;

        Ok(row.map(|r| row_to_game(&r)))
    }

    /// ID로 게임 조회 (정산 트랜잭션 안에서 가격을 읽을 때)
    /// Get game by ID inside the settlement transaction (price read)
    pub async fn get_by_id_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: u64,
    ) -> Result<Option<Game>> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM games WHERE id = ?"))
            .bind(id as i64)
            .fetch_optional(&mut *tx)
            .await
            .context("Failed to fetch game by id in tx")?;

        Ok(row.map(|r| row_to_game(&r)))
    }

    /// 게임 수정 (전달된 필드만 변경)
    /// Update a game (only the provided fields change)
    pub async fn update(&self, id: u64, changes: &UpdateGameRequest) -> Result<Option<Game>> {
        let result = sqlx::query(
            r#"
            UPDATE games
            SET title       = COALESCE(?, title),
                developer   = COALESCE(?, developer),
                genre       = COALESCE(?, genre),
                description = COALESCE(?, description),
                price       = COALESCE(?, price),
                updated_at  = ?
            WHERE id = ?
            "#,
        )
        .bind(changes.title.as_deref())
        .bind(changes.developer.as_deref())
        .bind(changes.genre.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.price)
        .bind(Utc::now())
        .bind(id as i64)
        .execute(&self.pool)
        .await
        .context("Failed to update game")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// 게임 목록 조회 (검색/장르 필터 + 정렬 + 페이지네이션)
    /// List games (search/genre filter + sort + pagination)
    pub async fn list(
        &self,
        search: Option<&str>,
        genre: Option<&str>,
        sort: GameSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Game>> {
        let mut sql = format!("SELECT {SELECT_COLUMNS} FROM games WHERE 1 = 1");
        if search.is_some() {
            sql.push_str(" AND (title LIKE ? OR developer LIKE ?)");
        }
        if genre.is_some() {
            sql.push_str(" AND genre = ?");
        }
        // 정렬 기준은 닫힌 enum이므로 문자열 조립이 안전함
        // ORDER BY comes from a closed enum, so string assembly is safe here
        sql.push_str(match sort {
            GameSort::Popular => " ORDER BY downloads DESC, id ASC",
            GameSort::PriceAsc => " ORDER BY price ASC, id ASC",
            GameSort::PriceDesc => " ORDER BY price DESC, id ASC",
            GameSort::Newest => " ORDER BY created_at DESC, id DESC",
        });
        sql.push_str(" LIMIT ? OFFSET ?");

        let mut query = sqlx::query(&sql);
        if let Some(term) = search {
            let pattern = format!("%{}%", term);
            query = query.bind(pattern.clone()).bind(pattern);
        }
        if let Some(g) = genre {
            query = query.bind(g.to_string());
        }
        query = query.bind(limit).bind(offset);

        let rows = query
            .fetch_all(&self.pool)
            .await
            .context("Failed to list games")?;

        Ok(rows.iter().map(row_to_game).collect())
    }

    /// 다운로드 수 증가 (구매 성공 시)
    /// Increment downloads (on successful purchase)
    pub async fn increment_downloads_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: u64,
    ) -> Result<()> {
        sqlx::query("UPDATE games SET downloads = downloads + 1, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id as i64)
            .execute(&mut *tx)
            .await
            .context("Failed to increment downloads")?;

        Ok(())
    }

    /// 다운로드 수 감소 (환불 시, 0 아래로는 내려가지 않음)
    /// Decrement downloads (on refund, floored at zero)
    pub async fn decrement_downloads_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: u64,
    ) -> Result<()> {
        sqlx::query("UPDATE games SET downloads = MAX(downloads - 1, 0), updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id as i64)
            .execute(&mut *tx)
            .await
            .context("Failed to decrement downloads")?;

        Ok(())
    }

    /// 인기 게임 목록 (보유작 제외, 추천 폴백용)
    /// Popular games excluding owned titles (recommendation fallback)
    pub async fn list_popular_excluding(
        &self,
        excluded_ids: &[u64],
        limit: i64,
    ) -> Result<Vec<Game>> {
        let mut sql = format!("SELECT {SELECT_COLUMNS} FROM games");
        if !excluded_ids.is_empty() {
            let placeholders = vec!["?"; excluded_ids.len()].join(", ");
            sql.push_str(&format!(" WHERE id NOT IN ({placeholders})"));
        }
        sql.push_str(" ORDER BY downloads DESC, id ASC LIMIT ?");

        let mut query = sqlx::query(&sql);
        for id in excluded_ids {
            query = query.bind(*id as i64);
        }
        query = query.bind(limit);

        let rows = query
            .fetch_all(&self.pool)
            .await
            .context("Failed to list popular games")?;

        Ok(rows.iter().map(row_to_game).collect())
    }

    /// ID 목록으로 게임 조회 (추천 스크립트 결과 매핑용)
    /// Fetch games by ID list (maps script recommendation output)
    pub async fn get_by_ids(&self, ids: &[u64]) -> Result<Vec<Game>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT {SELECT_COLUMNS} FROM games WHERE id IN ({placeholders})");

        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(*id as i64);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch games by ids")?;

        Ok(rows.iter().map(row_to_game).collect())
    }
}
