use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use anyhow::{Context, Result};

// 데이터베이스 연결 풀
// Database connection pool for SQLite
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    // 데이터베이스 연결 생성
    // Create database connection
    // db_url: SQLite 연결 문자열 (예: "sqlite:game_store.db?mode=rwc", "sqlite::memory:")
    pub async fn new(db_url: &str) -> Result<Self> {
        // 커넥션을 1개로 고정해서 쓰기 트랜잭션을 직렬화함
        // SQLite는 동시 쓰기를 허용하지 않으므로 풀 수준에서 정렬해야
        // 잠금 경합(SQLITE_BUSY) 없이 동시 구매 요청을 처리할 수 있음.
        // A single connection serializes write transactions at the pool level,
        // so concurrent purchases queue up instead of failing with SQLITE_BUSY.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect(db_url)
            .await
            .context("Failed to connect to database")?;

        Ok(Self { pool })
    }

    // 연결 풀 반환
    // Get connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // 테이블 생성 (초기화) - 마이그레이션 실행
    // Create tables (initialization) - Run migrations
    // migrations/ 폴더의 모든 .sql 파일을 순서대로 실행
    pub async fn initialize(&self) -> Result<()> {
        // 마이그레이션 자동 실행
        // Run migrations from migrations/ folder
        sqlx::migrate!("./migrations")
            .run(self.pool())
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("database migrations completed");
        Ok(())
    }
}
