use crate::shared::database::{Database, GameRepository, ReviewRepository};
use crate::domains::catalog::models::game::{
    CreateGameRequest, Game, GameDetailResponse, GameSort, UpdateGameRequest,
};
use crate::shared::errors::CatalogError;

/// 목록 조회 기본 페이지 크기
/// Default catalog page size
const DEFAULT_LIST_LIMIT: i64 = 50;

/// 목록 조회 최대 페이지 크기
/// Maximum catalog page size
const MAX_LIST_LIMIT: i64 = 100;

/// 게임 카탈로그 서비스
/// Game catalog service
///
/// 역할:
/// - 게임 목록/상세 조회 (검색, 장르 필터, 정렬, 페이지네이션)
/// - 게임 등록/수정 (관리자 전용, 유효성 검증 포함)
#[derive(Clone)]
pub struct GameService {
    db: Database,
}

impl GameService {
    /// 생성자
    /// Constructor
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 게임 목록 조회
    /// List games
    pub async fn list_games(
        &self,
        search: Option<&str>,
        genre: Option<&str>,
        sort: GameSort,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Game>, CatalogError> {
        let game_repo = GameRepository::new(self.db.pool().clone());

        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
        let offset = offset.unwrap_or(0).max(0);

        game_repo
            .list(search, genre, sort, limit, offset)
            .await
            .map_err(|e| CatalogError::DatabaseError(format!("Failed to list games: {}", e)))
    }

    /// 게임 조회
    /// Get game
    pub async fn get_game(&self, id: u64) -> Result<Game, CatalogError> {
        let game_repo = GameRepository::new(self.db.pool().clone());

        game_repo
            .get_by_id(id)
            .await
            .map_err(|e| CatalogError::DatabaseError(format!("Failed to fetch game: {}", e)))?
            .ok_or(CatalogError::GameNotFound { id })
    }

    /// 게임 상세 조회 (리뷰 통계 포함)
    /// Get game detail with review stats
    pub async fn get_game_detail(&self, id: u64) -> Result<GameDetailResponse, CatalogError> {
        let game = self.get_game(id).await?;

        let review_repo = ReviewRepository::new(self.db.pool().clone());
        let (average_rating, review_count) = review_repo
            .stats_for_game(id)
            .await
            .map_err(|e| CatalogError::DatabaseError(format!("Failed to fetch review stats: {}", e)))?;

        Ok(GameDetailResponse {
            game,
            average_rating,
            review_count,
        })
    }

    /// 게임 등록 (관리자 전용)
    /// Create a game (admin only)
    ///
    /// # Errors
    /// - 제목이 공백이면 INVALID_TITLE
    /// - 가격이 음수면 INVALID_PRICE
    pub async fn create_game(&self, request: CreateGameRequest) -> Result<Game, CatalogError> {
        // 1. 유효성 검증
        if request.title.trim().is_empty() {
            return Err(CatalogError::InvalidTitle);
        }
        if request.price < 0 {
            return Err(CatalogError::InvalidPrice { price: request.price });
        }

        // 2. 등록
        let game_repo = GameRepository::new(self.db.pool().clone());

        let game = game_repo
            .create(
                request.title.trim(),
                request.developer.as_deref(),
                request.genre.as_deref(),
                request.description.as_deref(),
                request.price,
            )
            .await
            .map_err(|e| CatalogError::DatabaseError(format!("Failed to create game: {}", e)))?;

        tracing::info!(game_id = game.id, title = %game.title, "game created");

        Ok(game)
    }

    /// 게임 수정 (관리자 전용, 전달된 필드만 변경)
    /// Update a game (admin only, partial)
    pub async fn update_game(
        &self,
        id: u64,
        request: UpdateGameRequest,
    ) -> Result<Game, CatalogError> {
        // 1. 유효성 검증 (전달된 필드만)
        if let Some(title) = &request.title {
            if title.trim().is_empty() {
                return Err(CatalogError::InvalidTitle);
            }
        }
        if let Some(price) = request.price {
            if price < 0 {
                return Err(CatalogError::InvalidPrice { price });
            }
        }

        // 2. 수정
        let game_repo = GameRepository::new(self.db.pool().clone());

        game_repo
            .update(id, &request)
            .await
            .map_err(|e| CatalogError::DatabaseError(format!("Failed to update game: {}", e)))?
            .ok_or(CatalogError::GameNotFound { id })
    }
}
