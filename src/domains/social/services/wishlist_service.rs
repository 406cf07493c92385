use crate::domains::social::models::wishlist::{WishlistEntry, WishlistItem};
use crate::shared::database::{Database, GameRepository, WishlistRepository};
use crate::shared::errors::SocialError;

/// 위시리스트 서비스
/// Wishlist service
///
/// 역할:
/// - 위시리스트 추가/삭제 (사용자당 게임 1건)
/// - 위시리스트 목록 조회 (게임 정보 포함)
#[derive(Clone)]
pub struct WishlistService {
    db: Database,
}

impl WishlistService {
    /// 생성자
    /// Constructor
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 위시리스트에 게임 추가
    /// Add a game to the wishlist
    ///
    /// # 처리 과정
    /// 1. 게임 존재 확인
    /// 2. 중복 확인
    /// 3. 추가
    pub async fn add(&self, user_id: u64, game_id: u64) -> Result<WishlistItem, SocialError> {
        // Repository 생성 (Service 내부에서)
        let game_repo = GameRepository::new(self.db.pool().clone());
        let wishlist_repo = WishlistRepository::new(self.db.pool().clone());

        // 1. 게임 존재 확인
        game_repo
            .get_by_id(game_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to fetch game: {}", e)))?
            .ok_or(SocialError::GameNotFound { id: game_id })?;

        // 2. 중복 확인
        let already = wishlist_repo
            .exists(user_id, game_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to check wishlist: {}", e)))?;
        if already {
            return Err(SocialError::AlreadyWishlisted { game_id });
        }

        // 3. 추가
        let item = wishlist_repo
            .add(user_id, game_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to add wishlist item: {}", e)))?;

        Ok(item)
    }

    /// 위시리스트에서 게임 제거
    /// Remove a game from the wishlist
    pub async fn remove(&self, user_id: u64, game_id: u64) -> Result<(), SocialError> {
        // Repository 생성 (Service 내부에서)
        let wishlist_repo = WishlistRepository::new(self.db.pool().clone());

        let removed = wishlist_repo
            .remove(user_id, game_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to remove wishlist item: {}", e)))?;

        if !removed {
            return Err(SocialError::NotWishlisted { game_id });
        }

        Ok(())
    }

    /// 위시리스트 목록 조회 (최근 추가 순)
    /// List wishlist entries (latest first)
    pub async fn list(&self, user_id: u64) -> Result<Vec<WishlistEntry>, SocialError> {
        // Repository 생성 (Service 내부에서)
        let wishlist_repo = WishlistRepository::new(self.db.pool().clone());

        wishlist_repo
            .list_by_user(user_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to list wishlist: {}", e)))
    }
}
