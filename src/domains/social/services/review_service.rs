use crate::domains::social::models::review::{GameReviewItem, MyReviewItem, Review};
use crate::shared::database::{Database, GameRepository, PurchaseRepository, ReviewRepository};
use crate::shared::errors::SocialError;

/// 평점 허용 범위
/// Allowed rating range
const MIN_RATING: i64 = 1;
const MAX_RATING: i64 = 5;

/// 리뷰 서비스
/// Review service
///
/// 역할:
/// - 리뷰 작성 (구매자만, 게임당 1건)
/// - 게임별 리뷰 목록/평균 평점 조회
/// - 내가 쓴 리뷰 목록 조회
#[derive(Clone)]
pub struct ReviewService {
    db: Database,
}

impl ReviewService {
    /// 생성자
    /// Constructor
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 리뷰 작성
    /// Create a review
    ///
    /// # 처리 과정
    /// 1. 평점 범위 검증 (1~5)
    /// 2. 게임 존재 확인
    /// 3. 구매 여부 확인 (소유자만 리뷰 가능)
    /// 4. 중복 리뷰 확인 (게임당 1건)
    /// 5. 리뷰 저장
    pub async fn create_review(
        &self,
        user_id: u64,
        game_id: u64,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<Review, SocialError> {
        // Repository 생성 (Service 내부에서)
        let game_repo = GameRepository::new(self.db.pool().clone());
        let purchase_repo = PurchaseRepository::new(self.db.pool().clone());
        let review_repo = ReviewRepository::new(self.db.pool().clone());

        // 1. 평점 범위 검증
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(SocialError::InvalidRating { rating });
        }

        // 2. 게임 존재 확인
        game_repo
            .get_by_id(game_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to fetch game: {}", e)))?
            .ok_or(SocialError::GameNotFound { id: game_id })?;

        // 3. 구매 여부 확인
        let purchased = purchase_repo
            .exists(user_id, game_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to check purchase: {}", e)))?;
        if !purchased {
            return Err(SocialError::NotPurchased { game_id });
        }

        // 4. 중복 리뷰 확인
        let already = review_repo
            .exists(user_id, game_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to check review: {}", e)))?;
        if already {
            return Err(SocialError::AlreadyReviewed { game_id });
        }

        // 5. 리뷰 저장 (댓글은 공백 제거, 빈 문자열은 없는 것으로 처리)
        let comment = comment
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let review = review_repo
            .create(user_id, game_id, rating, comment)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to create review: {}", e)))?;

        tracing::info!(user_id, game_id, rating, "review created");

        Ok(review)
    }

    /// 게임별 리뷰 목록 + 평균 평점
    /// Reviews and average rating for a game
    pub async fn game_reviews(
        &self,
        game_id: u64,
    ) -> Result<(Vec<GameReviewItem>, Option<f64>), SocialError> {
        // Repository 생성 (Service 내부에서)
        let game_repo = GameRepository::new(self.db.pool().clone());
        let review_repo = ReviewRepository::new(self.db.pool().clone());

        // 게임 존재 확인
        game_repo
            .get_by_id(game_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to fetch game: {}", e)))?
            .ok_or(SocialError::GameNotFound { id: game_id })?;

        let reviews = review_repo
            .list_by_game(game_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to list reviews: {}", e)))?;

        let (average, _count) = review_repo
            .stats_for_game(game_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to compute average: {}", e)))?;

        Ok((reviews, average))
    }

    /// 내가 쓴 리뷰 목록 (최신순)
    /// Reviews written by the user (newest first)
    pub async fn my_reviews(&self, user_id: u64) -> Result<Vec<MyReviewItem>, SocialError> {
        let review_repo = ReviewRepository::new(self.db.pool().clone());

        review_repo
            .list_by_user(user_id)
            .await
            .map_err(|e| SocialError::DatabaseError(format!("Failed to list reviews: {}", e)))
    }
}
