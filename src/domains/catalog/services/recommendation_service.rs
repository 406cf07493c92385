use std::sync::Arc;

use crate::shared::clients::recommender::Recommender;
use crate::shared::database::{Database, GameRepository, PurchaseRepository};
use crate::domains::catalog::models::game::Game;
use crate::shared::errors::CatalogError;

/// 추천 목록 크기
/// Recommendation list size
const RECOMMENDATION_LIMIT: usize = 10;

/// 추천 서비스
/// Recommendation service
///
/// 역할:
/// - 외부 추천 스크립트 호출 (설정된 경우)
/// - 실패/미설정 시 인기순 폴백 (다운로드 많은 순, 보유작 제외)
///
/// 추천 스크립트는 best-effort 확장일 뿐이며, 어떤 실패도
/// 요청을 실패시키지 않고 폴백 목록으로 응답함.
#[derive(Clone)]
pub struct RecommendationService {
    db: Database,
    recommender: Option<Arc<dyn Recommender>>,
}

impl RecommendationService {
    /// 생성자
    /// Constructor
    ///
    /// `recommender`가 None이면 항상 인기순 폴백을 사용.
    pub fn new(db: Database, recommender: Option<Arc<dyn Recommender>>) -> Self {
        Self { db, recommender }
    }

    /// 사용자별 추천 목록
    /// Per-user recommendations
    ///
    /// # Returns
    /// * `Ok((Vec<Game>, &str))` - 추천 게임 목록과 출처 ("script" | "popular")
    pub async fn recommend(&self, user_id: u64) -> Result<(Vec<Game>, &'static str), CatalogError> {
        let purchase_repo = PurchaseRepository::new(self.db.pool().clone());
        let game_repo = GameRepository::new(self.db.pool().clone());

        // 보유작은 추천에서 항상 제외
        let owned = purchase_repo
            .list_owned_game_ids(user_id)
            .await
            .map_err(|e| CatalogError::DatabaseError(format!("Failed to list owned games: {}", e)))?;

        // 1. 외부 추천 스크립트 시도 (설정된 경우)
        if let Some(recommender) = &self.recommender {
            match recommender.recommend(user_id, &owned, RECOMMENDATION_LIMIT).await {
                Ok(ids) => {
                    match self.resolve_script_ids(&game_repo, &ids, &owned).await {
                        Ok(games) if !games.is_empty() => return Ok((games, "script")),
                        Ok(_) => {
                            tracing::warn!(user_id, "recommender returned no usable games, falling back");
                        }
                        Err(e) => {
                            tracing::warn!(user_id, "failed to resolve recommended ids: {e}, falling back");
                        }
                    }
                }
                Err(e) => {
                    // 스크립트 실패는 요청을 실패시키지 않음
                    tracing::warn!(user_id, "recommender script failed: {e}, falling back");
                }
            }
        }

        // 2. 인기순 폴백
        let games = game_repo
            .list_popular_excluding(&owned, RECOMMENDATION_LIMIT as i64)
            .await
            .map_err(|e| CatalogError::DatabaseError(format!("Failed to list popular games: {}", e)))?;

        Ok((games, "popular"))
    }

    /// 스크립트가 돌려준 ID를 게임으로 변환 (순서 유지, 보유작/미지 ID 제거)
    /// Resolve script IDs to games (order preserved, owned/unknown IDs dropped)
    async fn resolve_script_ids(
        &self,
        game_repo: &GameRepository,
        ids: &[u64],
        owned: &[u64],
    ) -> anyhow::Result<Vec<Game>> {
        let fetched = game_repo.get_by_ids(ids).await?;

        // 스크립트 출력 순서를 지키면서 매핑
        let games = ids
            .iter()
            .filter(|id| !owned.contains(id))
            .filter_map(|id| fetched.iter().find(|g| g.id == *id).cloned())
            .take(RECOMMENDATION_LIMIT)
            .collect();

        Ok(games)
    }
}
