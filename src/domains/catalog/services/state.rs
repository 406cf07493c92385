use std::sync::Arc;

use crate::shared::clients::recommender::Recommender;
use crate::shared::database::Database;

use super::{GameService, RecommendationService};

/// Catalog 도메인 상태
/// Catalog domain state
///
/// 게임 카탈로그/추천 핸들러가 사용하는 서비스 묶음.
#[derive(Clone)]
pub struct CatalogState {
    pub game_service: GameService,
    pub recommendation_service: RecommendationService,
}

impl CatalogState {
    /// CatalogState 생성자
    /// CatalogState constructor
    pub fn new(db: Database, recommender: Option<Arc<dyn Recommender>>) -> Self {
        Self {
            game_service: GameService::new(db.clone()),
            recommendation_service: RecommendationService::new(db, recommender),
        }
    }
}
