use std::sync::Arc;
use std::time::Duration;

use crate::domains::auth::services::state::AuthState;
use crate::domains::auth::services::JwtService;
use crate::domains::catalog::services::state::CatalogState;
use crate::domains::social::services::state::SocialState;
use crate::domains::store::services::state::StoreState;
use crate::shared::clients::recommender::{Recommender, ScriptRecommender};
use crate::shared::database::Database;
use anyhow::Result;

/// 추천 스크립트 기본 제한 시간 (밀리초)
/// Default recommender script timeout (milliseconds)
const DEFAULT_RECOMMENDER_TIMEOUT_MS: u64 = 5000;

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 각 도메인의 State를 조합하여 전체 애플리케이션 상태를 관리
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 (공유)
    /// Database connection (shared)
    pub db: Database,
    pub auth_state: AuthState,
    pub catalog_state: CatalogState,
    pub social_state: SocialState,
    pub store_state: StoreState,
}

impl AppState {
    /// Create AppState with database
    /// 모든 도메인 State를 초기화하고 조합
    pub fn new(db: Database) -> Result<Self> {
        // 1. 공유 서비스 생성 (JWT 등)
        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string());
        let jwt_service = JwtService::new(jwt_secret);

        // 2. 추천 스크립트 클라이언트 (RECOMMENDER_SCRIPT 설정 시에만)
        //    미설정이면 추천 API는 인기순 폴백만 사용
        let recommender = Self::recommender_from_env();

        // 3. 각 도메인 State 생성
        let auth_state = AuthState::new(db.clone(), jwt_service);
        let catalog_state = CatalogState::new(db.clone(), recommender);
        let social_state = SocialState::new(db.clone());
        let store_state = StoreState::new(db.clone());

        // 4. AppState 조합
        Ok(Self {
            db,
            auth_state,
            catalog_state,
            social_state,
            store_state,
        })
    }

    /// 환경변수에서 추천 스크립트 설정을 읽음
    /// Read the recommender script configuration from the environment
    fn recommender_from_env() -> Option<Arc<dyn Recommender>> {
        let script_path = std::env::var("RECOMMENDER_SCRIPT").ok()?;

        let timeout_ms = std::env::var("RECOMMENDER_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RECOMMENDER_TIMEOUT_MS);

        tracing::info!(script = %script_path, timeout_ms, "recommender script enabled");

        Some(Arc::new(ScriptRecommender::new(
            script_path.into(),
            Duration::from_millis(timeout_ms),
        )))
    }
}
