use crate::shared::database::Database;

use super::{ReviewService, WishlistService};

/// Social 도메인 상태
/// Social domain state
///
/// 리뷰/위시리스트 핸들러가 사용하는 서비스 묶음.
#[derive(Clone)]
pub struct SocialState {
    pub review_service: ReviewService,
    pub wishlist_service: WishlistService,
}

impl SocialState {
    /// SocialState 생성자
    /// SocialState constructor
    pub fn new(db: Database) -> Self {
        Self {
            review_service: ReviewService::new(db.clone()),
            wishlist_service: WishlistService::new(db),
        }
    }
}
