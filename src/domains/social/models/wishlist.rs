use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};

/// 위시리스트 항목 (데이터베이스에서 조회)
/// Wishlist entry (row retrieved from the database)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = WishlistItem)]
pub struct WishlistItem {
    /// Wishlist entry ID (DB에서 자동 생성)
    pub id: u64,

    /// 사용자 ID
    pub user_id: u64,

    /// 찜한 게임 ID
    pub game_id: u64,

    /// 추가 시각
    pub created_at: DateTime<Utc>,
}

/// 위시리스트 추가 요청 모델
/// Wishlist addition request model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = AddWishlistRequest)]
pub struct AddWishlistRequest {
    /// 찜할 게임 ID
    pub game_id: u64,
}

/// 위시리스트 추가 응답 모델
/// Wishlist addition response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = AddWishlistResponse)]
pub struct AddWishlistResponse {
    pub item: WishlistItem,
    pub message: String,
}

/// 위시리스트 목록 항목 (게임 정보 조인)
/// Wishlist listing item (game details joined)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = WishlistEntry)]
pub struct WishlistEntry {
    /// 위시리스트 항목 ID
    pub id: u64,

    /// 게임 ID
    pub game_id: u64,

    /// 게임 제목
    pub title: String,

    /// 현재 판매가
    pub price: i64,

    /// 장르
    pub genre: Option<String>,

    /// 추가 시각
    pub added_at: DateTime<Utc>,
}

/// 위시리스트 목록 응답 모델
/// Wishlist listing response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = WishlistResponse)]
pub struct WishlistResponse {
    pub items: Vec<WishlistEntry>,
}

/// 위시리스트 삭제 응답 모델
/// Wishlist removal response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = RemoveWishlistResponse)]
pub struct RemoveWishlistResponse {
    pub message: String,
}
