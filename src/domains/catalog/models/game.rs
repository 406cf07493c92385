use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};

// =====================================================
// Game 모델 (카탈로그)
// =====================================================
// 역할: 판매 중인 게임의 카탈로그 정보
// 설명: price는 현재 판매가. 구매 시점에는 purchases.price_paid로
//       스냅샷이 남으므로 이후 가격 변경이 과거 구매에 영향을 주지 않음.
//       downloads는 구매 성공 시 1 증가 (인기순 정렬과 추천 폴백에 사용).
// =====================================================

/// 게임 모델 (데이터베이스에서 조회한 카탈로그 항목)
/// Game model (catalog row retrieved from the database)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = Game)]
pub struct Game {
    /// Game ID (DB에서 자동 생성)
    pub id: u64,

    /// 게임 제목
    /// Game title
    #[schema(example = "Stellar Frontier")]
    pub title: String,

    /// 개발사
    /// Developer
    #[schema(example = "Nova Interactive")]
    pub developer: Option<String>,

    /// 장르
    /// Genre
    #[schema(example = "RPG")]
    pub genre: Option<String>,

    /// 소개
    /// Description
    pub description: Option<String>,

    /// 현재 판매가 (0 이상, 0이면 무료)
    /// Current price (>= 0, zero means free)
    #[schema(example = 64000)]
    pub price: i64,

    /// 누적 다운로드 수 (구매 시 증가)
    /// Cumulative downloads (incremented on purchase)
    pub downloads: i64,

    /// 등록 시각
    pub created_at: DateTime<Utc>,

    /// 수정 시각
    pub updated_at: DateTime<Utc>,
}

/// 게임 등록 요청 모델 (관리자 전용)
/// Game creation request model (admin only)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = CreateGameRequest)]
pub struct CreateGameRequest {
    /// 게임 제목 (공백 불가)
    /// Game title (must not be blank)
    #[schema(example = "Stellar Frontier")]
    pub title: String,

    /// 개발사
    pub developer: Option<String>,

    /// 장르
    pub genre: Option<String>,

    /// 소개
    pub description: Option<String>,

    /// 판매가 (0 이상)
    /// Price (>= 0)
    #[schema(example = 64000)]
    pub price: i64,
}

/// 게임 수정 요청 모델 (관리자 전용, 부분 수정)
/// Game update request model (admin only, partial update)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = UpdateGameRequest)]
pub struct UpdateGameRequest {
    pub title: Option<String>,
    pub developer: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
}

/// 게임 목록 조회 쿼리 파라미터
/// Game listing query parameters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct GameListQuery {
    /// 제목/개발사 부분 일치 검색어
    /// Substring match against title/developer
    pub search: Option<String>,

    /// 장르 필터 (정확히 일치)
    /// Exact genre filter
    pub genre: Option<String>,

    /// 정렬 기준: popular(기본) | price_asc | price_desc | newest(=recent)
    /// Sort order: popular (default) | price_asc | price_desc | newest (alias: recent)
    pub sort: Option<String>,

    /// 페이지 크기 (기본 50, 최대 100)
    /// Page size (default 50, capped at 100)
    pub limit: Option<i64>,

    /// 페이지 오프셋 (기본 0)
    /// Page offset (default 0)
    pub offset: Option<i64>,
}

/// 게임 목록 정렬 기준
/// Game listing sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSort {
    /// 다운로드 많은 순 (기본값)
    /// Most downloaded first (default)
    Popular,
    /// 가격 낮은 순
    PriceAsc,
    /// 가격 높은 순
    PriceDesc,
    /// 최근 등록 순
    Newest,
}

impl GameSort {
    /// 쿼리 파라미터 해석 (알 수 없는 값은 popular로 처리)
    /// Interpret the query parameter (unknown values fall back to popular)
    pub fn from_query(s: Option<&str>) -> Self {
        match s {
            Some("price_asc") => GameSort::PriceAsc,
            Some("price_desc") => GameSort::PriceDesc,
            Some("newest") | Some("recent") => GameSort::Newest,
            _ => GameSort::Popular,
        }
    }
}

/// 게임 목록 응답 모델
/// Game listing response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = GameListResponse)]
pub struct GameListResponse {
    pub games: Vec<Game>,
}

/// 게임 상세 응답 모델 (리뷰 통계 포함)
/// Game detail response model (review stats included)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = GameDetailResponse)]
pub struct GameDetailResponse {
    #[serde(flatten)]
    pub game: Game,

    /// 평균 평점 (리뷰가 없으면 None)
    /// Average rating (None when there are no reviews)
    pub average_rating: Option<f64>,

    /// 리뷰 수
    /// Number of reviews
    pub review_count: i64,
}

/// 게임 등록/수정 응답 모델
/// Game create/update response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = GameMutationResponse)]
pub struct GameMutationResponse {
    pub game: Game,
    pub message: String,
}

/// 추천 목록 응답 모델
/// Recommendation response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = RecommendationResponse)]
pub struct RecommendationResponse {
    /// 추천 게임 목록 (보유작 제외)
    /// Recommended games (owned titles excluded)
    pub games: Vec<Game>,

    /// 추천 출처: script | popular
    /// Where the list came from: script | popular
    #[schema(example = "popular")]
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_falls_back_to_popular() {
        assert_eq!(GameSort::from_query(None), GameSort::Popular);
        assert_eq!(GameSort::from_query(Some("downloads")), GameSort::Popular);
        assert_eq!(GameSort::from_query(Some("price_asc")), GameSort::PriceAsc);
        assert_eq!(GameSort::from_query(Some("price_desc")), GameSort::PriceDesc);
        assert_eq!(GameSort::from_query(Some("newest")), GameSort::Newest);
        assert_eq!(GameSort::from_query(Some("recent")), GameSort::Newest);
    }
}
