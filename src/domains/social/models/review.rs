use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use chrono::{DateTime, Utc};

// =====================================================
// Review 모델 (리뷰/평점)
// =====================================================
// 역할: 구매자가 남기는 게임 평점과 후기
// 설명: 게임을 소유한 사용자만 작성 가능하고, 게임당 한 건으로 제한됨
//       (user_id, game_id) UNIQUE 제약이 중복 작성을 막음.
// =====================================================

/// 리뷰 모델 (데이터베이스에서 조회한 리뷰)
/// Review model (row retrieved from the database)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = Review)]
pub struct Review {
    /// Review ID (DB에서 자동 생성)
    pub id: u64,

    /// 작성자 ID
    pub user_id: u64,

    /// 대상 게임 ID
    pub game_id: u64,

    /// 평점 (1 ~ 5)
    /// Rating (1 to 5)
    #[schema(example = 5)]
    pub rating: i64,

    /// 후기 본문 (선택)
    /// Review body (optional)
    pub comment: Option<String>,

    /// 작성 시각
    pub created_at: DateTime<Utc>,
}

/// 리뷰 작성 요청 모델
/// Review creation request model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = CreateReviewRequest)]
pub struct CreateReviewRequest {
    /// 대상 게임 ID
    pub game_id: u64,

    /// 평점 (1 ~ 5)
    #[schema(example = 4)]
    pub rating: i64,

    /// 후기 본문
    pub comment: Option<String>,
}

/// 리뷰 작성 응답 모델
/// Review creation response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = CreateReviewResponse)]
pub struct CreateReviewResponse {
    pub review: Review,
    pub message: String,
}

/// 게임별 리뷰 목록 항목 (작성자 닉네임 조인)
/// Per-game review item (author nickname joined)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = GameReviewItem)]
pub struct GameReviewItem {
    #[serde(flatten)]
    pub review: Review,

    /// 작성자 닉네임 (없으면 이메일 로컬파트)
    /// Author nickname (email local part when unset)
    pub author: String,
}

/// 게임별 리뷰 목록 응답 모델
/// Per-game review listing response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = GameReviewsResponse)]
pub struct GameReviewsResponse {
    pub reviews: Vec<GameReviewItem>,

    /// 평균 평점 (리뷰가 없으면 None)
    /// Average rating (None when there are no reviews)
    pub average_rating: Option<f64>,
}

/// 내가 쓴 리뷰 항목 (게임 제목 조인)
/// Own review item (game title joined)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = MyReviewItem)]
pub struct MyReviewItem {
    #[serde(flatten)]
    pub review: Review,

    /// 대상 게임 제목
    /// Title of the reviewed game
    pub game_title: String,
}

/// 내가 쓴 리뷰 목록 응답 모델
/// Own review listing response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = MyReviewsResponse)]
pub struct MyReviewsResponse {
    pub reviews: Vec<MyReviewItem>,
}
