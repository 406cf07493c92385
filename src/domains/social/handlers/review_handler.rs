use crate::domains::social::models::review::{
    CreateReviewRequest, CreateReviewResponse, GameReviewsResponse, MyReviewsResponse,
};
use crate::shared::errors::SocialError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

// =====================================================
// Review Handler
// =====================================================
// 역할: 리뷰 HTTP API 엔드포인트
//
// 처리 흐름:
// HTTP Request → Handler → Service → Repository → Response
// =====================================================

/// 리뷰 작성 핸들러
/// Create review handler
///
/// 구매한 게임에 평점(1~5)과 후기를 남깁니다. 게임당 1건.
///
/// # Authentication
/// JWT 토큰 필요 (Bearer token)
///
/// # Request Body
/// - game_id: 대상 게임 ID
/// - rating: 평점 (1 ~ 5)
/// - comment: 후기 본문 (optional)
///
/// # Response
/// - 201: 리뷰 작성 성공
/// - 400: 평점 범위 초과 또는 중복 리뷰
/// - 403: 구매하지 않은 게임
/// - 404: 게임을 찾을 수 없음
#[utoipa::path(
    post,
    path = "/api/customer/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created successfully", body = CreateReviewResponse),
        (status = 400, description = "Invalid rating or review already exists"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Game not purchased"),
        (status = 404, description = "Game not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Social",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn create_review(
    State(app_state): State<AppState>,
    AuthenticatedUser { user_id, .. }: AuthenticatedUser,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<CreateReviewResponse>), (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let review = app_state
        .social_state
        .review_service
        .create_review(
            user_id,
            request.game_id,
            request.rating,
            request.comment.as_deref(),
        )
        .await
        .map_err(|e: SocialError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse {
            review,
            message: "Review created successfully".to_string(),
        }),
    ))
}

/// 내가 쓴 리뷰 목록 핸들러
/// List own reviews handler
///
/// # Authentication
/// JWT 토큰 필요 (Bearer token)
///
/// # Response
/// - 200: 내가 쓴 리뷰 목록 (최신순, 게임 제목 포함)
/// - 401: 인증 실패
#[utoipa::path(
    get,
    path = "/api/customer/reviews",
    responses(
        (status = 200, description = "Reviews retrieved successfully", body = MyReviewsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Social",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn list_my_reviews(
    State(app_state): State<AppState>,
    AuthenticatedUser { user_id, .. }: AuthenticatedUser,
) -> Result<Json<MyReviewsResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let reviews = app_state
        .social_state
        .review_service
        .my_reviews(user_id)
        .await
        .map_err(|e: SocialError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(MyReviewsResponse { reviews }))
}

/// 게임별 리뷰 목록 핸들러 (공개)
/// List game reviews handler (public)
///
/// # Path Parameters
/// - game_id: 조회할 게임 ID
///
/// # Response
/// - 200: 리뷰 목록과 평균 평점
/// - 404: 게임을 찾을 수 없음
#[utoipa::path(
    get,
    path = "/api/games/{game_id}/reviews",
    params(
        ("game_id" = u64, Path, description = "Game ID whose reviews to list")
    ),
    responses(
        (status = 200, description = "Reviews retrieved successfully", body = GameReviewsResponse),
        (status = 404, description = "Game not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Social"
)]
pub async fn list_game_reviews(
    State(app_state): State<AppState>,
    Path(game_id): Path<u64>,
) -> Result<Json<GameReviewsResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let (reviews, average_rating) = app_state
        .social_state
        .review_service
        .game_reviews(game_id)
        .await
        .map_err(|e: SocialError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(GameReviewsResponse {
        reviews,
        average_rating,
    }))
}
