use crate::domains::catalog::models::game::{
    CreateGameRequest, GameDetailResponse, GameListQuery, GameListResponse, GameMutationResponse,
    GameSort, RecommendationResponse, UpdateGameRequest,
};
use crate::shared::errors::CatalogError;
use crate::shared::middleware::auth::{AdminUser, AuthenticatedUser};
use crate::shared::services::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

// =====================================================
// Game Handler
// =====================================================
// 역할: 게임 카탈로그 HTTP API 엔드포인트
//
// 처리 흐름:
// HTTP Request → Handler → Service → Repository → Response
// =====================================================

/// 게임 목록 조회 핸들러
/// List games handler
///
/// 판매 중인 게임 목록을 조회합니다. 누구나 접근 가능.
///
/// # Query Parameters
/// - search: 제목/개발사 부분 일치 검색어 (optional)
/// - genre: 장르 필터 (optional)
/// - sort: popular(기본) | price_asc | price_desc | newest(=recent)
/// - limit / offset: 페이지네이션 (기본 50, 최대 100)
///
/// # Response
/// - 200: 게임 목록 조회 성공
/// - 500: 서버 오류
#[utoipa::path(
    get,
    path = "/api/games",
    params(
        GameListQuery
    ),
    responses(
        (status = 200, description = "Games retrieved successfully", body = GameListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Games"
)]
pub async fn list_games(
    State(app_state): State<AppState>,
    Query(query): Query<GameListQuery>,
) -> Result<Json<GameListResponse>, (StatusCode, Json<serde_json::Value>)> {
    let sort = GameSort::from_query(query.sort.as_deref());

    // Service 호출
    let games = app_state
        .catalog_state
        .game_service
        .list_games(
            query.search.as_deref(),
            query.genre.as_deref(),
            sort,
            query.limit,
            query.offset,
        )
        .await
        .map_err(|e: CatalogError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(GameListResponse { games }))
}

/// 게임 상세 조회 핸들러
/// Get game detail handler
///
/// 게임 정보와 리뷰 통계(평균 평점, 리뷰 수)를 함께 반환합니다.
///
/// # Path Parameters
/// - game_id: 조회할 게임 ID
///
/// # Response
/// - 200: 게임 조회 성공
/// - 404: 게임을 찾을 수 없음
#[utoipa::path(
    get,
    path = "/api/games/{game_id}",
    params(
        ("game_id" = u64, Path, description = "Game ID to retrieve")
    ),
    responses(
        (status = 200, description = "Game retrieved successfully", body = GameDetailResponse),
        (status = 404, description = "Game not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Games"
)]
pub async fn get_game(
    State(app_state): State<AppState>,
    Path(game_id): Path<u64>,
) -> Result<Json<GameDetailResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let detail = app_state
        .catalog_state
        .game_service
        .get_game_detail(game_id)
        .await
        .map_err(|e: CatalogError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(detail))
}

/// 맞춤 추천 핸들러
/// Personalized recommendations handler
///
/// 보유하지 않은 게임 중에서 추천 목록을 반환합니다.
/// 추천 스크립트가 설정되지 않았거나 실패하면 인기순으로 대체합니다.
///
/// # Authentication
/// JWT 토큰 필요 (Bearer token)
///
/// # Response
/// - 200: 추천 목록 조회 성공 (source: "script" | "popular")
/// - 401: 인증 실패
/// - 500: 서버 오류
#[utoipa::path(
    get,
    path = "/api/customer/recommendations",
    responses(
        (status = 200, description = "Recommendations retrieved successfully", body = RecommendationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Games",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn recommendations(
    State(app_state): State<AppState>,
    AuthenticatedUser { user_id, .. }: AuthenticatedUser,
) -> Result<Json<RecommendationResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let (games, source) = app_state
        .catalog_state
        .recommendation_service
        .recommend(user_id)
        .await
        .map_err(|e: CatalogError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(RecommendationResponse {
        games,
        source: source.to_string(),
    }))
}

/// 게임 등록 핸들러 (관리자 전용)
/// Create game handler (admin only)
///
/// # Authentication
/// JWT 토큰 필요 (ADMIN 권한)
///
/// # Request Body
/// - title: 게임 제목 (공백 불가)
/// - price: 판매가 (0 이상)
/// - developer, genre, description: 선택 필드
///
/// # Response
/// - 201: 게임 등록 성공
/// - 400: 유효성 검증 실패
/// - 401: 인증 실패
/// - 403: 관리자 권한 없음
#[utoipa::path(
    post,
    path = "/api/admin/games",
    request_body = CreateGameRequest,
    responses(
        (status = 201, description = "Game created successfully", body = GameMutationResponse),
        (status = 400, description = "Invalid title or price"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn create_game(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Json(request): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameMutationResponse>), (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let game = app_state
        .catalog_state
        .game_service
        .create_game(request)
        .await
        .map_err(|e: CatalogError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok((
        StatusCode::CREATED,
        Json(GameMutationResponse {
            game,
            message: "Game created successfully".to_string(),
        }),
    ))
}

/// 게임 수정 핸들러 (관리자 전용)
/// Update game handler (admin only)
///
/// 전달된 필드만 수정합니다 (부분 수정).
///
/// # Authentication
/// JWT 토큰 필요 (ADMIN 권한)
///
/// # Path Parameters
/// - game_id: 수정할 게임 ID
///
/// # Response
/// - 200: 게임 수정 성공
/// - 400: 유효성 검증 실패
/// - 403: 관리자 권한 없음
/// - 404: 게임을 찾을 수 없음
#[utoipa::path(
    put,
    path = "/api/admin/games/{game_id}",
    params(
        ("game_id" = u64, Path, description = "Game ID to update")
    ),
    request_body = UpdateGameRequest,
    responses(
        (status = 200, description = "Game updated successfully", body = GameMutationResponse),
        (status = 400, description = "Invalid title or price"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Game not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Admin",
    security(
        ("BearerAuth" = [])
    )
)]
pub async fn update_game(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(game_id): Path<u64>,
    Json(request): Json<UpdateGameRequest>,
) -> Result<Json<GameMutationResponse>, (StatusCode, Json<serde_json::Value>)> {
    // Service 호출
    let game = app_state
        .catalog_state
        .game_service
        .update_game(game_id, request)
        .await
        .map_err(|e: CatalogError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(GameMutationResponse {
        game,
        message: "Game updated successfully".to_string(),
    }))
}
