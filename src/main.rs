use axum::Router;
use axum::http::Method;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// New module structure
mod domains;
mod shared;
mod routes;

use routes::create_router;
use crate::shared::database::Database;
use crate::shared::services::AppState;

// Import models for OpenAPI schema
use crate::domains::auth::models::*;
use crate::domains::catalog::models::game::*;
use crate::domains::social::models::review::*;
use crate::domains::social::models::wishlist::*;
use crate::domains::store::models::purchase::*;
use crate::domains::store::models::transaction::*;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::domains::auth::handlers::auth_handler::signup,
        crate::domains::auth::handlers::auth_handler::signin,
        crate::domains::auth::handlers::auth_handler::refresh,
        crate::domains::auth::handlers::auth_handler::logout,
        crate::domains::auth::handlers::auth_handler::get_me,
        crate::domains::auth::handlers::auth_handler::list_users,
        crate::domains::catalog::handlers::game_handler::list_games,
        crate::domains::catalog::handlers::game_handler::get_game,
        crate::domains::catalog::handlers::game_handler::recommendations,
        crate::domains::catalog::handlers::game_handler::create_game,
        crate::domains::catalog::handlers::game_handler::update_game,
        crate::domains::social::handlers::review_handler::create_review,
        crate::domains::social::handlers::review_handler::list_my_reviews,
        crate::domains::social::handlers::review_handler::list_game_reviews,
        crate::domains::social::handlers::wishlist_handler::add_to_wishlist,
        crate::domains::social::handlers::wishlist_handler::remove_from_wishlist,
        crate::domains::social::handlers::wishlist_handler::list_wishlist,
        crate::domains::store::handlers::purchase_handler::purchase_game,
        crate::domains::store::handlers::purchase_handler::get_library,
        crate::domains::store::handlers::purchase_handler::refund_purchase,
        crate::domains::store::handlers::transaction_handler::transaction_history,
        crate::domains::store::handlers::transaction_handler::adjust_balance,
        crate::domains::store::handlers::deposit_handler::request_deposit,
        crate::domains::store::handlers::deposit_handler::my_pending_deposits,
        crate::domains::store::handlers::deposit_handler::deposit_queue,
        crate::domains::store::handlers::deposit_handler::approve_deposit,
        crate::domains::store::handlers::deposit_handler::reject_deposit
    ),
    components(schemas(
        SignupRequest,
        SignupResponse,
        SigninRequest,
        SigninResponse,
        RefreshTokenRequest,
        RefreshTokenResponse,
        LogoutRequest,
        UserResponse,
        UserListResponse,
        Role,
        Game,
        CreateGameRequest,
        UpdateGameRequest,
        GameListResponse,
        GameDetailResponse,
        GameMutationResponse,
        RecommendationResponse,
        Review,
        CreateReviewRequest,
        CreateReviewResponse,
        GameReviewItem,
        GameReviewsResponse,
        MyReviewItem,
        MyReviewsResponse,
        WishlistItem,
        AddWishlistRequest,
        AddWishlistResponse,
        WishlistEntry,
        WishlistResponse,
        RemoveWishlistResponse,
        Purchase,
        PurchaseRequest,
        PurchaseResponse,
        LibraryItem,
        LibraryResponse,
        RefundResponse,
        BalanceTransaction,
        TransactionStatus,
        TransactionType,
        DepositRequest,
        DepositRequestResponse,
        RejectDepositRequest,
        ReviewDepositResponse,
        TransactionStats,
        TransactionHistoryResponse,
        PendingDepositsResponse,
        PendingDepositQueueItem,
        DepositQueueResponse,
        BalanceAdjustmentRequest,
        BalanceAdjustmentResponse
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Auth", description = "Authentication API endpoints"),
        (name = "Games", description = "Game catalog and recommendation endpoints"),
        (name = "Store", description = "Purchase, library and balance endpoints"),
        (name = "Social", description = "Review and wishlist endpoints"),
        (name = "Admin", description = "Back office endpoints (ADMIN role required)")
    ),
    info(
        title = "Game Store API Server",
        description = "API server for the game storefront (catalog, balance ledger, purchases)",
        version = "1.0.0"
    )
)]
struct ApiDoc;

// Security scheme 정의: Swagger UI에서 "Authorize" 버튼 추가
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() {
    // .env 로딩 + 로깅 초기화
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // DB 연결
    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:game_store.db?mode=rwc".to_string());
    let db = Database::new(&db_url)
        .await
        .expect("Failed to connect to database");

    db.initialize()
        .await
        .expect("Failed to initialize database");

    // AppState 생성 (모든 Service 초기화)
    let app_state = AppState::new(db)
        .expect("Failed to initialize AppState");

    // 만료된 Refresh Token 정리
    match app_state.auth_state.auth_service.cleanup_expired_tokens().await {
        Ok(deleted) if deleted > 0 => {
            tracing::info!(deleted, "expired refresh tokens removed");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("failed to clean up refresh tokens: {}", e),
    }

    // 관리자 계정 시드 (ADMIN_EMAIL/ADMIN_PASSWORD 설정 시)
    if let (Ok(email), Ok(password)) = (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        match app_state.auth_state.auth_service.ensure_admin(&email, &password).await {
            Ok(Some(user)) => tracing::info!(user_id = user.id, %email, "admin account created"),
            Ok(None) => tracing::info!(%email, "admin account already exists"),
            Err(e) => tracing::error!("failed to seed admin account: {}", e),
        }
    }

    // CORS 설정
    use axum::http::HeaderValue;
    let frontend_origin =
        std::env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:3003".to_string());
    let cors = CorsLayer::new()
        .allow_origin(
            frontend_origin
                .parse::<HeaderValue>()
                .expect("Invalid FRONTEND_ORIGIN"),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    // Router 생성
    let app = Router::new()
        .merge(create_router())
        .merge(
            SwaggerUi::new("/docs")
                .url("/api-docs/openapi.json", ApiDoc::openapi())
        )
        .layer(cors)
        .with_state(app_state);

    // 서버 시작
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3002".to_string());
    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("Server running on http://{}", bind_addr);
    tracing::info!("Swagger UI available at http://{}/docs", bind_addr);
    tracing::info!("Database: {}", db_url);

    // 서버 실행
    axum::serve(listener, app)
        .await
        .expect("Server error");
}
