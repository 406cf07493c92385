// =====================================================
// 카탈로그 통합 테스트
// =====================================================
// 게임 등록/수정 검증, 목록 정렬/검색/필터, 추천을 검증합니다.
// =====================================================

mod common;
use common::*;

use std::sync::Arc;

use async_trait::async_trait;
use game_store::domains::catalog::models::game::{CreateGameRequest, GameSort, UpdateGameRequest};
use game_store::domains::catalog::services::RecommendationService;
use game_store::shared::clients::Recommender;
use game_store::shared::errors::CatalogError;
use game_store::shared::services::AppState;

/// 다운로드 수 시드 (정렬/추천 테스트용)
async fn set_downloads(app: &AppState, game_id: u64, downloads: i64) {
    sqlx::query("UPDATE games SET downloads = ? WHERE id = ?")
        .bind(downloads)
        .bind(game_id as i64)
        .execute(app.db.pool())
        .await
        .expect("Failed to seed downloads");
}

/// 고정된 ID 목록을 돌려주는 추천 스텁
struct FixedRecommender(Vec<u64>);

#[async_trait]
impl Recommender for FixedRecommender {
    async fn recommend(&self, _user_id: u64, _owned: &[u64], _limit: usize) -> anyhow::Result<Vec<u64>> {
        Ok(self.0.clone())
    }
}

/// 항상 실패하는 추천 스텁
struct FailingRecommender;

#[async_trait]
impl Recommender for FailingRecommender {
    async fn recommend(&self, _user_id: u64, _owned: &[u64], _limit: usize) -> anyhow::Result<Vec<u64>> {
        anyhow::bail!("script exploded")
    }
}

/// 테스트: 게임 등록 유효성 검증
#[tokio::test]
async fn test_create_game_validation() {
    let app = setup_test().await;

    // 공백 제목
    for title in ["", "   "] {
        let result = app
            .catalog_state
            .game_service
            .create_game(CreateGameRequest {
                title: title.to_string(),
                developer: None,
                genre: None,
                description: None,
                price: 10_000,
            })
            .await;
        assert!(
            matches!(result, Err(CatalogError::InvalidTitle)),
            "Blank title {:?} must be rejected",
            title
        );
    }

    // 음수 가격
    let result = app
        .catalog_state
        .game_service
        .create_game(CreateGameRequest {
            title: "Stellar Frontier".to_string(),
            developer: None,
            genre: None,
            description: None,
            price: -1,
        })
        .await;
    assert!(matches!(result, Err(CatalogError::InvalidPrice { price: -1 })));

    // 목록에 아무것도 남지 않음
    let games = app
        .catalog_state
        .game_service
        .list_games(None, None, GameSort::Popular, None, None)
        .await
        .expect("Listing should succeed");
    assert!(games.is_empty());
}

/// 테스트: 제목 앞뒤 공백은 잘라서 저장
#[tokio::test]
async fn test_create_game_trims_title() {
    let app = setup_test().await;

    let game = app
        .catalog_state
        .game_service
        .create_game(CreateGameRequest {
            title: "  Stellar Frontier  ".to_string(),
            developer: Some("Nova Interactive".to_string()),
            genre: Some("RPG".to_string()),
            description: None,
            price: 64_000,
        })
        .await
        .expect("Creation should succeed");

    assert_eq!(game.title, "Stellar Frontier");
    assert_eq!(game.downloads, 0, "New games start with zero downloads");

    let stored = fetch_game(&app, game.id).await;
    assert_eq!(stored.title, "Stellar Frontier");
}

/// 테스트: 존재하지 않는 게임 조회
#[tokio::test]
async fn test_get_unknown_game() {
    let app = setup_test().await;

    let result = app.catalog_state.game_service.get_game(999).await;
    assert!(matches!(result, Err(CatalogError::GameNotFound { id: 999 })));

    let detail = app.catalog_state.game_service.get_game_detail(999).await;
    assert!(matches!(detail, Err(CatalogError::GameNotFound { id: 999 })));
}

/// 테스트: 게임 상세는 리뷰 통계를 함께 반환
#[tokio::test]
async fn test_game_detail_includes_review_stats() {
    let app = setup_test().await;

    let game = create_game(&app, "Stellar Frontier", 64_000).await;

    // 리뷰가 없으면 평균은 None, 리뷰 수 0
    let detail = app
        .catalog_state
        .game_service
        .get_game_detail(game.id)
        .await
        .expect("Detail should succeed");
    assert_eq!(detail.game.id, game.id);
    assert!(detail.average_rating.is_none());
    assert_eq!(detail.review_count, 0);

    // 구매자 두 명이 리뷰를 남기면 통계에 반영됨
    for (email, rating) in [("alice@example.com", 5), ("bob@example.com", 4)] {
        let user = create_user_with_balance(&app, email, 100_000).await;
        app.store_state
            .purchase_service
            .purchase(user.id, game.id)
            .await
            .expect("Purchase should succeed");
        app.social_state
            .review_service
            .create_review(user.id, game.id, rating, None)
            .await
            .expect("Review should succeed");
    }

    let detail = app
        .catalog_state
        .game_service
        .get_game_detail(game.id)
        .await
        .expect("Detail should succeed");
    assert_eq!(detail.average_rating, Some(4.5));
    assert_eq!(detail.review_count, 2);

    println!("✅ Game detail carries review stats");
}

/// 테스트: 부분 수정은 전달된 필드만 바꿈
#[tokio::test]
async fn test_update_game_partial() {
    let app = setup_test().await;

    let game = create_game(&app, "Stellar Frontier", 64_000).await;

    let updated = app
        .catalog_state
        .game_service
        .update_game(
            game.id,
            UpdateGameRequest {
                title: None,
                developer: None,
                genre: None,
                description: Some("대규모 우주 RPG".to_string()),
                price: Some(48_000),
            },
        )
        .await
        .expect("Update should succeed");

    assert_eq!(updated.price, 48_000);
    assert_eq!(updated.description.as_deref(), Some("대규모 우주 RPG"));
    assert_eq!(updated.title, "Stellar Frontier", "Untouched fields keep their values");
    assert_eq!(updated.developer.as_deref(), Some("Test Studio"));

    println!("✅ Partial update changed price and description only");
}

/// 테스트: 수정 시에도 유효성 검증 적용
#[tokio::test]
async fn test_update_game_validation() {
    let app = setup_test().await;

    let game = create_game(&app, "Stellar Frontier", 64_000).await;

    let blank_title = app
        .catalog_state
        .game_service
        .update_game(
            game.id,
            UpdateGameRequest {
                title: Some("   ".to_string()),
                developer: None,
                genre: None,
                description: None,
                price: None,
            },
        )
        .await;
    assert!(matches!(blank_title, Err(CatalogError::InvalidTitle)));

    let negative_price = app
        .catalog_state
        .game_service
        .update_game(
            game.id,
            UpdateGameRequest {
                title: None,
                developer: None,
                genre: None,
                description: None,
                price: Some(-500),
            },
        )
        .await;
    assert!(matches!(
        negative_price,
        Err(CatalogError::InvalidPrice { price: -500 })
    ));

    // 실패한 수정은 아무것도 바꾸지 않음
    let stored = fetch_game(&app, game.id).await;
    assert_eq!(stored.title, "Stellar Frontier");
    assert_eq!(stored.price, 64_000);
}

/// 테스트: 존재하지 않는 게임 수정
#[tokio::test]
async fn test_update_unknown_game() {
    let app = setup_test().await;

    let result = app
        .catalog_state
        .game_service
        .update_game(
            999,
            UpdateGameRequest {
                title: None,
                developer: None,
                genre: None,
                description: None,
                price: Some(1_000),
            },
        )
        .await;
    assert!(matches!(result, Err(CatalogError::GameNotFound { id: 999 })));
}

/// 테스트: 목록 정렬 (인기순 기본, 가격 양방향, 최신순)
#[tokio::test]
async fn test_list_games_sorting() {
    let app = setup_test().await;

    let game_a = create_game(&app, "Game A", 10_000).await;
    let game_b = create_game(&app, "Game B", 30_000).await;
    let game_c = create_game(&app, "Game C", 20_000).await;

    set_downloads(&app, game_a.id, 3).await;
    set_downloads(&app, game_c.id, 7).await;

    // 인기순: 다운로드 많은 순
    let popular = app
        .catalog_state
        .game_service
        .list_games(None, None, GameSort::Popular, None, None)
        .await
        .expect("Listing should succeed");
    let ids: Vec<u64> = popular.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![game_c.id, game_a.id, game_b.id]);

    // 가격 낮은 순
    let cheap_first = app
        .catalog_state
        .game_service
        .list_games(None, None, GameSort::PriceAsc, None, None)
        .await
        .expect("Listing should succeed");
    let ids: Vec<u64> = cheap_first.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![game_a.id, game_c.id, game_b.id]);

    // 가격 높은 순
    let expensive_first = app
        .catalog_state
        .game_service
        .list_games(None, None, GameSort::PriceDesc, None, None)
        .await
        .expect("Listing should succeed");
    let ids: Vec<u64> = expensive_first.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![game_b.id, game_c.id, game_a.id]);

    // 최신 등록 순
    let newest = app
        .catalog_state
        .game_service
        .list_games(None, None, GameSort::Newest, None, None)
        .await
        .expect("Listing should succeed");
    let ids: Vec<u64> = newest.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![game_c.id, game_b.id, game_a.id]);

    println!("✅ All four sort orders verified");
}

/// 테스트: 검색은 제목과 개발사를 부분 일치로 탐색
#[tokio::test]
async fn test_list_games_search() {
    let app = setup_test().await;

    for (title, developer) in [
        ("Stellar Frontier", "Nova Interactive"),
        ("Dungeon Crawl", "Nova Interactive"),
        ("Racing Pro", "Speed Studios"),
    ] {
        app.catalog_state
            .game_service
            .create_game(CreateGameRequest {
                title: title.to_string(),
                developer: Some(developer.to_string()),
                genre: Some("RPG".to_string()),
                description: None,
                price: 10_000,
            })
            .await
            .expect("Creation should succeed");
    }

    // 개발사명으로 검색
    let by_developer = app
        .catalog_state
        .game_service
        .list_games(Some("Nova"), None, GameSort::Popular, None, None)
        .await
        .expect("Listing should succeed");
    assert_eq!(by_developer.len(), 2);

    // 제목 일부로 검색
    let by_title = app
        .catalog_state
        .game_service
        .list_games(Some("Stellar"), None, GameSort::Popular, None, None)
        .await
        .expect("Listing should succeed");
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "Stellar Frontier");

    // 일치 없음
    let none = app
        .catalog_state
        .game_service
        .list_games(Some("zzz"), None, GameSort::Popular, None, None)
        .await
        .expect("Listing should succeed");
    assert!(none.is_empty());
}

/// 테스트: 장르 필터는 정확히 일치하는 게임만
#[tokio::test]
async fn test_list_games_genre_filter() {
    let app = setup_test().await;

    for (title, genre) in [("Game A", "RPG"), ("Game B", "FPS"), ("Game C", "RPG")] {
        app.catalog_state
            .game_service
            .create_game(CreateGameRequest {
                title: title.to_string(),
                developer: None,
                genre: Some(genre.to_string()),
                description: None,
                price: 10_000,
            })
            .await
            .expect("Creation should succeed");
    }

    let rpg = app
        .catalog_state
        .game_service
        .list_games(None, Some("RPG"), GameSort::Popular, None, None)
        .await
        .expect("Listing should succeed");
    assert_eq!(rpg.len(), 2);
    assert!(rpg.iter().all(|g| g.genre.as_deref() == Some("RPG")));

    // 검색어와 장르 필터 동시 적용
    let combined = app
        .catalog_state
        .game_service
        .list_games(Some("Game A"), Some("RPG"), GameSort::Popular, None, None)
        .await
        .expect("Listing should succeed");
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].title, "Game A");
}

/// 테스트: 목록 페이지네이션 (limit/offset, 범위 밖 값 보정)
#[tokio::test]
async fn test_list_games_pagination() {
    let app = setup_test().await;

    for i in 1..=5 {
        create_game(&app, &format!("Game {}", i), 10_000 * i).await;
    }

    // 가격 오름차순으로 2개씩 끊어서 조회
    let first_page = app
        .catalog_state
        .game_service
        .list_games(None, None, GameSort::PriceAsc, Some(2), None)
        .await
        .expect("Listing should succeed");
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].title, "Game 1");
    assert_eq!(first_page[1].title, "Game 2");

    let second_page = app
        .catalog_state
        .game_service
        .list_games(None, None, GameSort::PriceAsc, Some(2), Some(2))
        .await
        .expect("Listing should succeed");
    assert_eq!(second_page.len(), 2);
    assert_eq!(second_page[0].title, "Game 3");
    assert_eq!(second_page[1].title, "Game 4");

    // 범위 밖 offset은 빈 목록
    let past_end = app
        .catalog_state
        .game_service
        .list_games(None, None, GameSort::PriceAsc, Some(2), Some(10))
        .await
        .expect("Listing should succeed");
    assert!(past_end.is_empty());

    // limit 0과 음수 offset은 최소값으로 보정됨
    let clamped = app
        .catalog_state
        .game_service
        .list_games(None, None, GameSort::PriceAsc, Some(0), Some(-5))
        .await
        .expect("Listing should succeed");
    assert_eq!(clamped.len(), 1);
    assert_eq!(clamped[0].title, "Game 1");

    println!("✅ Catalog pagination verified");
}

/// 테스트: 추천 스크립트가 없으면 인기순 폴백 (보유작 제외)
#[tokio::test]
async fn test_recommendations_popular_fallback() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "player@example.com", 100_000).await;
    let game_a = create_game(&app, "Game A", 10_000).await;
    let game_b = create_game(&app, "Game B", 10_000).await;
    let game_c = create_game(&app, "Game C", 10_000).await;

    set_downloads(&app, game_c.id, 9).await;
    set_downloads(&app, game_a.id, 1).await;

    // B는 보유작이 되어 추천에서 제외됨
    app.store_state
        .purchase_service
        .purchase(user.id, game_b.id)
        .await
        .expect("Purchase should succeed");

    let (games, source) = app
        .catalog_state
        .recommendation_service
        .recommend(user.id)
        .await
        .expect("Recommendation should succeed");

    assert_eq!(source, "popular");
    let ids: Vec<u64> = games.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![game_c.id, game_a.id], "Owned games are excluded, rest by downloads");

    println!("✅ Fallback recommendations: {:?}", ids);
}

/// 테스트: 스크립트 추천은 출력 순서를 지키고 보유작/미지 ID를 거름
#[tokio::test]
async fn test_recommendations_script_order_and_filtering() {
    let app = setup_test().await;

    let user = create_user_with_balance(&app, "player@example.com", 100_000).await;
    let game_a = create_game(&app, "Game A", 10_000).await;
    let game_b = create_game(&app, "Game B", 10_000).await;
    let game_c = create_game(&app, "Game C", 10_000).await;

    app.store_state
        .purchase_service
        .purchase(user.id, game_b.id)
        .await
        .expect("Purchase should succeed");

    // 스크립트가 [C, B(보유), 999(없음), A] 순서로 추천했다고 가정
    let service = RecommendationService::new(
        app.db.clone(),
        Some(Arc::new(FixedRecommender(vec![
            game_c.id, game_b.id, 999, game_a.id,
        ]))),
    );

    let (games, source) = service
        .recommend(user.id)
        .await
        .expect("Recommendation should succeed");

    assert_eq!(source, "script");
    let ids: Vec<u64> = games.iter().map(|g| g.id).collect();
    assert_eq!(
        ids,
        vec![game_c.id, game_a.id],
        "Script order preserved; owned and unknown IDs dropped"
    );
}

/// 테스트: 스크립트 실패는 요청을 실패시키지 않고 폴백으로 이어짐
#[tokio::test]
async fn test_recommendations_script_failure_falls_back() {
    let app = setup_test().await;

    let user = create_user(&app, "player@example.com").await;
    let game = create_game(&app, "Game A", 10_000).await;

    let service = RecommendationService::new(app.db.clone(), Some(Arc::new(FailingRecommender)));

    let (games, source) = service
        .recommend(user.id)
        .await
        .expect("Recommendation must survive script failures");

    assert_eq!(source, "popular");
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].id, game.id);
}

/// 테스트: 스크립트가 빈 목록을 주면 폴백 사용
#[tokio::test]
async fn test_recommendations_script_empty_falls_back() {
    let app = setup_test().await;

    let user = create_user(&app, "player@example.com").await;
    create_game(&app, "Game A", 10_000).await;

    let service = RecommendationService::new(
        app.db.clone(),
        Some(Arc::new(FixedRecommender(Vec::new()))),
    );

    let (games, source) = service
        .recommend(user.id)
        .await
        .expect("Recommendation should succeed");

    assert_eq!(source, "popular");
    assert_eq!(games.len(), 1);
}
