//! 파일 DB + 여러 연결에서 동시에 쓰기가 들어올 때의 동작 테스트

use openretro::models::{CreateCardRequest, CreateCommentRequest};
use openretro::{db, services, Config};
use sqlx::SqlitePool;
use tokio::task::JoinSet;

async fn file_pool(dir: &tempfile::TempDir) -> SqlitePool {
    let config = Config {
        database_url: format!("sqlite:{}", dir.path().join("board.db").display()),
        max_connections: 5,
        ..Config::default()
    };
    db::connect(&config).await.expect("file database")
}

async fn seed_cards(pool: &SqlitePool, session_id: &str, count: usize) -> Vec<String> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let req = CreateCardRequest {
            author: "alice".to_string(),
            column_type: "good".to_string(),
            text: format!("card {i}"),
        };
        let card = services::create_card(pool, session_id, &req).await.unwrap();
        ids.push(card.card_id);
    }
    ids
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_comments_on_different_cards_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_pool(&dir).await;
    let session = services::create_session(&pool, "Sprint 12").await.unwrap();
    let cards = seed_cards(&pool, &session.session_id, 40).await;

    let mut tasks = JoinSet::new();
    for card_id in cards.clone() {
        let pool = pool.clone();
        tasks.spawn(async move {
            let req = CreateCommentRequest {
                author: "carol".to_string(),
                text: "+1".to_string(),
            };
            services::add_comment(&pool, &card_id, &req).await
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let result = joined.unwrap();
        assert!(result.is_ok(), "add_comment failed: {:?}", result.err());
    }

    let detail = services::get_session(&pool, &session.session_id).await.unwrap();
    assert!(detail.cards.iter().all(|c| c.comments.len() == 1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_merges_of_disjoint_pairs_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_pool(&dir).await;
    let session = services::create_session(&pool, "Sprint 12").await.unwrap();
    let cards = seed_cards(&pool, &session.session_id, 40).await;

    let mut tasks = JoinSet::new();
    for pair in cards.chunks(2) {
        let pool = pool.clone();
        let (target, source) = (pair[0].clone(), pair[1].clone());
        tasks.spawn(async move { services::merge_cards(&pool, &source, &target).await });
    }

    while let Some(joined) = tasks.join_next().await {
        let result = joined.unwrap();
        assert!(result.is_ok(), "merge_cards failed: {:?}", result.err());
    }

    let detail = services::get_session(&pool, &session.session_id).await.unwrap();
    let absorbed = detail
        .cards
        .iter()
        .filter(|c| c.card.merged_into.is_some())
        .count();
    assert_eq!(absorbed, 20);
}
