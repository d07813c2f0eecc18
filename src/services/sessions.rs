//! # 세션 관리
//!
//! 세션 생성, 상세 조회(카드 + 코멘트 중첩), 삭제를 담당합니다.

use std::collections::HashMap;

use sqlx::SqlitePool;

use super::validation::{require_text, MAX_SESSION_NAME_CHARS};
use super::{new_id, now_timestamp};
use crate::db;
use crate::error::AppError;
use crate::models::{CardDetail, Comment, Session, SessionDetail};

/// 새 세션을 만듭니다.
///
/// 이름이 비었거나 100자를 넘으면 `AppError::Validation`을 반환하고 아무것도 저장하지 않습니다.
pub async fn create_session(pool: &SqlitePool, name: &str) -> Result<Session, AppError> {
    let name = require_text("name", name, MAX_SESSION_NAME_CHARS)?;

    let session = Session {
        session_id: new_id(),
        name: name.to_string(),
        created_at: now_timestamp(),
    };
    db::insert_session(pool, &session).await?;

    tracing::info!(session_id = %session.session_id, "session created");
    Ok(session)
}

/// 세션과 그 안의 모든 카드, 각 카드의 코멘트를 조회합니다.
///
/// 세 번의 읽기를 하나의 트랜잭션에서 실행해 같은 시점의 스냅샷을 봅니다.
/// 흡수된 카드(`merged_into`가 있는 카드)도 그대로 포함합니다. 숨길지는 호출하는 쪽이 정합니다.
pub async fn get_session(pool: &SqlitePool, session_id: &str) -> Result<SessionDetail, AppError> {
    let mut tx = pool.begin().await?;

    let session = db::get_session(&mut *tx, session_id)
        .await?
        .ok_or(AppError::NotFound("Session"))?;
    let cards = db::list_cards_for_session(&mut *tx, session_id).await?;
    let comments = db::list_comments_for_session(&mut *tx, session_id).await?;

    tx.commit().await?;

    // 코멘트를 card_id별로 묶습니다. 작성 순서는 쿼리의 ORDER BY가 보장합니다.
    let mut by_card: HashMap<String, Vec<Comment>> = HashMap::new();
    for comment in comments {
        by_card.entry(comment.card_id.clone()).or_default().push(comment);
    }

    let cards = cards
        .into_iter()
        .map(|card| {
            let comments = by_card.remove(&card.card_id).unwrap_or_default();
            CardDetail { card, comments }
        })
        .collect();

    Ok(SessionDetail { session, cards })
}

/// 세션을 삭제합니다. 카드와 코멘트는 CASCADE로 함께 삭제됩니다.
pub async fn delete_session(pool: &SqlitePool, session_id: &str) -> Result<(), AppError> {
    if !db::delete_session(pool, session_id).await? {
        return Err(AppError::NotFound("Session"));
    }

    tracing::info!(session_id, "session deleted");
    Ok(())
}
