//! # 카드 관리
//!
//! 카드 생성, 부분 수정(sparse patch), 삭제를 담당합니다.
//!
//! ## 삭제 정책
//! 다른 카드가 `merged_into`로 가리키는 카드를 지우면, 같은 트랜잭션 안에서
//! 그 카드들의 `merged_into`를 NULL로 되돌립니다. 흡수되어 있던 카드는 다시 활성 카드가 됩니다.

use sqlx::SqlitePool;

use super::validation::{require_text, MAX_AUTHOR_CHARS, MAX_CARD_TEXT_CHARS};
use super::{new_id, now_timestamp};
use crate::db;
use crate::error::AppError;
use crate::models::{Card, CardDetail, ColumnType, CreateCardRequest, UpdateCardRequest};

/// 세션에 새 카드를 추가합니다.
///
/// 검증을 먼저 하므로 잘못된 요청은 저장소에 닿지 않습니다.
/// 그 다음 세션 존재 확인과 삽입을 한 트랜잭션으로 실행합니다.
pub async fn create_card(
    pool: &SqlitePool,
    session_id: &str,
    req: &CreateCardRequest,
) -> Result<Card, AppError> {
    let author = require_text("author", &req.author, MAX_AUTHOR_CHARS)?;
    let column_type: ColumnType = req.column_type.parse()?;
    let text = require_text("text", &req.text, MAX_CARD_TEXT_CHARS)?;

    let now = now_timestamp();
    let card = Card {
        card_id: new_id(),
        session_id: session_id.to_string(),
        author: author.to_string(),
        column_type,
        text: text.to_string(),
        position: 0,
        merged_into: None,
        created_at: now.clone(),
        updated_at: now,
    };

    let mut tx = db::begin_write(pool).await?;
    db::get_session(&mut *tx, session_id)
        .await?
        .ok_or(AppError::NotFound("Session"))?;
    db::insert_card(&mut *tx, &card).await?;
    tx.commit().await?;

    tracing::info!(card_id = %card.card_id, session_id, column = %card.column_type, "card created");
    Ok(card)
}

/// 카드의 text, position, column_type 중 요청에 있는 필드만 바꿉니다.
///
/// 빈 요청도 `updated_at`은 갱신합니다.
/// 반환값에는 카드의 현재 코멘트 목록이 함께 담깁니다.
pub async fn update_card(
    pool: &SqlitePool,
    card_id: &str,
    patch: &UpdateCardRequest,
) -> Result<CardDetail, AppError> {
    let text = patch
        .text
        .as_deref()
        .map(|text| require_text("text", text, MAX_CARD_TEXT_CHARS))
        .transpose()?;
    let column_type = patch
        .column_type
        .as_deref()
        .map(str::parse::<ColumnType>)
        .transpose()?;

    let mut tx = db::begin_write(pool).await?;
    let mut card = db::get_card(&mut *tx, card_id)
        .await?
        .ok_or(AppError::NotFound("Card"))?;

    if let Some(text) = text {
        card.text = text.to_string();
    }
    if let Some(position) = patch.position {
        card.position = position;
    }
    if let Some(column_type) = column_type {
        card.column_type = column_type;
    }
    card.updated_at = now_timestamp();

    db::save_card_fields(&mut *tx, &card).await?;
    let comments = db::list_comments_for_card(&mut *tx, card_id).await?;
    tx.commit().await?;

    tracing::info!(card_id, "card updated");
    Ok(CardDetail { card, comments })
}

/// 카드와 그 코멘트를 삭제합니다.
///
/// 이 카드에 흡수되어 있던 카드들의 `merged_into`는 NULL로 되돌립니다.
pub async fn delete_card(pool: &SqlitePool, card_id: &str) -> Result<(), AppError> {
    let mut tx = db::begin_write(pool).await?;

    db::get_card(&mut *tx, card_id)
        .await?
        .ok_or(AppError::NotFound("Card"))?;
    let released = db::clear_merged_into(&mut *tx, card_id, &now_timestamp()).await?;
    db::delete_card(&mut *tx, card_id).await?;

    tx.commit().await?;

    tracing::info!(card_id, released, "card deleted");
    Ok(())
}
