//! # 카드 데이터베이스 쿼리 모듈
//!
//! `cards` 테이블에 대한 CRUD와 병합 관련 갱신 쿼리입니다.
//! 병합처럼 여러 행을 바꾸는 작업은 서비스 계층이 트랜잭션으로 묶어서 호출합니다.

use crate::error::AppError;
use crate::models::Card;
use sqlx::SqliteExecutor;

pub async fn insert_card(ex: impl SqliteExecutor<'_>, card: &Card) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO cards (card_id, session_id, author, column_type, text, position,
                           merged_into, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&card.card_id)
    .bind(&card.session_id)
    .bind(&card.author)
    .bind(card.column_type)
    .bind(&card.text)
    .bind(card.position)
    .bind(&card.merged_into)
    .bind(&card.created_at)
    .bind(&card.updated_at)
    .execute(ex)
    .await?;

    Ok(())
}

/// ID로 카드 하나를 조회합니다. 없으면 `None`.
pub async fn get_card(ex: impl SqliteExecutor<'_>, card_id: &str) -> Result<Option<Card>, AppError> {
    let card = sqlx::query_as::<_, Card>(
        r#"
        SELECT card_id, session_id, author, column_type, text, position,
               merged_into, created_at, updated_at
        FROM cards
        WHERE card_id = ?
        "#,
    )
    .bind(card_id)
    .fetch_optional(ex)
    .await?;

    Ok(card)
}

/// 세션의 모든 카드를 조회합니다. 흡수된 카드도 포함합니다.
///
/// 정렬: position 오름차순, 같으면 생성(행 삽입) 순서
pub async fn list_cards_for_session(
    ex: impl SqliteExecutor<'_>,
    session_id: &str,
) -> Result<Vec<Card>, AppError> {
    let cards = sqlx::query_as::<_, Card>(
        r#"
        SELECT card_id, session_id, author, column_type, text, position,
               merged_into, created_at, updated_at
        FROM cards
        WHERE session_id = ?
        ORDER BY position ASC, id ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(ex)
    .await?;

    Ok(cards)
}

/// 카드의 수정 가능한 필드(text, position, column_type)와 updated_at을 한 번에 저장합니다.
///
/// 부분 수정 요청은 서비스 계층에서 기존 카드에 먼저 적용된 뒤 이 함수로 넘어옵니다.
/// session_id, author, merged_into는 여기서 바꾸지 않습니다.
pub async fn save_card_fields(ex: impl SqliteExecutor<'_>, card: &Card) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE cards
        SET text = ?, position = ?, column_type = ?, updated_at = ?
        WHERE card_id = ?
        "#,
    )
    .bind(&card.text)
    .bind(card.position)
    .bind(card.column_type)
    .bind(&card.updated_at)
    .bind(&card.card_id)
    .execute(ex)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 병합 대상 카드의 텍스트를 교체합니다.
pub async fn set_card_text(
    ex: impl SqliteExecutor<'_>,
    card_id: &str,
    text: &str,
    updated_at: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE cards SET text = ?, updated_at = ? WHERE card_id = ?")
        .bind(text)
        .bind(updated_at)
        .bind(card_id)
        .execute(ex)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 카드를 `into_card_id`에 흡수된 것으로 표시합니다.
///
/// text, author, column_type은 그대로 두고 merged_into와 updated_at만 바꿉니다.
pub async fn mark_card_merged(
    ex: impl SqliteExecutor<'_>,
    card_id: &str,
    into_card_id: &str,
    updated_at: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE cards SET merged_into = ?, updated_at = ? WHERE card_id = ?")
        .bind(into_card_id)
        .bind(updated_at)
        .bind(card_id)
        .execute(ex)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// `target_card_id`를 가리키는 모든 병합 표시를 지웁니다.
///
/// 대상 카드를 삭제하기 전에 호출해서 `merged_into`가 없는 카드를 가리키지 않게 합니다.
/// 영향받은 카드 수를 반환합니다.
pub async fn clear_merged_into(
    ex: impl SqliteExecutor<'_>,
    target_card_id: &str,
    updated_at: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE cards SET merged_into = NULL, updated_at = ? WHERE merged_into = ?")
        .bind(updated_at)
        .bind(target_card_id)
        .execute(ex)
        .await?;

    Ok(result.rows_affected())
}

/// 카드를 삭제합니다. 코멘트는 `ON DELETE CASCADE`로 함께 삭제됩니다.
///
/// ## 반환값
/// - `true`: 삭제 성공
/// - `false`: 해당 ID의 카드가 없음
pub async fn delete_card(ex: impl SqliteExecutor<'_>, card_id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM cards WHERE card_id = ?")
        .bind(card_id)
        .execute(ex)
        .await?;

    Ok(result.rows_affected() > 0)
}
