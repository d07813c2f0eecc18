use crate::error::AppError;
use crate::models::Comment;
use sqlx::SqliteExecutor;

pub async fn insert_comment(ex: impl SqliteExecutor<'_>, comment: &Comment) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO comments (comment_id, card_id, author, text, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&comment.comment_id)
    .bind(&comment.card_id)
    .bind(&comment.author)
    .bind(&comment.text)
    .bind(&comment.created_at)
    .execute(ex)
    .await?;

    Ok(())
}

pub async fn get_comment(
    ex: impl SqliteExecutor<'_>,
    comment_id: &str,
) -> Result<Option<Comment>, AppError> {
    let comment = sqlx::query_as::<_, Comment>(
        "SELECT comment_id, card_id, author, text, created_at FROM comments WHERE comment_id = ?",
    )
    .bind(comment_id)
    .fetch_optional(ex)
    .await?;

    Ok(comment)
}

/// 카드 하나의 코멘트를 작성 순서대로 조회합니다.
pub async fn list_comments_for_card(
    ex: impl SqliteExecutor<'_>,
    card_id: &str,
) -> Result<Vec<Comment>, AppError> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT comment_id, card_id, author, text, created_at
        FROM comments
        WHERE card_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(card_id)
    .fetch_all(ex)
    .await?;

    Ok(comments)
}

/// 세션에 속한 모든 카드의 코멘트를 한 번에 조회합니다.
///
/// 카드마다 쿼리를 날리는 대신 `cards`와 JOIN해서 한 번에 가져오고,
/// 카드별 분류는 호출하는 쪽에서 합니다.
pub async fn list_comments_for_session(
    ex: impl SqliteExecutor<'_>,
    session_id: &str,
) -> Result<Vec<Comment>, AppError> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT cm.comment_id, cm.card_id, cm.author, cm.text, cm.created_at
        FROM comments cm
        JOIN cards c ON c.card_id = cm.card_id
        WHERE c.session_id = ?
        ORDER BY cm.id ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(ex)
    .await?;

    Ok(comments)
}

/// `from_card_id`의 모든 코멘트를 `to_card_id`로 옮깁니다.
///
/// 코멘트의 id, 작성자, 내용, 작성 시각은 그대로이고 `card_id`만 바뀝니다.
/// 옮겨진 코멘트 수를 반환합니다.
pub async fn reassign_comments(
    ex: impl SqliteExecutor<'_>,
    from_card_id: &str,
    to_card_id: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE comments SET card_id = ? WHERE card_id = ?")
        .bind(to_card_id)
        .bind(from_card_id)
        .execute(ex)
        .await?;

    Ok(result.rows_affected())
}
