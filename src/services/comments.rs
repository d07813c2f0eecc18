use sqlx::SqlitePool;

use super::validation::{require_text, MAX_AUTHOR_CHARS, MAX_COMMENT_TEXT_CHARS};
use super::{new_id, now_timestamp};
use crate::db;
use crate::error::AppError;
use crate::models::{Comment, CreateCommentRequest};

/// 카드에 코멘트를 추가합니다.
///
/// 흡수된 카드에도 코멘트를 달 수 있습니다. 숨김 여부는 화면 쪽의 관례일 뿐입니다.
pub async fn add_comment(
    pool: &SqlitePool,
    card_id: &str,
    req: &CreateCommentRequest,
) -> Result<Comment, AppError> {
    let author = require_text("author", &req.author, MAX_AUTHOR_CHARS)?;
    let text = require_text("text", &req.text, MAX_COMMENT_TEXT_CHARS)?;

    let comment = Comment {
        comment_id: new_id(),
        card_id: card_id.to_string(),
        author: author.to_string(),
        text: text.to_string(),
        created_at: now_timestamp(),
    };

    let mut tx = db::begin_write(pool).await?;
    db::get_card(&mut *tx, card_id)
        .await?
        .ok_or(AppError::NotFound("Card"))?;
    db::insert_comment(&mut *tx, &comment).await?;
    tx.commit().await?;

    tracing::info!(comment_id = %comment.comment_id, card_id, "comment added");
    Ok(comment)
}
