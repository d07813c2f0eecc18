//! # 세션 데이터베이스 쿼리 모듈
//!
//! ## 세션 라이프사이클
//! ```text
//! [생성] insert_session() → 카드/코멘트가 쌓임 → delete_session() → [삭제, 카드·코멘트 CASCADE]
//! ```
//! 세션 자체는 생성 후 수정되지 않습니다.

use crate::error::AppError;
use crate::models::Session;
use sqlx::SqliteExecutor;

/// 새 세션 행을 삽입합니다.
///
/// 식별자와 생성 시각은 호출하는 쪽(서비스 계층)이 미리 채워서 넘깁니다.
pub async fn insert_session(ex: impl SqliteExecutor<'_>, session: &Session) -> Result<(), AppError> {
    sqlx::query("INSERT INTO sessions (session_id, name, created_at) VALUES (?, ?, ?)")
        .bind(&session.session_id)
        .bind(&session.name)
        .bind(&session.created_at)
        .execute(ex)
        .await?;

    Ok(())
}

/// ID로 세션 하나를 조회합니다.
///
/// 세션이 존재하면 `Some(Session)`, 없으면 `None`을 반환합니다.
pub async fn get_session(ex: impl SqliteExecutor<'_>, session_id: &str) -> Result<Option<Session>, AppError> {
    let session = sqlx::query_as::<_, Session>(
        "SELECT session_id, name, created_at FROM sessions WHERE session_id = ?",
    )
    .bind(session_id)
    .fetch_optional(ex)
    .await?;

    Ok(session)
}

/// 세션을 삭제합니다.
///
/// `cards.session_id`와 `comments.card_id`에 `ON DELETE CASCADE`가 걸려 있어
/// 세션의 카드와 그 코멘트가 같은 문장 안에서 함께 삭제됩니다.
///
/// ## 반환값
/// - `true`: 삭제 성공
/// - `false`: 해당 ID의 세션이 없음
pub async fn delete_session(ex: impl SqliteExecutor<'_>, session_id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM sessions WHERE session_id = ?")
        .bind(session_id)
        .execute(ex)
        .await?;

    Ok(result.rows_affected() > 0)
}
