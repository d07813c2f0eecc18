use serde::{Deserialize, Serialize};

/// 코멘트 엔티티: DB의 `comments` 테이블 한 행에 대응합니다.
///
/// 코멘트는 생성 후 수정되지 않습니다. 소속 카드(`card_id`)만 병합 시 바뀔 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub comment_id: String,
    pub card_id: String,
    pub author: String,
    pub text: String,
    pub created_at: String,
}

/// 코멘트 추가 요청: `POST /api/cards/{id}/comments`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub author: String,
    pub text: String,
}
