//! # 회고 세션 모델 정의
//!
//! 세션은 한 번의 회고에 쓰이는 카드들을 담는 이름 붙은 컨테이너입니다.
//! 생성 후에는 수정되지 않고, 삭제 시 카드와 코멘트가 함께 삭제됩니다.

use serde::{Deserialize, Serialize};

use super::{Card, Comment};

/// 세션 엔티티: DB의 `sessions` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// 세션 고유 식별자 (UUIDv7)
    pub session_id: String,
    /// 세션 이름 (예: "Sprint 12")
    pub name: String,
    /// 생성 시각 (RFC 3339, UTC)
    pub created_at: String,
}

/// `GET /api/sessions/{id}` 응답: 세션과 그 안의 모든 카드(각 카드의 코멘트 포함)
///
/// `#[serde(flatten)]`으로 세션 필드를 최상위에 펼쳐서
/// `{ "session_id": ..., "name": ..., "created_at": ..., "cards": [...] }` 형태가 됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: Session,
    pub cards: Vec<CardDetail>,
}

/// 카드와 그 카드에 달린 코멘트 목록
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetail {
    #[serde(flatten)]
    pub card: Card,
    pub comments: Vec<Comment>,
}

/// 세션 생성 요청: `POST /api/sessions`의 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    /// 세션 이름 (필수, 1~100자)
    pub name: String,
}
