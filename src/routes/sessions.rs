//! # 세션 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/sessions | `create_session` | 새 세션 생성 |
//! | GET | /api/sessions/{id} | `get_session` | 세션 + 카드 + 코멘트 조회 |
//! | DELETE | /api/sessions/{id} | `delete_session` | 세션 삭제 (카드/코멘트 포함) |
//!
//! 프론트엔드는 `GET /api/sessions/{id}`를 주기적으로 호출(polling)해서 보드를 갱신합니다.

use crate::{error::AppError, models::*, services};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{AppJson, AppState};

/// 새 회고 세션을 만듭니다.
///
/// `POST /api/sessions` + `{ "name": "Sprint 12" }` → `201 Created`
///
/// 새 세션에는 카드가 없으므로 `cards: []`를 함께 돌려줍니다.
pub async fn create_session(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionDetail>), AppError> {
    let session = services::create_session(&state.pool, &req.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionDetail {
            session,
            cards: Vec::new(),
        }),
    ))
}

/// `GET /api/sessions/{id}`: 세션과 그 안의 카드, 코멘트를 조회합니다.
///
/// 흡수된 카드도 `merged_into` 값과 함께 포함됩니다.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionDetail>, AppError> {
    let detail = services::get_session(&state.pool, &id).await?;
    Ok(Json(detail))
}

/// `DELETE /api/sessions/{id}` → `204 No Content`
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    services::delete_session(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
