//! # 카드 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/sessions/{id}/cards | `create_card` | 세션에 카드 추가 |
//! | PUT | /api/cards/{id} | `update_card` | 카드 부분 수정 |
//! | DELETE | /api/cards/{id} | `delete_card` | 카드 삭제 |
//! | POST | /api/cards/{id}/merge | `merge_cards` | 카드를 다른 카드에 병합 |

use crate::{error::AppError, models::*, services};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{AppJson, AppState};

/// `POST /api/sessions/{id}/cards` + `{ "author", "column_type", "text" }` → `201 Created`
pub async fn create_card(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    AppJson(req): AppJson<CreateCardRequest>,
) -> Result<(StatusCode, Json<CardDetail>), AppError> {
    let card = services::create_card(&state.pool, &session_id, &req).await?;
    Ok((
        StatusCode::CREATED,
        Json(CardDetail {
            card,
            comments: Vec::new(),
        }),
    ))
}

/// `PUT /api/cards/{id}`: 카드를 부분 수정합니다.
///
/// 메서드는 PUT이지만 동작은 PATCH와 같습니다. 요청에 있는 필드만 바뀝니다.
/// 예: 드래그 앤 드롭으로 옮길 때 `{ "column_type": "actions", "position": 2 }`
pub async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateCardRequest>,
) -> Result<Json<CardDetail>, AppError> {
    let card = services::update_card(&state.pool, &id, &req).await?;
    Ok(Json(card))
}

/// `DELETE /api/cards/{id}` → `204 No Content`
pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    services::delete_card(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/cards/{id}/merge` + `{ "into_card_id": "..." }`
///
/// 경로의 카드가 `into_card_id` 카드에 흡수됩니다.
/// 응답: `{ "merged_card_id", "into_card_id", "merged_text" }`
pub async fn merge_cards(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<MergeCardRequest>,
) -> Result<Json<MergeResult>, AppError> {
    let result = services::merge_cards(&state.pool, &id, &req.into_card_id).await?;
    Ok(Json(result))
}
