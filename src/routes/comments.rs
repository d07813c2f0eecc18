use crate::{error::AppError, models::*, services};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{AppJson, AppState};

/// `POST /api/cards/{id}/comments` + `{ "author", "text" }` → `201 Created`
pub async fn add_comment(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    AppJson(req): AppJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = services::add_comment(&state.pool, &card_id, &req).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
