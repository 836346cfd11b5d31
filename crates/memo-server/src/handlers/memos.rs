//! Memo handlers

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use memo_types::{CreateMemo, Memo, TITLE_MAX_LEN};

pub async fn create(
    State(state): State<AppState>,
    Json(req_body): Json<CreateMemo>,
) -> Result<(StatusCode, Json<Memo>), StatusCode> {
    // Over-long titles are rejected here rather than truncated by SQLite
    if req_body.title.chars().count() > TITLE_MAX_LEN {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    match state
        .db
        .insert_memo(&req_body.title, &req_body.content)
        .await
    {
        Ok(memo) => Ok((StatusCode::CREATED, Json(memo))),
        Err(e) => {
            tracing::error!("Failed to create memo: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Memo>>, StatusCode> {
    match state.db.list_memos().await {
        Ok(memos) => Ok(Json(memos)),
        Err(e) => {
            tracing::error!("Failed to list memos: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
