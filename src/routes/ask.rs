use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::coach::Commentary;
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/ask", post(ask))
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct AskRequest {
    file_id: String,
    question: String,
}

#[derive(Serialize, Deserialize)]
struct AskResponse {
    question: String,
    answer: Commentary,
}

async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    if req.question.trim().is_empty() {
        return Err(AppError::BadRequest("Question must not be empty".to_string()));
    }

    let log = state
        .get(&req.file_id)
        .ok_or_else(|| AppError::NotFound(req.file_id.clone()))?;

    tracing::info!("Answering question for file {} ({} chars)", req.file_id, req.question.len());

    let answer = state.coach().answer(&req.question, &log).await;

    Ok(Json(AskResponse {
        question: req.question,
        answer,
    }))
}
