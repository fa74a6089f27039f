use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coach::Commentary;
use crate::error::AppError;
use crate::pipeline::{metrics, parse};
use crate::state::AppState;
use crate::types::log::{user_name_from_filename, FileFormat, FitnessLog, ScoredRecord};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/upload", post(upload))
}

#[derive(Serialize, Deserialize)]
struct UploadResponse {
    file_id: String,
    file_type: String,
    user_name: String,
    records: Vec<ScoredRecord>,
    commentary: Commentary,
    chat_widget_url: String,
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            file_bytes = Some(field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read file bytes: {}", e))
            })?.to_vec());
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let filename = filename.ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;

    let format = FileFormat::from_filename(&filename).ok_or_else(|| {
        AppError::BadRequest("Unsupported file format (expected .csv or .xlsx)".to_string())
    })?;

    tracing::info!("Parsing {} file: {}", format.as_str(), filename);

    let parsed = parse::parse(&bytes, format)?;
    let scored = metrics::compute_fitness_metrics(&parsed.records)?;
    let user_name = user_name_from_filename(&filename);
    let log = FitnessLog::new(user_name, scored)
        .ok_or_else(|| AppError::BadRequest("No workout rows found in file".to_string()))?;

    let file_id = Uuid::new_v4().to_string();
    let log = state.insert(file_id.clone(), log);

    tracing::info!(
        "Uploaded file {} with ID {} ({} records, user {})",
        filename,
        file_id,
        log.records().len(),
        log.user_name()
    );

    let commentary = state.coach().commentary(&log).await;
    let chat_widget_url = state
        .config()
        .chat_widget
        .session_url(&Uuid::new_v4().to_string());

    Ok(Json(UploadResponse {
        file_id,
        file_type: parsed.file_format.as_str().to_string(),
        user_name: log.user_name().to_string(),
        records: log.records().to_vec(),
        commentary,
        chat_widget_url,
    }))
}
