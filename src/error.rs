use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid CSV: {0}")]
    InvalidCsv(String),
    #[error("Invalid XLSX: {0}")]
    InvalidXlsx(String),
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("Row {row}: '{value}' in column {column} is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("Row {row}: '{value}' is not a valid date")]
    InvalidDate { row: usize, value: String },
    #[error("No workout rows found in file")]
    EmptyFile,
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Row {row}: division by zero computing BMI (height is 0 cm)")]
    DivisionByZero { row: usize },
    #[error("Cannot compute metrics for an empty log")]
    EmptyLog,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("SVG generation failed: {0}")]
    SvgError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("PNG rendering failed: {0}")]
    RenderFailed(String),
}

/// Failure of a single chat-completion call.
#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("could not parse response: {0}")]
    Parse(String),
    #[error("response had no choices")]
    NoChoices,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("Workout log not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Parse(_) | AppError::Metrics(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Render(_) | AppError::Raster(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        if status.is_server_error() {
            tracing::error!("{}", message);
        } else {
            tracing::warn!("{}", message);
        }

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
