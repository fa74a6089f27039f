use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pipeline::{chart, rasterize, render};
use crate::state::AppState;
use crate::types::{
    chart::{ChartFormat, ChartKind, OutputConfig, RenderOptions},
    palette::Palette,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/chart", post(render_chart))
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct ChartRequest {
    file_id: String,
    chart: String,
    #[serde(default)]
    format: ChartFormat,
    palette: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    background: Option<String>,
}

fn validate_dimensions(width: u32, height: u32) -> Result<(), AppError> {
    const MIN_DIM: u32 = 320;
    const MAX_DIM: u32 = 4096;
    const MAX_MEGAPIXELS: f64 = 10.0;

    if !(MIN_DIM..=MAX_DIM).contains(&width) || !(MIN_DIM..=MAX_DIM).contains(&height) {
        return Err(AppError::BadRequest(format!(
            "Invalid dimensions: {}x{}. Width/height must be between {} and {}",
            width, height, MIN_DIM, MAX_DIM
        )));
    }

    let megapixels = (width as f64 * height as f64) / 1_000_000.0;
    if megapixels > MAX_MEGAPIXELS {
        return Err(AppError::BadRequest(format!(
            "Image too large: {}x{} ({:.2} MP). Max allowed is {:.1} MP",
            width, height, megapixels, MAX_MEGAPIXELS
        )));
    }

    Ok(())
}

async fn render_chart(
    State(state): State<AppState>,
    Json(req): Json<ChartRequest>,
) -> Result<impl IntoResponse, AppError> {
    let log = state
        .get(&req.file_id)
        .ok_or_else(|| AppError::NotFound(req.file_id.clone()))?;

    let kind = ChartKind::from_str(&req.chart).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid chart: {}. Use 'progress' or 'strength'",
            req.chart
        ))
    })?;

    let mut options = RenderOptions::default();
    if let Some(name) = req.palette.as_deref() {
        options.palette = Palette::get(name).unwrap_or_else(Palette::default);
    }
    match (req.width, req.height) {
        (Some(width), Some(height)) => {
            validate_dimensions(width, height)?;
            options.width = width;
            options.height = height;
        }
        (None, None) => {}
        _ => {
            return Err(AppError::BadRequest(
                "Both width and height must be provided together".to_string(),
            ))
        }
    }

    let background = match req.background.as_deref() {
        Some("white") | None => Some((255, 255, 255, 255)),
        Some("black") => Some((0, 0, 0, 255)),
        Some("transparent") => None,
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "Invalid background: {}. Use 'transparent', 'white', or 'black'",
                other
            )));
        }
    };

    let data = chart::prepare(&log, kind);
    let svg = render::render_svg(&data, &options)?;

    tracing::info!(
        "Rendered {} chart for file {} ({}x{}, palette: {}, format: {:?})",
        kind.as_str(),
        req.file_id,
        options.width,
        options.height,
        options.palette.name,
        req.format
    );

    let (content_type, bytes) = match req.format {
        ChartFormat::Svg => ("image/svg+xml", svg.into_bytes()),
        ChartFormat::Png => {
            let output = OutputConfig {
                width: options.width,
                height: options.height,
                background,
            };
            ("image/png", rasterize::rasterize(&svg, &output)?)
        }
    };

    tracing::info!("Generated {}: {} bytes", content_type, bytes.len());

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type)], bytes))
}
