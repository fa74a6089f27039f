use axum::{body::to_bytes, http::Request, Router};
use chrono::NaiveDate;
use fitcoach_rs::{
    config::{CoachConfig, Config},
    pipeline::{chart, metrics, render},
    routes,
    state::AppState,
    types::{
        chart::{ChartKind, RenderOptions},
        log::{FitnessLog, FitnessRecord},
    },
};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    let mut coach = CoachConfig::new("test-key");
    coach.api_url = "http://127.0.0.1:1/chat".to_string();
    let state = AppState::new(Config::new(coach));
    Router::new()
        .merge(routes::health::router())
        .merge(routes::upload::router())
        .merge(routes::ask::router())
        .merge(routes::chart::router())
        .with_state(state)
}

fn sample_csv() -> &'static str {
    "Date,Weight (kg),Height (cm),Fat (%),1RM Bench Press,1RM Squat,1RM Deadlift\n\
2025-01-01,80,180,20,100,140,180\n\
2025-01-08,79,180,19,102,142,182\n"
}

fn multipart_body(file_name: &str, file_body: &str, boundary: &str) -> String {
    format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{file_body}\r\n--{boundary}--\r\n"
    )
}

fn sample_log() -> FitnessLog {
    let records = vec![
        FitnessRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("date"),
            weight_kg: 80.0,
            height_cm: 180.0,
            fat_pct: 20.0,
            bench_1rm: 100.0,
            squat_1rm: 140.0,
            deadlift_1rm: 180.0,
        },
        FitnessRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 8).expect("date"),
            weight_kg: 79.0,
            height_cm: 180.0,
            fat_pct: 19.0,
            bench_1rm: 102.0,
            squat_1rm: 142.0,
            deadlift_1rm: 182.0,
        },
    ];
    FitnessLog::new("sam", metrics::compute_fitness_metrics(&records).expect("metrics")).expect("log")
}

async fn upload(app: &Router) -> String {
    let boundary = "X-BOUNDARY-TEST";
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/upload")
                .method("POST")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(axum::body::Body::from(multipart_body("sam.csv", sample_csv(), boundary)))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("upload body");
    let json: Value = serde_json::from_slice(&body).expect("upload json");
    json["file_id"].as_str().expect("file id").to_string()
}

fn chart_request(body: Value) -> Request<axum::body::Body> {
    Request::builder()
        .uri("/api/chart")
        .method("POST")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .expect("request")
}

#[test]
fn progress_chart_has_weight_fat_and_bmi_series() {
    let data = chart::prepare(&sample_log(), ChartKind::Progress);

    assert_eq!(data.labels, vec!["2025-01-01", "2025-01-08"]);
    let names: Vec<&str> = data.series.iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Weight (kg)", "Fat (%)", "BMI"]);
    assert_eq!(data.series[0].values, vec![80.0, 79.0]);

    let svg = render::render_svg(&data, &RenderOptions::default()).expect("svg");
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<polyline").count(), 3);
    // Every point of every series gets a marker.
    assert_eq!(svg.matches("<circle").count(), 6);
    assert!(svg.contains("Progress Over Time"));
}

#[test]
fn strength_chart_draws_grouped_bars() {
    let data = chart::prepare(&sample_log(), ChartKind::Strength);
    let names: Vec<&str> = data.series.iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["1RM Bench Press", "1RM Squat", "1RM Deadlift"]);

    let svg = render::render_svg(&data, &RenderOptions::default()).expect("svg");
    // Six bars plus three legend swatches.
    assert_eq!(svg.matches("<rect").count(), 9);
}

#[test]
fn render_rejects_degenerate_viewport() {
    let data = chart::prepare(&sample_log(), ChartKind::Progress);
    let options = RenderOptions {
        width: 100,
        height: 100,
        padding: 60,
        ..RenderOptions::default()
    };
    assert!(render::render_svg(&data, &options).is_err());
}

#[tokio::test]
async fn chart_endpoint_returns_svg() {
    let app = app();
    let file_id = upload(&app).await;

    let response = app
        .oneshot(chart_request(serde_json::json!({
            "file_id": file_id,
            "chart": "progress"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert_eq!(content_type, "image/svg+xml");
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    assert!(String::from_utf8_lossy(&body).contains("<svg"));
}

#[tokio::test]
async fn chart_endpoint_returns_png() {
    let app = app();
    let file_id = upload(&app).await;

    let response = app
        .oneshot(chart_request(serde_json::json!({
            "file_id": file_id,
            "chart": "strength",
            "format": "png",
            "width": 640,
            "height": 360,
            "palette": "ocean"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert_eq!(content_type, "image/png");
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    assert!(body.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[tokio::test]
async fn chart_endpoint_rejects_unknown_chart() {
    let app = app();
    let file_id = upload(&app).await;

    let response = app
        .oneshot(chart_request(serde_json::json!({
            "file_id": file_id,
            "chart": "pie"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chart_endpoint_rejects_unknown_file() {
    let response = app()
        .oneshot(chart_request(serde_json::json!({
            "file_id": "nope",
            "chart": "progress"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chart_endpoint_rejects_unlisted_fields() {
    let app = app();
    let file_id = upload(&app).await;

    let response = app
        .oneshot(chart_request(serde_json::json!({
            "file_id": file_id,
            "chart": "progress",
            "markers": false
        })))
        .await
        .expect("response");

    assert_eq!(
        response.status(),
        axum::http::StatusCode::UNPROCESSABLE_ENTITY
    );
}
