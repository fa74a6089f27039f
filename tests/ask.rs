use axum::{body::to_bytes, http::Request, Router};
use fitcoach_rs::{
    config::{CoachConfig, Config},
    routes,
    state::AppState,
};
use mockito::{Matcher, Server};
use serde_json::Value;
use tower::ServiceExt;

fn app(api_url: String) -> Router {
    let mut coach = CoachConfig::new("test-key");
    coach.api_url = api_url;
    let state = AppState::new(Config::new(coach));
    Router::new()
        .merge(routes::health::router())
        .merge(routes::upload::router())
        .merge(routes::ask::router())
        .merge(routes::chart::router())
        .with_state(state)
}

fn sample_csv() -> String {
    let mut csv = String::from("Date,Weight (kg),Height (cm),Fat (%),1RM Bench Press,1RM Squat,1RM Deadlift\n");
    for day in 1..=7 {
        csv.push_str(&format!("2025-04-0{day},{},178,{},100,140,180\n", 85 - day, 22 - day));
    }
    csv
}

fn multipart_body(file_name: &str, file_body: &str, boundary: &str) -> String {
    format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{file_body}\r\n--{boundary}--\r\n"
    )
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
                .body(axum::body::Body::from(multipart_body("casey.csv", &sample_csv(), boundary)))
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

fn ask_request(body: Value) -> Request<axum::body::Body> {
    Request::builder()
        .uri("/api/ask")
        .method("POST")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn ask_sends_question_with_recent_data() {
    let mut server = Server::new_async().await;
    let _commentary = server
        .mock("POST", "/chat")
        .match_body(Matcher::Regex("certified personal trainer".to_string()))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"Looking strong"}}]}"#)
        .create_async()
        .await;
    let answer = server
        .mock("POST", "/chat")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r"User Question:   Should I bulk\?  \\n".to_string()),
            Matcher::Regex("Recent Data:".to_string()),
            Matcher::Regex("2025-04-07".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"Not yet"}}]}"#)
        .create_async()
        .await;

    let app = app(format!("{}/chat", server.url()));
    let file_id = upload(&app).await;

    let response = app
        .oneshot(ask_request(serde_json::json!({
            "file_id": file_id,
            "question": "  Should I bulk?  "
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(json["question"], "  Should I bulk?  ");
    assert_eq!(json["answer"]["status"], "succeeded");
    assert_eq!(json["answer"]["text"], "Not yet");
    answer.assert_async().await;
}

#[tokio::test]
async fn ask_reports_remote_failure_inline() {
    let app = app("http://127.0.0.1:1/chat".to_string());
    let file_id = upload(&app).await;

    let response = app
        .oneshot(ask_request(serde_json::json!({
            "file_id": file_id,
            "question": "Why?"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(json["answer"]["status"], "failed");
    assert!(json["answer"]["message"]
        .as_str()
        .is_some_and(|m| m.starts_with("AI error: ")));
}

#[tokio::test]
async fn ask_unknown_file_is_not_found() {
    let response = app("http://127.0.0.1:1/chat".to_string())
        .oneshot(ask_request(serde_json::json!({
            "file_id": "missing",
            "question": "Hello?"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ask_rejects_blank_question() {
    let response = app("http://127.0.0.1:1/chat".to_string())
        .oneshot(ask_request(serde_json::json!({
            "file_id": "whatever",
            "question": "   "
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}
