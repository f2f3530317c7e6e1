use chrono::DateTime;

use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app.get("/api/health").await;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], app.environment.as_str());
}

#[tokio::test]
async fn health_check_timestamp_is_iso_8601() {
    let app = spawn_app().await;

    for _ in 0..3 {
        let body: serde_json::Value = app.get("/api/health").await.json().await.unwrap();
        let timestamp = body["timestamp"].as_str().unwrap();

        assert!(
            DateTime::parse_from_rfc3339(timestamp).is_ok(),
            "{timestamp} is not an ISO-8601 timestamp"
        );
    }
}

#[tokio::test]
async fn health_check_reports_the_configured_environment() {
    let app = spawn_app_with_environment("staging").await;

    let body: serde_json::Value = app.get("/api/health").await.json().await.unwrap();

    assert_eq!(body["environment"], "staging");
}

#[tokio::test]
async fn health_check_rejects_other_methods() {
    let app = spawn_app().await;

    for method in [reqwest::Method::POST, reqwest::Method::PUT, reqwest::Method::DELETE] {
        let response = app.request(method.clone(), "/api/health", None).await;

        assert_eq!(
            405,
            response.status().as_u16(),
            "{method} /api/health was not rejected"
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Method not allowed" }));
    }
}

async fn spawn_app_with_environment(name: &str) -> crate::helpers::TestApp {
    let name = name.to_owned();
    crate::helpers::spawn_app_with(move |config| config.app.environment = name).await
}
