use claims::assert_none;
use reqwest::multipart::{Form, Part};
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, header, method, path},
};

use crate::helpers::{
    TEST_API_KEY, contact_form, file_part, spawn_app, spawn_app_with, valid_contact_form,
};

const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

#[tokio::test]
async fn contact_returns_200_for_valid_form_data() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(header("Authorization", format!("Bearer {TEST_API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(valid_contact_form()).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "success": true, "message": "Email sent successfully" })
    );
}

#[tokio::test]
async fn contact_sends_the_submitted_values() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_contact(valid_contact_form()).await;

    let received = &app.email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&received.body).unwrap();
    let html = body["html"].as_str().unwrap();

    assert_eq!(body["subject"], "New Contact Form Submission");
    assert_eq!(body["from"], "no-reply@yourdomain.com");
    assert_eq!(body["to"], serde_json::json!(["contact@yourdomain.com"]));
    assert!(html.contains("Asha"));
    assert!(html.contains("asha@example.com"));
    assert!(html.contains("Interested in solar"));
}

#[tokio::test]
async fn contact_lists_attachment_name_and_size() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let form = valid_contact_form().part("lightBill", file_part("bill.pdf", 1024));
    let response = app.post_contact(form).await;

    assert_eq!(200, response.status().as_u16());
    let html = &app.sent_html_bodies().await[0];
    assert!(html.contains("bill.pdf"));
    assert!(html.contains("1.00 KB"));
    assert!(html.contains("File attachments were received but not included in this email."));
}

#[tokio::test]
async fn contact_accepts_both_attachments() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let form = valid_contact_form()
        .part("lightBill", file_part("bill.pdf", 1024))
        .part("locationPhoto", file_part("roof.jpg", 3 * 1024));
    let response = app.post_contact(form).await;

    assert_eq!(200, response.status().as_u16());
    let html = &app.sent_html_bodies().await[0];
    assert!(html.contains("Light Bill: bill.pdf (1.00 KB)"));
    assert!(html.contains("Location Photo: roof.jpg (3.00 KB)"));
}

#[tokio::test]
async fn contact_accepts_a_file_at_the_size_limit() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let form = valid_contact_form().part("locationPhoto", file_part("roof.jpg", MAX_FILE_SIZE));
    let response = app.post_contact(form).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn contact_rejects_a_file_over_the_size_limit() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let form = valid_contact_form().part("lightBill", file_part("bill.pdf", MAX_FILE_SIZE + 1));
    let response = app.post_contact(form).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "File too large");
}

#[tokio::test]
async fn contact_rejects_an_oversized_file_sent_before_the_text_fields() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let form = Form::new()
        .part("locationPhoto", file_part("roof.jpg", 2 * MAX_FILE_SIZE))
        .text("name", "Asha")
        .text("email", "asha@example.com")
        .text("message", "Interested in solar");
    let response = app.post_contact(form).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "File too large");
}

#[tokio::test]
async fn contact_skips_a_file_input_left_empty() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let empty_input = Part::bytes(Vec::<u8>::new()).file_name("");
    let form = valid_contact_form().part("lightBill", empty_input);
    let response = app.post_contact(form).await;

    assert_eq!(200, response.status().as_u16());
    let html = &app.sent_html_bodies().await[0];
    assert!(!html.contains("Light Bill:"));
}

#[tokio::test]
async fn contact_keeps_apostrophes_and_links_verbatim() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let form = contact_form(
        "Asha O'Brien",
        "asha@example.com",
        "Quote for 3/4 roof, see https://solar.example/plan",
    );
    let response = app.post_contact(form).await;

    assert_eq!(200, response.status().as_u16());
    let html = &app.sent_html_bodies().await[0];
    assert!(html.contains("Asha O'Brien"));
    assert!(html.contains("Quote for 3/4 roof, see https://solar.example/plan"));
}

#[tokio::test]
async fn contact_ignores_unknown_file_parts() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let form = valid_contact_form().part("resume", file_part("cv.pdf", 2048));
    let response = app.post_contact(form).await;

    assert_eq!(200, response.status().as_u16());
    assert!(!app.sent_html_bodies().await[0].contains("cv.pdf"));
}

#[tokio::test]
async fn contact_rejects_a_repeated_file_part() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let form = valid_contact_form()
        .part("lightBill", file_part("bill.pdf", 1024))
        .part("lightBill", file_part("bill-2.pdf", 1024));
    let response = app.post_contact(form).await;

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "File upload error");
}

#[tokio::test]
async fn contact_returns_400_when_data_is_missing() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (
            Form::new()
                .text("email", "asha@example.com")
                .text("message", "Interested in solar"),
            "missing the name",
        ),
        (
            Form::new()
                .text("name", "Asha")
                .text("message", "Interested in solar"),
            "missing the email",
        ),
        (
            Form::new()
                .text("name", "Asha")
                .text("email", "asha@example.com"),
            "missing the message",
        ),
        (
            Form::new().part("lightBill", file_part("bill.pdf", 1024)),
            "missing every text field",
        ),
    ];

    for (form, description) in test_cases {
        let response = app.post_contact(form).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {description}."
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Missing required fields" }));
    }
}

#[tokio::test]
async fn contact_returns_400_when_fields_are_present_but_empty() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (contact_form("", "asha@example.com", "Hi"), "empty name"),
        (contact_form("Asha", "", "Hi"), "empty email"),
        (contact_form("Asha", "asha@example.com", ""), "empty message"),
    ];

    for (form, description) in test_cases {
        let response = app.post_contact(form).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload was {description}."
        );
    }
}

#[tokio::test]
async fn contact_returns_400_for_a_non_multipart_body() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(format!("{}/api/contact", &app.address))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body("name=Asha&email=asha%40example.com&message=Hi")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "File upload error");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn contact_returns_500_when_email_service_is_not_configured() {
    let app = spawn_app_with(|config| config.email_client.api_key = None).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let form = valid_contact_form().part("lightBill", file_part("bill.pdf", 1024));
    let response = app.post_contact(form).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Email service not configured" }));
}

#[tokio::test]
async fn contact_returns_500_when_the_provider_fails() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(valid_contact_form()).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to send email");
    assert!(body["details"].is_string());
    assert_none!(body.get("success"));
}

#[tokio::test]
async fn contact_keeps_serving_after_a_provider_failure() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    assert_eq!(500, app.post_contact(valid_contact_form()).await.status().as_u16());
    assert_eq!(200, app.post_contact(valid_contact_form()).await.status().as_u16());
}

#[tokio::test]
async fn contact_rejects_get() {
    let app = spawn_app().await;

    let response = app.get("/api/contact").await;

    assert_eq!(405, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Method not allowed" }));
}
