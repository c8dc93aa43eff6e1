mod common;

use actix_web::{test, http::StatusCode};
use common::{TestContext, client::TestClient, get_test_config};
use serde_json::json;

/// Mail is "configured" but points at a port nothing listens on.
fn unreachable_mail_config() -> patience_lion::config::EnvConfig {
    let mut config = get_test_config();
    config.mail.resend_key = Some("re_test_key".to_string());
    config.mail.endpoint = "http://127.0.0.1:9/emails".to_string();
    config
}

#[tokio::test]
async fn test_undelivered_code_does_not_arm_cooldown() {
    println!("\n\n[+] Running test: test_undelivered_code_does_not_arm_cooldown");
    let ctx = TestContext::with_config(unreachable_mail_config()).await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    println!("[+] Actix web app initialized with a dead mail endpoint.");

    let payload = json!({ "email": "unlucky@test.com", "purpose": "register" });

    for attempt in 1..=2 {
        println!("[>] send-code attempt {attempt}");
        let req = test::TestRequest::post()
            .uri("/api/auth/send-code")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        println!("[<] Received response with status: {}", resp.status());

        // a retry right away must hit the mailer again, not the cooldown
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "INTERNAL_ERROR");
    }
    println!("[/] Test passed: Failed sends leave no code behind.");
}

#[tokio::test]
async fn test_revoked_code_cannot_be_used() {
    println!("\n\n[+] Running test: test_revoked_code_cannot_be_used");
    let ctx = TestContext::with_config(unreachable_mail_config()).await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let code = client
        .issue_code("revoked@test.com", patience_lion::types::verification::CodePurpose::Register)
        .await;
    ctx.db
        .revoke_code("revoked@test.com", &code, patience_lion::types::verification::CodePurpose::Register)
        .await
        .expect("revoke should succeed");

    println!("[>] verify-code with the revoked code");
    let req = test::TestRequest::post()
        .uri("/api/auth/verify-code")
        .set_json(json!({ "email": "revoked@test.com", "code": code, "purpose": "register" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["valid"], false);
    println!("[/] Test passed: Revoked code is rejected.");
}
