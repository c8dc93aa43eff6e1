use crate::config::config;
use crate::types::{mail::SendEmail, verification::CodePurpose};
use reqwest::{Client, ClientBuilder};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub async fn send_email(email: SendEmail) -> Result<String, String> {
    let cfg = &config().mail;
    let Some(api_key) = cfg.resend_key.as_deref() else {
        info!(
            "[mail] no RESEND_KEY, not sending '{}' to {:?}:\n{}",
            email.subject,
            email.to,
            email.text.as_deref().unwrap_or_default()
        );
        return Ok("logged".to_string());
    };

    let client: Client = ClientBuilder::new()
        .user_agent("patience-lion/0.1 (+reqwest)")
        .tcp_nodelay(true)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| format!("build client failed: {e}"))?;

    let t0 = Instant::now();
    let res = client
        .post(&cfg.endpoint)
        .bearer_auth(api_key) // do NOT log the key
        .json(&email)
        .send()
        .await
        .map_err(|e| format!("send failed: {e}"))?;
    let dt = t0.elapsed();

    let status = res.status();
    let body = res.text().await.map_err(|e| format!("read body failed: {e}"))?;
    info!("[mail] <- status: {status} in {} ms", dt.as_millis());

    if status.is_success() {
        Ok(body)
    } else {
        warn!("[mail] Resend rejected message: {body}");
        Err(format!("Resend API error: HTTP {status}: {body}"))
    }
}

pub fn verification_subject(purpose: CodePurpose) -> &'static str {
    match purpose {
        CodePurpose::Register => "[Patience Lion] Confirm your email",
        CodePurpose::Reset => "[Patience Lion] Password reset code",
    }
}

pub fn verification_text(code: &str, purpose: CodePurpose, ttl_minutes: i64) -> String {
    let action = match purpose {
        CodePurpose::Register => "finish signing up",
        CodePurpose::Reset => "reset your password",
    };
    format!(
        "Your verification code is {code}.\n\nEnter it to {action}. It expires in {ttl_minutes} minutes.\nIf this wasn't you, you can ignore this email."
    )
}

pub async fn mail_verification_code(to: &str, code: &str, purpose: CodePurpose) -> Result<String, String> {
    let cfg = config();
    send_email(SendEmail {
        from: cfg.mail.from.clone(),
        to: vec![to.to_string()],
        subject: verification_subject(purpose).to_string(),
        text: Some(verification_text(code, purpose, cfg.verification.ttl_minutes)),
        ..Default::default()
    })
    .await
}
