use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{normalize_email, validate_email};
use crate::types::verification::{CodePurpose, RSendCode, SendCodeRes};
use crate::utils::mail::mail_verification_code;
use actix_web::{post, web};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::error;

#[post("/send-code")]
pub async fn send_code(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RSendCode>,
) -> ApiResult<SendCodeRes> {
    let email = normalize_email(&body.email);
    validate_email(&email)?;

    let registered = db.user_exists_by_email(&email).await?;
    match body.purpose {
        CodePurpose::Register if registered => {
            return Err(AppError::Conflict("email already registered".into()))
        }
        CodePurpose::Reset if !registered => return Err(AppError::NotFound),
        _ => {}
    }

    let cfg = &config().verification;
    let code = db
        .issue_code(
            &email,
            body.purpose,
            Duration::minutes(cfg.ttl_minutes),
            Duration::seconds(cfg.resend_cooldown_secs),
            Utc::now(),
        )
        .await?;

    if let Err(e) = mail_verification_code(&email, &code, body.purpose).await {
        error!("Failed to mail {} code: {e}", body.purpose);
        if let Err(e) = db.revoke_code(&email, &code, body.purpose).await {
            error!("Failed to revoke undelivered code: {e}");
        }
        return Err(AppError::Internal("could not send verification email".into()));
    }

    Ok(ApiResponse::Ok(SendCodeRes {
        message: "Verification code sent.".to_string(),
        expires_in_secs: cfg.ttl_minutes * 60,
    }))
}
