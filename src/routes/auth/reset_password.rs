use crate::db::postgres_service::PostgresService;
use crate::routes::auth::new_session;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{normalize_email, validate_password, AuthRes, RResetPassword};
use crate::utils::token::hash_or_internal;
use actix_web::{post, web};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Also rotates the session, so any stolen token dies with the old password.
#[post("/reset-password")]
pub async fn reset_password(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RResetPassword>,
) -> ApiResult<AuthRes> {
    validate_password(&body.new_password)?;
    let email = normalize_email(&body.email);

    let user = db.get_user_by_email(&email).await?;
    let (token, token_hash) = new_session(&user.id)?;

    let user = db
        .reset_password(
            &email,
            body.code.trim(),
            hash_or_internal(&body.new_password)?,
            token_hash,
            Utc::now(),
        )
        .await?;
    info!("password reset for user {}", user.id);

    Ok(ApiResponse::Ok(AuthRes { user: user.into(), token }))
}
