use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::normalize_email;
use crate::types::verification::{RVerifyCode, VerifyCodeRes};
use actix_web::{post, web};
use chrono::Utc;
use std::sync::Arc;

#[post("/verify-code")]
pub async fn verify_code(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RVerifyCode>,
) -> ApiResult<VerifyCodeRes> {
    let email = normalize_email(&body.email);
    let valid = db
        .check_code(&email, body.code.trim(), body.purpose, Utc::now())
        .await?;
    Ok(ApiResponse::Ok(VerifyCodeRes { valid }))
}
