use crate::db::postgres_service::PostgresService;
use crate::routes::auth::new_session;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{normalize_email, AuthRes, DBUserCreate, RRegister};
use crate::utils::token::{hash_or_internal, new_id};
use actix_web::{post, web};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

#[post("/register")]
pub async fn register(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RRegister>,
) -> ApiResult<AuthRes> {
    body.validate()?;

    let id = new_id();
    let (token, token_hash) = new_session(&id)?;
    let user = db
        .register_user(
            DBUserCreate {
                id,
                username: body.username.trim().to_string(),
                password_hash: hash_or_internal(&body.password)?,
                nickname: body.nickname.trim().to_string(),
                email: normalize_email(&body.email),
                token_hash,
            },
            body.code.trim(),
            Utc::now(),
        )
        .await?;

    info!("registered user {}", user.id);

    Ok(ApiResponse::Created(AuthRes { user: user.into(), token }))
}
