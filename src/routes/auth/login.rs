use crate::db::postgres_service::PostgresService;
use crate::routes::auth::new_session;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{AuthRes, RLogin};
use crate::utils::token::verify;
use actix_web::{post, web};
use std::sync::Arc;

#[post("/login")]
pub async fn login(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<RLogin>,
) -> ApiResult<AuthRes> {
    let user = match db.get_user_by_username(body.username.trim()).await {
        Ok(user) => user,
        Err(AppError::NotFound) => return Err(AppError::Unauthorized),
        Err(e) => return Err(e),
    };

    if !verify(&body.password, &user.password_hash).unwrap_or(false) {
        return Err(AppError::Unauthorized);
    }

    let (token, hash) = new_session(&user.id)?;
    db.set_user_token_hash(&user.id, hash).await?;

    Ok(ApiResponse::Ok(AuthRes { user: user.into(), token }))
}
