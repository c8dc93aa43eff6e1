use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{PublicProfile, RUpdateProfile, UserView};
use crate::utils::token::require_user_id;
use actix_web::{get, patch, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;
use uuid::Uuid;

#[get("/me")]
pub async fn me(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<UserView> {
    let user_id = require_user_id(&auth)?;
    Ok(ApiResponse::Ok(db.get_user_by_id(&user_id).await?.into()))
}

#[patch("/me")]
pub async fn update_me(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
    body: web::Json<RUpdateProfile>,
) -> ApiResult<UserView> {
    let user_id = require_user_id(&auth)?;
    let nickname = body.validate()?;
    db.update_user_nickname(user_id, nickname).await?;
    Ok(ApiResponse::Ok(db.get_user_by_id(&user_id).await?.into()))
}

#[get("/{id}")]
pub async fn profile(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
) -> ApiResult<PublicProfile> {
    let id = Uuid::parse_str(&path.into_inner())
        .map_err(|_| AppError::BadRequest("Invalid user ID. Failed UUID parse.".to_string()))?;
    Ok(ApiResponse::Ok(db.get_public_profile(&id).await?))
}
