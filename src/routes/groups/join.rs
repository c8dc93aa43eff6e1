use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::group::RGroupJoin;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::token::require_user_id;
use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::group::Model as GroupModel;
use std::sync::Arc;

#[post("/join")]
pub async fn join(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
    body: web::Json<RGroupJoin>,
) -> ApiResult<GroupModel> {
    let user_id = require_user_id(&auth)?;
    if body.code.trim().is_empty() {
        return Err(AppError::Validation("join code is required".into()));
    }
    Ok(ApiResponse::Ok(db.join_group(&body.code, user_id).await?))
}
