use crate::db::postgres_service::PostgresService;
use crate::types::group::RGroupCreate;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::token::require_user_id;
use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::group::Model as GroupModel;
use std::sync::Arc;

#[post("")]
pub async fn create(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
    body: web::Json<RGroupCreate>,
) -> ApiResult<GroupModel> {
    let user_id = require_user_id(&auth)?;
    let name = body.validate()?;
    Ok(ApiResponse::Created(db.create_group(user_id, name).await?))
}
