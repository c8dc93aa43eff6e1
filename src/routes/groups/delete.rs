use crate::db::postgres_service::PostgresService;
use crate::routes::groups::parse_uuid;
use crate::types::response::{ApiResponse, ApiResult, Success};
use crate::utils::token::require_user_id;
use actix_web::{delete, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

#[delete("/{id}")]
pub async fn delete(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
    path: web::Path<String>,
) -> ApiResult<Success> {
    let actor = require_user_id(&auth)?;
    let group_id = parse_uuid(&path.into_inner(), "group")?;
    db.delete_group(group_id, actor).await?;
    Ok(ApiResponse::Ok(Success::yes()))
}
