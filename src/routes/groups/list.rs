use crate::db::postgres_service::PostgresService;
use crate::types::group::GroupSummary;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::token::require_user_id;
use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

#[get("")]
pub async fn list(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<Vec<GroupSummary>> {
    let user_id = require_user_id(&auth)?;
    Ok(ApiResponse::Ok(db.list_groups_for_user(user_id).await?))
}
