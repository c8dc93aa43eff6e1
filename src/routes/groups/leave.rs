use crate::db::postgres_service::PostgresService;
use crate::routes::groups::parse_uuid;
use crate::types::group::Departure;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::token::require_user_id;
use actix_web::{delete, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub group_deleted: bool,
    pub new_owner: Option<Uuid>,
}

/// Leave (target is the caller) or kick (caller created the group).
#[delete("/{id}/members/{user_id}")]
pub async fn remove_member(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
    path: web::Path<(String, String)>,
) -> ApiResult<Response> {
    let actor = require_user_id(&auth)?;
    let (group_id, target) = path.into_inner();
    let group_id = parse_uuid(&group_id, "group")?;
    let target = parse_uuid(&target, "user")?;

    let outcome = db.remove_group_member(group_id, actor, target).await?;
    Ok(ApiResponse::Ok(Response {
        success: true,
        group_deleted: outcome == Departure::GroupDeleted,
        new_owner: match outcome {
            Departure::OwnershipPassed(id) => Some(id),
            _ => None,
        },
    }))
}
