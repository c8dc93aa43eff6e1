use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::routes::groups::parse_uuid;
use crate::types::error::AppError;
use crate::types::group::GroupDetail;
use crate::types::period::{Period, PeriodWindow};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::token::require_user_id;
use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use std::sync::Arc;

/// Group plus this week's board. Members only.
#[get("/{id}")]
pub async fn detail(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
    path: web::Path<String>,
) -> ApiResult<GroupDetail> {
    let user_id = require_user_id(&auth)?;
    let group_id = parse_uuid(&path.into_inner(), "group")?;

    let group = db.get_group(group_id).await?;
    if !db.is_group_member(group_id, user_id).await? {
        return Err(AppError::Forbidden);
    }

    let week = PeriodWindow::current(Period::Week, Utc::now(), config().utc_offset());
    let members = db.group_standings(group_id, &week).await?;
    Ok(ApiResponse::Ok(GroupDetail::new(group, members)))
}
