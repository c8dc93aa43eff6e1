use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::types::item::{CreateItem, ItemQuery};
use crate::types::period::{Period, PeriodWindow};
use crate::types::response::{ApiResponse, ApiResult, Success};
use crate::utils::token::require_user_id;
use actix_web::{delete, get, post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use entity::item::Model as ItemModel;
use std::sync::Arc;

#[post("")]
pub async fn create(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
    body: web::Json<CreateItem>,
) -> ApiResult<ItemModel> {
    let user_id = require_user_id(&auth)?;
    let name = body.validate()?;
    let item = db.create_item(user_id, name, body.price, Utc::now()).await?;
    Ok(ApiResponse::Created(item))
}

/// The caller's own log. `?period=` narrows it to the current day, week or month.
#[get("")]
pub async fn list(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
    query: web::Query<ItemQuery>,
) -> ApiResult<Vec<ItemModel>> {
    let user_id = require_user_id(&auth)?;
    let window = match query.period.as_deref() {
        None => None,
        Some(raw) => {
            let period: Period = raw.parse()?;
            Some(PeriodWindow::current(period, Utc::now(), config().utc_offset()))
        }
    };
    Ok(ApiResponse::Ok(db.list_items_for_user(user_id, window).await?))
}

#[delete("/{id}")]
pub async fn delete(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
    path: web::Path<i32>,
) -> ApiResult<Success> {
    let user_id = require_user_id(&auth)?;
    db.delete_item(path.into_inner(), user_id).await?;
    Ok(ApiResponse::Ok(Success::yes()))
}
