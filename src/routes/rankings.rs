use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::types::period::{Period, PeriodWindow};
use crate::types::ranking::{RankingEntry, RankingQuery, RANKING_LIMIT};
use crate::types::response::{ApiResponse, ApiResult};
use actix_web::{get, web};
use chrono::Utc;
use std::sync::Arc;

#[get("")]
pub async fn list(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    query: web::Query<RankingQuery>,
) -> ApiResult<Vec<RankingEntry>> {
    let period = Period::parse(query.period.as_deref())?;
    let window = PeriodWindow::current(period, Utc::now(), config().utc_offset());
    Ok(ApiResponse::Ok(db.rankings(&window, RANKING_LIMIT).await?))
}
