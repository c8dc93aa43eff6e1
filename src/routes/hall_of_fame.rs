use crate::config::config;
use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use actix_web::{get, web};
use chrono::Utc;
use entity::hall_of_fame::Model as FameModel;
use std::sync::Arc;
use tracing::warn;

const HALL_OF_FAME_LIMIT: u64 = 50;

/// Finished periods are recorded lazily here; there is no scheduler.
#[get("")]
pub async fn list(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<Vec<FameModel>> {
    if let Err(e) = db.record_completed_periods(Utc::now(), config().utc_offset()).await {
        warn!("hall of fame recording failed: {e}");
    }
    Ok(ApiResponse::Ok(db.list_hall_of_fame(HALL_OF_FAME_LIMIT).await?))
}
