use crate::types::response::{ApiResponse, ApiResult};
use crate::types::stock::StockQuote;
use crate::utils::stocks::StockCache;
use actix_web::{get, web};

/// Never fails: an upstream outage shows up as stale or empty quotes.
#[get("")]
pub async fn list(
    _req: actix_web::HttpRequest,
    cache: web::Data<StockCache>,
) -> ApiResult<Vec<StockQuote>> {
    Ok(ApiResponse::Ok(cache.quotes().await))
}
