use std::sync::Arc;

use actix_web::{dev::ServiceRequest, error::ErrorUnauthorized, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use tracing::warn;

use crate::db::postgres_service::PostgresService;
use crate::utils::token::token_valid;

pub async fn validate_token(req: ServiceRequest, credentials: BearerAuth) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let db = match req.app_data::<web::Data<Arc<PostgresService>>>() {
        Some(db) => Arc::clone(db.get_ref()),
        None => {
            warn!("PostgresService missing from app data");
            return Err((ErrorUnauthorized("Invalid token"), req));
        }
    };

    if token_valid(&db, credentials.token()).await {
        Ok(req)
    } else {
        Err((ErrorUnauthorized("Invalid token"), req))
    }
}
