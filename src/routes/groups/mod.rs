pub mod create;
pub mod delete;
pub mod detail;
pub mod join;
pub mod leave;
pub mod list;

use crate::types::error::AppError;
use uuid::Uuid;

pub(crate) fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid {what} ID. Failed UUID parse.")))
}
