use serde::{Deserialize, Serialize};

use crate::types::error::AppError;

pub const MAX_ITEM_NAME_LEN: usize = 100;
pub const MAX_ABS_PRICE: i64 = 100_000_000;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateItem {
    pub name: String,
    /// Positive: money kept. Negative: money spent anyway.
    pub price: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct ItemQuery {
    pub period: Option<String>,
}

impl CreateItem {
    /// Returns the trimmed name on success.
    pub fn validate(&self) -> Result<String, AppError> {
        let name = self.name.trim();
        let len = name.chars().count();
        if len == 0 || len > MAX_ITEM_NAME_LEN {
            return Err(AppError::Validation(format!(
                "item name must be 1 to {MAX_ITEM_NAME_LEN} characters"
            )));
        }
        if self.price == 0 {
            return Err(AppError::Validation("price must not be zero".to_string()));
        }
        if self.price.abs() > MAX_ABS_PRICE {
            return Err(AppError::Validation(format!(
                "price must be within ±{MAX_ABS_PRICE}"
            )));
        }
        Ok(name.to_string())
    }
}
