pub mod login;
pub mod register;
pub mod reset_password;
pub mod send_code;
pub mod verify_code;

use crate::types::error::AppError;
use crate::utils::token::{construct_token, hash_or_internal, new_token};

/// Fresh session: the token for the client and the hash to store.
pub(crate) fn new_session(user_id: &uuid::Uuid) -> Result<(String, String), AppError> {
    let secret = new_token();
    let hash = hash_or_internal(&secret)?;
    Ok((construct_token(user_id, &secret), hash))
}
