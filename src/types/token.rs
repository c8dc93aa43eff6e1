use base64::{prelude::BASE64_STANDARD, Engine};
use uuid::Uuid;

/// Bearer token handed to clients: `base64("<user id>.<secret>")`.
pub fn construct_token(user_id: &Uuid, secret: &str) -> String {
    BASE64_STANDARD.encode(format!("{user_id}.{secret}"))
}
