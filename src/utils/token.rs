use base64::{engine::general_purpose::URL_SAFE_NO_PAD, prelude::BASE64_STANDARD, Engine as _};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use nanoid::nanoid;
use rand_core::{OsRng, RngCore};
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;

pub use crate::types::token::construct_token;

const GROUP_CODE_ALPHABET: [char; 36] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];
pub const GROUP_CODE_LEN: usize = 6;
pub const VERIFICATION_CODE_LEN: usize = 6;

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

pub fn new_token() -> String {
    let mut buf = [0u8; 32];
    let mut rng = OsRng;
    rng.fill_bytes(&mut buf);
    format!("tok_{}", URL_SAFE_NO_PAD.encode(buf))
}

/// Join code shown to group members, e.g. `K3Z9QA`.
pub fn new_group_code() -> String {
    nanoid!(GROUP_CODE_LEN, &GROUP_CODE_ALPHABET)
}

/// Zero-padded six digit one-time code.
pub fn new_verification_code() -> String {
    let n = OsRng.next_u32() % 1_000_000;
    format!("{n:0width$}", width = VERIFICATION_CODE_LEN)
}

pub fn encrypt(secret: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default().hash_password(secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify(secret: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default().verify_password(secret.as_bytes(), &parsed).is_ok())
}

pub fn hash_or_internal(secret: &str) -> Result<String, AppError> {
    encrypt(secret).map_err(|e| AppError::Internal(format!("hashing failed: {e}")))
}

/// Splits a bearer token into the user id and the raw secret.
pub fn extract_token_parts(token: &str) -> Option<(Uuid, String)> {
    let decoded = BASE64_STANDARD.decode(token.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (id, secret) = decoded.split_once('.')?;
    if secret.is_empty() {
        return None;
    }
    Some((Uuid::parse_str(id).ok()?, secret.to_string()))
}

pub async fn token_valid(db: &PostgresService, token: &str) -> bool {
    let Some((user_id, secret)) = extract_token_parts(token) else {
        return false;
    };
    match db.get_user_by_id(&user_id).await {
        Ok(user) => verify(&secret, &user.token_hash).unwrap_or(false),
        Err(_) => false,
    }
}

/// Caller id for handlers behind `validate_token`.
pub fn require_user_id(auth: &BearerAuth) -> Result<Uuid, AppError> {
    extract_token_parts(auth.token())
        .map(|(id, _)| id)
        .ok_or(AppError::Unauthorized)
}
