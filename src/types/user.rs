use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::error::AppError;

pub const MIN_USERNAME_LEN: usize = 4;
pub const MIN_PASSWORD_LEN: usize = 4;
pub const MAX_NICKNAME_LEN: usize = 20;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RRegister {
    pub username: String,
    pub password: String,
    pub nickname: String,
    pub email: String,
    pub code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RLogin {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RResetPassword {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RUpdateProfile {
    pub nickname: String,
}

impl RUpdateProfile {
    /// Returns the trimmed nickname.
    pub fn validate(&self) -> Result<String, AppError> {
        validate_nickname(&self.nickname)?;
        Ok(self.nickname.trim().to_string())
    }
}

/// Row written by `PostgresService::register_user`; hashes are computed by the caller.
pub struct DBUserCreate {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub nickname: String,
    pub email: String,
    pub token_hash: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<entity::user::Model> for UserView {
    fn from(u: entity::user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            nickname: u.nickname,
            email: u.email,
            email_verified: u.email_verified,
            created_at: u.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, FromQueryResult)]
pub struct PublicProfile {
    pub id: Uuid,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub total_saved: i64,
    pub item_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthRes {
    pub user: UserView,
    pub token: String,
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Shape check only; ownership is proven by the emailed code.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let bad = || AppError::Validation("invalid email address".to_string());
    let (local, domain) = email.split_once('@').ok_or_else(bad)?;
    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
    {
        return Err(bad());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(bad()),
    }
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_nickname(nickname: &str) -> Result<(), AppError> {
    let len = nickname.trim().chars().count();
    if len == 0 || len > MAX_NICKNAME_LEN {
        return Err(AppError::Validation(format!(
            "nickname must be 1 to {MAX_NICKNAME_LEN} characters"
        )));
    }
    Ok(())
}

impl RRegister {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.username.trim().chars().count() < MIN_USERNAME_LEN {
            return Err(AppError::Validation(format!(
                "username must be at least {MIN_USERNAME_LEN} characters"
            )));
        }
        validate_password(&self.password)?;
        validate_nickname(&self.nickname)?;
        validate_email(&normalize_email(&self.email))
    }
}
