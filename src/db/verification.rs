use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, verification::CodePurpose};
use crate::utils::token::new_verification_code;
use chrono::{DateTime, Duration, Utc};
use entity::verification_code::{ActiveModel as CodeActive, Column, Entity as Code, Model as CodeModel};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

/// Used or expired codes are kept this long before being purged.
const CODE_RETENTION_HOURS: i64 = 24;

impl PostgresService {
    async fn latest_code<C: ConnectionTrait>(
        conn: &C,
        email: &str,
        purpose: CodePurpose,
    ) -> Result<Option<CodeModel>, AppError> {
        Ok(Code::find()
            .filter(Column::Email.eq(email))
            .filter(Column::Purpose.eq(purpose.as_str()))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .one(conn)
            .await?)
    }

    async fn active_code<C: ConnectionTrait>(
        conn: &C,
        email: &str,
        purpose: CodePurpose,
        now: DateTime<Utc>,
    ) -> Result<Option<CodeModel>, AppError> {
        Ok(Self::latest_code(conn, email, purpose)
            .await?
            .filter(|c| !c.used && c.expires_at > now))
    }

    /// Stores a fresh code and retires the older ones. Returns the plain code for mailing.
    pub async fn issue_code(
        &self,
        email: &str,
        purpose: CodePurpose,
        ttl: Duration,
        cooldown: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        if let Some(last) = Self::latest_code(&self.database_connection, email, purpose).await? {
            let wait = last.created_at + cooldown - now;
            if wait > Duration::zero() {
                return Err(AppError::RateLimited(format!(
                    "wait {} seconds before requesting another code",
                    wait.num_seconds().max(1)
                )));
            }
        }

        Code::update_many()
            .col_expr(Column::Used, Expr::value(true))
            .filter(Column::Email.eq(email))
            .filter(Column::Purpose.eq(purpose.as_str()))
            .filter(Column::Used.eq(false))
            .exec(&self.database_connection)
            .await?;

        let code = new_verification_code();
        CodeActive {
            email: Set(email.to_string()),
            code: Set(code.clone()),
            purpose: Set(purpose.as_str().to_string()),
            expires_at: Set(now + ttl),
            used: Set(false),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await?;

        let purged = self.purge_stale_codes(now).await?;
        if purged > 0 {
            info!("purged {purged} stale verification codes");
        }

        Ok(code)
    }

    /// Read-only check for the UI; does not burn the code.
    pub async fn check_code(
        &self,
        email: &str,
        code: &str,
        purpose: CodePurpose,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        Ok(Self::active_code(&self.database_connection, email, purpose, now)
            .await?
            .is_some_and(|c| c.code == code))
    }

    /// Marks the matching code used. Fails if it is wrong, expired or already spent.
    pub(crate) async fn consume_code<C: ConnectionTrait>(
        conn: &C,
        email: &str,
        code: &str,
        purpose: CodePurpose,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let invalid = || AppError::Validation("invalid or expired verification code".to_string());
        let active = Self::active_code(conn, email, purpose, now)
            .await?
            .filter(|c| c.code == code)
            .ok_or_else(invalid)?;

        // guarded update so two concurrent consumers cannot both win
        let res = Code::update_many()
            .col_expr(Column::Used, Expr::value(true))
            .filter(Column::Id.eq(active.id))
            .filter(Column::Used.eq(false))
            .exec(conn)
            .await?;
        if res.rows_affected != 1 {
            return Err(invalid());
        }
        Ok(())
    }

    /// Drops a code that never reached the user so the cooldown does not hold up a retry.
    pub async fn revoke_code(&self, email: &str, code: &str, purpose: CodePurpose) -> Result<(), AppError> {
        Code::delete_many()
            .filter(Column::Email.eq(email))
            .filter(Column::Code.eq(code))
            .filter(Column::Purpose.eq(purpose.as_str()))
            .filter(Column::Used.eq(false))
            .exec(&self.database_connection)
            .await?;
        Ok(())
    }

    pub async fn purge_stale_codes(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let cutoff = now - Duration::hours(CODE_RETENTION_HOURS);
        let res = Code::delete_many()
            .filter(
                Condition::any()
                    .add(Column::ExpiresAt.lt(cutoff))
                    .add(Column::Used.eq(true).and(Column::CreatedAt.lt(cutoff))),
            )
            .exec(&self.database_connection)
            .await?;
        Ok(res.rows_affected)
    }
}
