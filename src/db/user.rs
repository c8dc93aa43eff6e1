use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, user::{DBUserCreate, PublicProfile}, verification::CodePurpose};
use chrono::{DateTime, Utc};
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

impl PostgresService {
    pub async fn user_exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(Column::Username.eq(username))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    /// Insert on any connection so registration can share the code-consuming transaction.
    pub(crate) async fn insert_user<C: ConnectionTrait>(
        conn: &C,
        payload: DBUserCreate,
        email_verified: bool,
    ) -> Result<UserModel, AppError> {
        let now = Utc::now();
        Ok(UserActive {
            id: Set(payload.id),
            username: Set(payload.username),
            password_hash: Set(payload.password_hash),
            nickname: Set(payload.nickname),
            email: Set(payload.email),
            email_verified: Set(email_verified),
            token_hash: Set(payload.token_hash),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await?)
    }

    /// Seeds an account directly, bypassing email verification. No route calls this;
    /// HTTP registration goes through `register_user`.
    #[doc(hidden)]
    pub async fn create_user(&self, payload: DBUserCreate) -> Result<UserModel, AppError> {
        if self.user_exists_by_username(&payload.username).await?
            || self.user_exists_by_email(&payload.email).await?
        {
            return Err(AppError::AlreadyExists);
        }
        Self::insert_user(&self.database_connection, payload, false).await
    }

    /// Consumes the register code and creates the user in one transaction.
    pub async fn register_user(
        &self,
        payload: DBUserCreate,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<UserModel, AppError> {
        if self.user_exists_by_username(&payload.username).await? {
            return Err(AppError::Conflict("username already taken".into()));
        }
        if self.user_exists_by_email(&payload.email).await? {
            return Err(AppError::Conflict("email already registered".into()));
        }

        let txn = self.database_connection.begin().await?;
        Self::consume_code(&txn, &payload.email, code, CodePurpose::Register, now).await?;
        let user = Self::insert_user(&txn, payload, true).await?;
        txn.commit().await?;
        Ok(user)
    }

    /// Consumes the reset code, then swaps the password and session hashes.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        password_hash: String,
        token_hash: String,
        now: DateTime<Utc>,
    ) -> Result<UserModel, AppError> {
        let user = self.get_user_by_email(email).await?;

        let txn = self.database_connection.begin().await?;
        Self::consume_code(&txn, email, code, CodePurpose::Reset, now).await?;
        let mut am: UserActive = user.into();
        am.password_hash = Set(password_hash);
        am.token_hash = Set(token_hash);
        am.updated_at = Set(now);
        let user = am.update(&txn).await?;
        txn.commit().await?;
        Ok(user)
    }

    pub async fn set_user_token_hash(&self, user_id: &Uuid, token_hash: String) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(user_id).await?.into();
        am.token_hash = Set(token_hash);
        am.updated_at = Set(Utc::now());
        am.update(&self.database_connection).await?;
        Ok(())
    }

    pub async fn update_user_nickname(&self, user_id: Uuid, nickname: String) -> Result<(), AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.nickname = Set(nickname);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await.map(|_| ())?)
    }

    /// Totals across all items, including lapses.
    pub async fn get_public_profile(&self, user_id: &Uuid) -> Result<PublicProfile, AppError> {
        let stmt = self.statement(
            r#"
            SELECT u.id,
                   u.nickname,
                   u.created_at,
                   COALESCE(SUM(i.price), 0)::BIGINT AS total_saved,
                   COUNT(i.id)::BIGINT AS item_count
            FROM users u
            LEFT JOIN items i ON i.user_id = u.id
            WHERE u.id = $1
            GROUP BY u.id, u.nickname, u.created_at
            "#,
            [(*user_id).into()],
        );
        Ok(PublicProfile::find_by_statement(stmt)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }
}
