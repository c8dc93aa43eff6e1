use actix_web::{web, App};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use entity::user::Model as UserModel;
use patience_lion::{
    db::postgres_service::PostgresService,
    routes::configure_routes,
    types::{stock::StockQuote, user::DBUserCreate, verification::CodePurpose},
    utils::{
        stocks::{QuoteSource, StockCache},
        token::{construct_token, encrypt, new_id, new_token},
    },
};
use std::sync::Arc;

pub struct StaticQuotes;

#[async_trait]
impl QuoteSource for StaticQuotes {
    async fn fetch(&self) -> Result<Vec<StockQuote>, String> {
        Ok(vec![StockQuote {
            symbol: "005930.KS".to_string(),
            name: "Samsung Electronics".to_string(),
            price: 71_200.0,
            currency: "KRW".to_string(),
        }])
    }
}

pub struct TestClient {
    pub db: Arc<PostgresService>,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>) -> Self {
        TestClient { db }
    }

    #[allow(dead_code)]
    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let stocks = StockCache::new(Arc::new(StaticQuotes), std::time::Duration::from_secs(600));
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(stocks))
            .configure(configure_routes)
    }

    /// Inserts a user straight into the database and returns a working bearer token.
    #[allow(dead_code)]
    pub async fn create_test_user(&self, username: &str) -> (UserModel, String) {
        let id = new_id();
        let secret = new_token();
        let user = self.db.create_user(DBUserCreate {
            id,
            username: username.to_string(),
            password_hash: encrypt("roar1234").expect("Failed to hash password"),
            nickname: format!("{username}-nick"),
            email: format!("{username}@test.com"),
            token_hash: encrypt(&secret).expect("Failed to encrypt token"),
        }).await.expect("Failed to create user");

        (user, construct_token(&id, &secret))
    }

    /// Issues a code directly, skipping the resend cooldown.
    #[allow(dead_code)]
    pub async fn issue_code(&self, email: &str, purpose: CodePurpose) -> String {
        self.db
            .issue_code(email, purpose, Duration::minutes(10), Duration::zero(), Utc::now())
            .await
            .expect("Failed to issue code")
    }

    #[allow(dead_code)]
    pub async fn log_item(&self, user: &UserModel, name: &str, price: i64, at: DateTime<Utc>) {
        self.db
            .create_item(user.id, name.to_string(), price, at)
            .await
            .expect("Failed to create item");
    }
}

#[allow(dead_code)]
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
