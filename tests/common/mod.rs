#![allow(dead_code)]

use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;
use patience_lion::config::{EnvConfig, MailConfig, StockConfig, VerificationConfig, CONFIG};
use patience_lion::db::postgres_service::PostgresService;

pub mod client;

pub struct TestContext {
    pub db: Arc<PostgresService>,
    pub _container: ContainerAsync<Postgres>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        Self::with_config(get_test_config()).await
    }

    /// Each test binary is its own process, so the first config set wins for the whole file.
    pub async fn with_config(config: EnvConfig) -> TestContext {
        let _ = CONFIG.set(config);

        let postgres = Postgres::default();
        let container = postgres.start().await.expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container.get_host_port_ipv4(5432).await.expect("Failed to get port");

        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = Arc::new(
            PostgresService::new(&db_url)
                .await
                .expect("Failed to initialize PostgresService")
        );

        TestContext {
            db,
            _container: container,
        }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "test".to_string(), // Not used in tests
        utc_offset_minutes: 9 * 60,
        mail: MailConfig {
            resend_key: None, // log-only
            endpoint: "http://127.0.0.1:9/emails".to_string(),
            from: "test@patience-lion.app".to_string(),
        },
        verification: VerificationConfig {
            ttl_minutes: 10,
            resend_cooldown_secs: 60,
        },
        stocks: StockConfig {
            symbols: vec!["AAPL".to_string()],
            quote_url: "http://127.0.0.1:9/unused".to_string(),
            ttl_secs: 600,
        },
    }
}

// Test data helpers
pub mod test_data {
    use patience_lion::types::user::RRegister;

    pub fn sample_register(username: &str, email: &str, code: &str) -> RRegister {
        RRegister {
            username: username.to_string(),
            password: "roar1234".to_string(),
            nickname: format!("{username}-nick"),
            email: email.to_string(),
            code: code.to_string(),
        }
    }
}
