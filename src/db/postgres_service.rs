use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbBackend, DbErr, Statement, Value};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct PostgresService {
    pub(crate) database_connection: DatabaseConnection,
}

impl PostgresService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        info!("Connecting to PostgreSQL...");
        let mut opts = ConnectOptions::new(uri.to_owned());
        opts.max_connections(20)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);
        let database_connection = Database::connect(opts).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Connected to PostgreSQL.");
        Ok(Self { database_connection })
    }

    pub(crate) fn backend(&self) -> DbBackend {
        use sea_orm::ConnectionTrait;
        self.database_connection.get_database_backend()
    }

    pub(crate) fn statement<I>(&self, sql: &str, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        Statement::from_sql_and_values(self.backend(), sql, values)
    }
}
