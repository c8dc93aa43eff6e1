use actix_web::{middleware::Logger, web, App, HttpServer};
use patience_lion::config::{EnvConfig, CONFIG};
use patience_lion::db::postgres_service::PostgresService;
use patience_lion::routes::configure_routes;
use patience_lion::utils::stocks::{StockCache, YahooQuotes};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let config = CONFIG.get_or_init(EnvConfig::from_env);
    let addr = format!("0.0.0.0:{}", config.port);

    let postgres_service = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .map_err(|e| io::Error::other(format!("Failed to initialize PostgresService: {e}")))?,
    );

    let quotes = YahooQuotes::new(&config.stocks).map_err(io::Error::other)?;
    let stock_cache = web::Data::new(StockCache::new(
        Arc::new(quotes),
        Duration::from_secs(config.stocks.ttl_secs),
    ));

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&postgres_service)))
            .app_data(stock_cache.clone())
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
