use std::io;

use dotenvy::dotenv;
use storefront_service::config::AppConfig;
use storefront_service::infrastructure::notifier::Notifier;
use storefront_service::state::AppState;
use storefront_service::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let pool = create_pool(&config.database_url, config.db_pool_size).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    let notifier = Notifier::from_url(config.welcome_webhook_url.as_deref());
    let state = AppState::new(pool, config.order_pricing, notifier);

    log::info!(
        "Starting server at http://{}:{} (order pricing: {:?})",
        config.host,
        config.port,
        config.order_pricing
    );

    build_server(state, &config)?.await
}
