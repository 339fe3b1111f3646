pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod state;

use std::error::Error;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::TokenVerifier;
use crate::config::{AllowedOrigins, AppConfig};
use crate::handlers::ApiDoc;
use crate::state::AppState;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("{} pending migration(s) applied", applied.len());
    Ok(())
}

fn cors(origins: &AllowedOrigins) -> Cors {
    match origins {
        AllowedOrigins::Any => Cors::permissive(),
        AllowedOrigins::List(list) => list
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials(),
    }
}

/// Build and return an actix-web `Server` bound to the configured host/port.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(state: AppState, config: &AppConfig) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    let verifier = web::Data::new(TokenVerifier::new(&config.jwt_secret, &config.jwt_audience));
    let origins = config.allowed_origins.clone();
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(verifier.clone())
            .wrap(cors(&origins))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(handlers::configure)
    })
    .bind((config.host.clone(), config.port))?
    .run())
}
