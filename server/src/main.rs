mod config;
mod database;
mod error;
mod handlers;
mod routes;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::{Arg, Command};
use config::AppConfig;
use database::Database;
use error::AppResult;
use handlers::AppState;
use routes::configure_routes;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[actix_web::main]
async fn main() -> AppResult<()> {
    let matches = Command::new("querydesk-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("querydesk - query management backend for form data review")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file")
                .value_name("FILE"),
        )
        .get_matches();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env().add_directive("querydesk_server=info".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting querydesk server");

    let config = match matches.get_one::<String>("config") {
        Some(path) => AppConfig::load_from_file(Path::new(path))?,
        None => AppConfig::load()?,
    };

    let database = Arc::new(Database::new(&config.database.path)?);
    tracing::info!("Database initialized at {:?}", config.database.path);

    let app_state = web::Data::new(AppState {
        database,
        start_time: SystemTime::now(),
    });

    // The web client is served from its own origin.
    let allowed_origins = config
        .cors
        .as_ref()
        .map(|c| c.allowed_origins.clone())
        .unwrap_or_default();

    let server_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting HTTP server on {}", server_addr);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
            .allow_any_header();
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}
