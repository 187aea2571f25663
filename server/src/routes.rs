//! Centralized route configuration for the querydesk API.
//!
//! Both the main server and the test servers build their apps from this
//! function so they always agree on routes and body handling.

use crate::error::AppError;
use crate::handlers::{form_data_handlers, main_handlers, query_handlers};
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed bodies (including out-of-range status values) go through
    // the same error taxonomy as handler failures.
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(format!("Invalid request body: {err}")).into()
    }))
    .route("/health", web::get().to(main_handlers::health_check))
    .route("/form-data", web::get().to(form_data_handlers::get_form_data))
    .service(
        web::scope("/queries")
            .route("", web::post().to(query_handlers::create_query))
            .route("/{id}", web::patch().to(query_handlers::update_query_status))
            .route("/{id}", web::delete().to(query_handlers::delete_query)),
    );
}
