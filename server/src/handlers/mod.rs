pub mod form_data_handlers;
pub mod main_handlers;
pub mod query_handlers;

pub use main_handlers::AppState;
