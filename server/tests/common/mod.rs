use actix_web::web;
use querydesk_models::{FormData, Query};
use querydesk_server::database::Database;
use querydesk_server::handlers::AppState;
use std::sync::Arc;
use std::time::SystemTime;
use tempfile::TempDir;

/// TestApp provides a fully configured test application with an isolated
/// database file.
pub struct TestApp {
    pub database: Arc<Database>,
    pub app_state: web::Data<AppState>,
    // Keeps the database directory alive for the duration of the test.
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let database = Arc::new(Database::new(&temp_dir.path().join("querydesk.db")).unwrap());

        let app_state = web::Data::new(AppState {
            database: Arc::clone(&database),
            start_time: SystemTime::now(),
        });

        Self {
            database,
            app_state,
            _temp_dir: temp_dir,
        }
    }

    pub fn app_state(&self) -> &web::Data<AppState> {
        &self.app_state
    }

    pub fn db(&self) -> &Arc<Database> {
        &self.database
    }

    /// Insert a form data row directly, the way the seed process would.
    pub fn seed_form_data(&self, question: &str, answer: &str) -> FormData {
        let entry = FormData::new(question.to_string(), answer.to_string());
        self.database.create_form_data(&entry).unwrap();
        entry
    }

    /// Attach an open query to an existing row.
    pub fn seed_query(&self, form_data_id: &str, title: &str) -> Query {
        let query = Query::new(
            title.to_string(),
            Some("seeded for test".to_string()),
            form_data_id.to_string(),
        );
        self.database.create_query(&query).unwrap();
        query
    }
}
