use super::main_handlers::AppState;
use crate::error::AppError;
use actix_web::{web, HttpResponse, Result};
use querydesk_models::FormDataListResponse;

/// Every form data row with its query inlined, or `null` when none is
/// attached. No filtering, sorting, or pagination.
pub async fn get_form_data(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let entries = data.database.get_all_form_data()?;

    let response = FormDataListResponse {
        total: entries.len(),
        form_data: entries,
    };

    Ok(HttpResponse::Ok().json(response))
}
