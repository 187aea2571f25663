use super::main_handlers::AppState;
use crate::error::AppError;
use actix_web::{web, HttpResponse, Result};
use querydesk_models::{CreateQueryRequest, DeleteQueryResponse, Query, UpdateQueryStatusRequest};

pub async fn create_query(
    data: web::Data<AppState>,
    request: web::Json<CreateQueryRequest>,
) -> Result<HttpResponse, AppError> {
    let req = request.into_inner();

    // The referenced row must exist before anything is inserted.
    let form_data = data.database.get_form_data_by_id(&req.form_data_id)?;

    if let Some(existing) = data.database.get_query_by_form_data_id(&form_data.id)? {
        return Err(AppError::Conflict(format!(
            "Form data {} already has query {}",
            form_data.id, existing.id
        )));
    }

    let query = Query::new(req.title, req.description, req.form_data_id);
    data.database.create_query(&query)?;

    Ok(HttpResponse::Created().json(query))
}

/// Permissive transition function: both directions are accepted and
/// repeating a transition is a no-op at the data level.
pub async fn update_query_status(
    data: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<UpdateQueryStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let query_id = path.into_inner();

    data.database.get_query_by_id(&query_id)?;

    let updated = data
        .database
        .update_query_status(&query_id, request.status)?;

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_query(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let query_id = path.into_inner();

    data.database.get_query_by_id(&query_id)?;
    data.database.delete_query(&query_id)?;

    Ok(HttpResponse::Ok().json(DeleteQueryResponse {
        message: "Query deleted successfully".to_string(),
    }))
}
