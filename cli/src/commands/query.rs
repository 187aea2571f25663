//! Row-level query operations: add, resolve, delete, show.

use crate::cli::QueryCommands;
use crate::client::ApiClient;
use crate::error::CliError;
use chrono::DateTime;
use querydesk_models::{CreateQueryRequest, Query, QueryStatus};

pub async fn handle_query_command(
    client: &ApiClient,
    action: &QueryCommands,
) -> Result<(), CliError> {
    match action {
        QueryCommands::Add {
            form_data_id,
            description,
        } => add_query(client, form_data_id, description).await,
        QueryCommands::Resolve { query_id } => resolve_query(client, query_id).await,
        QueryCommands::Delete { query_id } => delete_query(client, query_id).await,
        QueryCommands::Show { query_id } => show_query(client, query_id).await,
    }
}

async fn add_query(
    client: &ApiClient,
    form_data_id: &str,
    description: &str,
) -> Result<(), CliError> {
    if description.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Description cannot be empty".to_string(),
        ));
    }

    // The title is derived from the row's question, so the table is
    // fetched first.
    let response = client.get_form_data().await?;
    let row = response
        .form_data
        .iter()
        .find(|r| r.id == form_data_id)
        .ok_or_else(|| {
            CliError::InvalidInput(format!("No form data row with id {form_data_id}"))
        })?;

    if let Some(existing) = &row.query {
        return Err(CliError::InvalidInput(format!(
            "Row already has query {}",
            existing.id
        )));
    }

    let request = CreateQueryRequest {
        title: format!("Query for {}", row.question),
        description: Some(description.to_string()),
        form_data_id: row.id.clone(),
    };
    let query = client.create_query(request).await?;

    println!("Created query {} ({})", query.id, query.status);
    Ok(())
}

async fn resolve_query(client: &ApiClient, query_id: &str) -> Result<(), CliError> {
    let query = client
        .update_query_status(query_id, QueryStatus::Resolved)
        .await?;
    println!("Query {} is now {}", query.id, query.status);
    Ok(())
}

async fn delete_query(client: &ApiClient, query_id: &str) -> Result<(), CliError> {
    let response = client.delete_query(query_id).await?;
    println!("{}", response.message);
    Ok(())
}

async fn show_query(client: &ApiClient, query_id: &str) -> Result<(), CliError> {
    let response = client.get_form_data().await?;
    let row = response
        .form_data
        .iter()
        .find(|r| r.query.as_ref().is_some_and(|q| q.id == query_id))
        .ok_or_else(|| CliError::InvalidInput(format!("No query with id {query_id}")))?;

    // The find above guarantees the query is present.
    let query = row.query.as_ref().unwrap();
    print_query_details(query, &row.question, &row.answer);
    Ok(())
}

pub fn print_query_details(query: &Query, question: &str, answer: &str) {
    println!("Query {}", query.id);
    println!("  Title:       {}", query.title);
    println!(
        "  Description: {}",
        query.description.as_deref().unwrap_or("-")
    );
    println!("  Status:      {}", query.status);
    println!("  Created:     {}", format_timestamp(query.created_at));
    println!("  Updated:     {}", format_timestamp(query.updated_at));
    println!("  Row:         {}", query.form_data_id);
    println!("  Question:    {}", question);
    println!("  Answer:      {}", answer);
}

fn format_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => timestamp.to_string(),
    }
}
