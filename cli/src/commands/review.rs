//! Interactive review session.
//!
//! The table is fetched once on entry and then only patched in response
//! to server-confirmed actions. A failed call leaves the local table
//! exactly as it was.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use crate::client::ApiClient;
use crate::commands::query::print_query_details;
use crate::error::CliError;
use crate::table::{TableAction, TableState};
use querydesk_models::{CreateQueryRequest, QueryStatus};

pub async fn run(client: &ApiClient) -> Result<(), CliError> {
    let response = client.get_form_data().await?;
    let mut state = TableState::new(response);

    println!("{}", state.render());
    println!();
    println!("Commands: add <row> <description>, resolve <row>, delete <row>, show <row>, list, quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let result = match command {
            "quit" | "q" => break,
            "list" => {
                println!("{}", state.render());
                Ok(())
            }
            "add" => add(client, &mut state, rest).await,
            "resolve" => resolve(client, &mut state, rest).await,
            "delete" => delete(client, &mut state, rest).await,
            "show" => show(&state, rest),
            _ => {
                println!("Unknown command: {command}");
                Ok(())
            }
        };

        // The table is only ever patched after a confirmed response, so an
        // error here means it is stale at worst, never wrong.
        if let Err(e) = result {
            error!("{}", e);
        }
    }

    Ok(())
}

fn lookup_row(state: &TableState, token: &str) -> Result<usize, CliError> {
    let number: usize = token
        .parse()
        .map_err(|_| CliError::InvalidInput(format!("Not a row number: {token}")))?;
    if state.row(number).is_none() {
        return Err(CliError::InvalidInput(format!("No row {number}")));
    }
    Ok(number)
}

async fn add(client: &ApiClient, state: &mut TableState, rest: &str) -> Result<(), CliError> {
    let (row_token, description) = rest
        .split_once(' ')
        .ok_or_else(|| CliError::InvalidInput("Usage: add <row> <description>".to_string()))?;

    if description.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Description cannot be empty".to_string(),
        ));
    }

    let number = lookup_row(state, row_token)?;
    let row = state.row(number).unwrap();
    if let Some(existing) = &row.query {
        return Err(CliError::InvalidInput(format!(
            "Row {number} already has query {}",
            existing.id
        )));
    }

    let request = CreateQueryRequest {
        title: format!("Query for {}", row.question),
        description: Some(description.trim().to_string()),
        form_data_id: row.id.clone(),
    };

    let query = client.create_query(request).await?;
    println!("Created query {}", query.id);

    state.apply(TableAction::QueryCreated(query));
    println!("{}", state.render());
    Ok(())
}

async fn resolve(client: &ApiClient, state: &mut TableState, rest: &str) -> Result<(), CliError> {
    let number = lookup_row(state, rest.trim())?;
    let row = state.row(number).unwrap();
    let query_id = match &row.query {
        Some(query) => query.id.clone(),
        None => {
            return Err(CliError::InvalidInput(format!("Row {number} has no query")));
        }
    };

    let query = client
        .update_query_status(&query_id, QueryStatus::Resolved)
        .await?;
    println!("Query {} is now {}", query.id, query.status);

    state.apply(TableAction::QueryUpdated(query));
    println!("{}", state.render());
    Ok(())
}

async fn delete(client: &ApiClient, state: &mut TableState, rest: &str) -> Result<(), CliError> {
    let number = lookup_row(state, rest.trim())?;
    let row = state.row(number).unwrap();
    let (form_data_id, query_id) = match &row.query {
        Some(query) => (row.id.clone(), query.id.clone()),
        None => {
            return Err(CliError::InvalidInput(format!("Row {number} has no query")));
        }
    };

    let response = client.delete_query(&query_id).await?;
    println!("{}", response.message);

    state.apply(TableAction::QueryDeleted { form_data_id });
    println!("{}", state.render());
    Ok(())
}

fn show(state: &TableState, rest: &str) -> Result<(), CliError> {
    let number = lookup_row(state, rest.trim())?;
    let row = state.row(number).unwrap();
    match &row.query {
        Some(query) => {
            print_query_details(query, &row.question, &row.answer);
            Ok(())
        }
        None => Err(CliError::InvalidInput(format!("Row {number} has no query"))),
    }
}
