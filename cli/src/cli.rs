use clap::{Parser, Subcommand};

use crate::client::ApiClient;
use crate::commands;
use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "querydesk")]
#[command(about = "Review form data and track follow-up queries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Base URL of the querydesk server
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the form data table with query status
    List,

    /// Operations on a row's query
    Query {
        #[command(subcommand)]
        action: QueryCommands,
    },

    /// Interactive review session over the whole table
    Review,
}

#[derive(Debug, Subcommand)]
pub enum QueryCommands {
    /// Open a new query against a form data row
    Add {
        /// Id of the form data row to annotate
        form_data_id: String,

        /// What needs to be followed up on
        description: String,
    },

    /// Mark a query resolved
    Resolve {
        /// Id of the query
        query_id: String,
    },

    /// Delete a query
    Delete {
        /// Id of the query
        query_id: String,
    },

    /// Show all fields of a query
    Show {
        /// Id of the query
        query_id: String,
    },
}

impl Cli {
    pub async fn run(&self) -> Result<(), CliError> {
        let server_url = self
            .server_url
            .clone()
            .or_else(|| std::env::var("QUERYDESK_SERVER_URL").ok());
        let client = ApiClient::new(server_url);

        match &self.command {
            Commands::List => commands::list::run(&client).await,
            Commands::Query { action } => {
                commands::query::handle_query_command(&client, action).await
            }
            Commands::Review => commands::review::run(&client).await,
        }
    }
}
