//! Table view: every form data row with its query status.

use crate::client::ApiClient;
use crate::error::CliError;
use crate::table::TableState;

pub async fn run(client: &ApiClient) -> Result<(), CliError> {
    let response = client.get_form_data().await?;
    let state = TableState::new(response);
    println!("{}", state.render());
    Ok(())
}
