use crate::error::CliError;
use querydesk_models::{
    CreateQueryRequest, DeleteQueryResponse, FormDataListResponse, Query, QueryStatus,
    UpdateQueryStatusRequest,
};
use tracing::debug;

/// HTTP client for the querydesk server. One method per endpoint; nothing
/// is cached here.
pub struct ApiClient {
    http_client: reqwest::Client,
    server_url: String,
}

impl ApiClient {
    pub fn new(server_url: Option<String>) -> Self {
        let server_url = server_url.unwrap_or_else(|| "http://localhost:8080".to_string());
        Self {
            http_client: reqwest::Client::new(),
            server_url,
        }
    }

    pub async fn get_form_data(&self) -> Result<FormDataListResponse, CliError> {
        let url = format!("{}/form-data", self.server_url);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CliError::Communication(format!("HTTP request failed: {}", e)))?;

        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| CliError::Communication(format!("Failed to parse response: {}", e)))
    }

    pub async fn create_query(&self, request: CreateQueryRequest) -> Result<Query, CliError> {
        let url = format!("{}/queries", self.server_url);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CliError::Communication(format!("HTTP request failed: {}", e)))?;

        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| CliError::Communication(format!("Failed to parse response: {}", e)))
    }

    pub async fn update_query_status(
        &self,
        query_id: &str,
        status: QueryStatus,
    ) -> Result<Query, CliError> {
        let url = format!("{}/queries/{}", self.server_url, query_id);
        debug!("PATCH {}", url);

        let response = self
            .http_client
            .patch(&url)
            .json(&UpdateQueryStatusRequest { status })
            .send()
            .await
            .map_err(|e| CliError::Communication(format!("HTTP request failed: {}", e)))?;

        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| CliError::Communication(format!("Failed to parse response: {}", e)))
    }

    pub async fn delete_query(&self, query_id: &str) -> Result<DeleteQueryResponse, CliError> {
        let url = format!("{}/queries/{}", self.server_url, query_id);
        debug!("DELETE {}", url);

        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .map_err(|e| CliError::Communication(format!("HTTP request failed: {}", e)))?;

        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| CliError::Communication(format!("Failed to parse response: {}", e)))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CliError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(CliError::Api(format!("HTTP {} error: {}", status, error_text)))
    }
}
