use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Shared models for the querydesk server and CLI client.
//
// Field names are camelCase on the wire because the web client pins them
// that way; timestamps are epoch seconds.

/// Lifecycle of a query. Deserialization rejects anything outside the two
/// values, so an out-of-range status never reaches a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QueryStatus {
    Open,
    Resolved,
}

impl QueryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Open => "OPEN",
            QueryStatus::Resolved => "RESOLVED",
        }
    }
}

impl std::fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A question/answer pair under review. Created by the seed process only;
/// the API never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub id: String,
    pub question: String,
    pub answer: String,
}

impl FormData {
    pub fn new(question: String, answer: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question,
            answer,
        }
    }
}

/// A follow-up annotation attached to exactly one form data row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: QueryStatus,
    pub created_at: i64,
    pub updated_at: i64,
    pub form_data_id: String,
}

impl Query {
    pub fn new(title: String, description: Option<String>, form_data_id: String) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            status: QueryStatus::Open,
            created_at: now,
            updated_at: now,
            form_data_id,
        }
    }
}

/// One row of the list response: the form data entry with its query
/// inlined, or `null` when none is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDataWithQuery {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub query: Option<Query>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDataListResponse {
    pub total: usize,
    pub form_data: Vec<FormDataWithQuery>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQueryRequest {
    pub title: String,
    pub description: Option<String>,
    pub form_data_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateQueryStatusRequest {
    pub status: QueryStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteQueryResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerStatus {
    pub status: String,
    pub version: String,
    pub uptime: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_uppercase() {
        assert_eq!(serde_json::to_string(&QueryStatus::Open).unwrap(), "\"OPEN\"");
        assert_eq!(
            serde_json::to_string(&QueryStatus::Resolved).unwrap(),
            "\"RESOLVED\""
        );
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(serde_json::from_str::<QueryStatus>("\"CLOSED\"").is_err());
        assert!(serde_json::from_str::<QueryStatus>("\"open\"").is_err());
    }

    #[test]
    fn new_query_starts_open_with_matching_timestamps() {
        let query = Query::new(
            "Query for Q1".to_string(),
            Some("needs detail".to_string()),
            "fd-1".to_string(),
        );
        assert_eq!(query.status, QueryStatus::Open);
        assert_eq!(query.created_at, query.updated_at);
        assert!(!query.id.is_empty());
    }

    #[test]
    fn wire_fields_are_camel_case() {
        let query = Query::new("t".to_string(), None, "fd-1".to_string());
        let value = serde_json::to_value(&query).unwrap();
        assert!(value.get("formDataId").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("form_data_id").is_none());

        let request: CreateQueryRequest = serde_json::from_str(
            r#"{"title":"Query for Q1","description":"d","formDataId":"fd-1"}"#,
        )
        .unwrap();
        assert_eq!(request.form_data_id, "fd-1");
    }
}
