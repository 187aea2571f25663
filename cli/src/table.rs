use querydesk_models::{FormDataListResponse, FormDataWithQuery, Query};

/// Client-side copy of the form data table.
///
/// This is the only place row data lives on the client. Commands mutate it
/// exclusively through [`TableState::apply`] after the server has
/// confirmed the change, so the list can never disagree with itself.
pub struct TableState {
    rows: Vec<FormDataWithQuery>,
}

/// A server-confirmed change to fold into the table.
pub enum TableAction {
    QueryCreated(Query),
    QueryUpdated(Query),
    QueryDeleted { form_data_id: String },
}

impl TableState {
    pub fn new(response: FormDataListResponse) -> Self {
        Self {
            rows: response.form_data,
        }
    }

    pub fn rows(&self) -> &[FormDataWithQuery] {
        &self.rows
    }

    /// Row by 1-based display index.
    pub fn row(&self, number: usize) -> Option<&FormDataWithQuery> {
        if number == 0 {
            return None;
        }
        self.rows.get(number - 1)
    }

    pub fn apply(&mut self, action: TableAction) {
        match action {
            TableAction::QueryCreated(query) | TableAction::QueryUpdated(query) => {
                if let Some(row) = self.rows.iter_mut().find(|r| r.id == query.form_data_id) {
                    row.query = Some(query);
                }
            }
            TableAction::QueryDeleted { form_data_id } => {
                if let Some(row) = self.rows.iter_mut().find(|r| r.id == form_data_id) {
                    row.query = None;
                }
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:>3}  {:<8}  {:<44}  {:<28}  {}\n",
            "#", "STATUS", "QUESTION", "ANSWER", "QUERY ID"
        ));

        for (index, row) in self.rows.iter().enumerate() {
            let (status, query_id) = match &row.query {
                Some(query) => (query.status.as_str(), query.id.as_str()),
                None => ("-", "-"),
            };
            out.push_str(&format!(
                "{:>3}  {:<8}  {:<44}  {:<28}  {}\n",
                index + 1,
                status,
                truncate(&row.question, 44),
                truncate(&row.answer, 28),
                query_id
            ));
        }

        out.push_str(&format!("{} rows", self.rows.len()));
        out
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max - 3).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querydesk_models::{FormData, QueryStatus};

    fn state_with_rows() -> (TableState, String) {
        let entry = FormData::new("Q1".to_string(), "A1".to_string());
        let form_data_id = entry.id.clone();
        let response = FormDataListResponse {
            total: 1,
            form_data: vec![FormDataWithQuery {
                id: entry.id,
                question: entry.question,
                answer: entry.answer,
                query: None,
            }],
        };
        (TableState::new(response), form_data_id)
    }

    #[test]
    fn created_query_attaches_to_its_row() {
        let (mut state, form_data_id) = state_with_rows();
        let query = Query::new("Query for Q1".to_string(), None, form_data_id);

        state.apply(TableAction::QueryCreated(query.clone()));

        let attached = state.rows()[0].query.as_ref().unwrap();
        assert_eq!(attached.id, query.id);
        assert_eq!(attached.status, QueryStatus::Open);
    }

    #[test]
    fn updated_query_replaces_the_old_copy() {
        let (mut state, form_data_id) = state_with_rows();
        let mut query = Query::new("t".to_string(), None, form_data_id);
        state.apply(TableAction::QueryCreated(query.clone()));

        query.status = QueryStatus::Resolved;
        state.apply(TableAction::QueryUpdated(query));

        assert_eq!(
            state.rows()[0].query.as_ref().unwrap().status,
            QueryStatus::Resolved
        );
    }

    #[test]
    fn deleted_query_clears_the_row() {
        let (mut state, form_data_id) = state_with_rows();
        let query = Query::new("t".to_string(), None, form_data_id.clone());
        state.apply(TableAction::QueryCreated(query));

        state.apply(TableAction::QueryDeleted { form_data_id });

        assert!(state.rows()[0].query.is_none());
    }

    #[test]
    fn action_for_unknown_row_is_a_no_op() {
        let (mut state, _) = state_with_rows();
        let query = Query::new("t".to_string(), None, "some-other-row".to_string());

        state.apply(TableAction::QueryCreated(query));

        assert!(state.rows()[0].query.is_none());
    }

    #[test]
    fn row_lookup_is_one_based() {
        let (state, form_data_id) = state_with_rows();
        assert!(state.row(0).is_none());
        assert_eq!(state.row(1).unwrap().id, form_data_id);
        assert!(state.row(2).is_none());
    }

    #[test]
    fn render_shows_question_and_status_placeholder() {
        let (state, _) = state_with_rows();
        let rendered = state.render();
        assert!(rendered.contains("Q1"));
        assert!(rendered.contains("1 rows"));
    }
}
