use crate::error::{AppError, AppResult};
use chrono::Utc;
use querydesk_models::{FormData, FormDataWithQuery, Query, QueryStatus};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub type DbConnection = Arc<Mutex<Connection>>;

pub struct Database {
    connection: DbConnection,
}

fn status_from_str(status: &str) -> QueryStatus {
    match status {
        "RESOLVED" => QueryStatus::Resolved,
        _ => QueryStatus::Open,
    }
}

fn query_from_row(row: &Row<'_>) -> rusqlite::Result<Query> {
    let status: String = row.get(3)?;
    Ok(Query {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: status_from_str(&status),
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
        form_data_id: row.get(6)?,
    })
}

const QUERY_COLUMNS: &str = "id, title, description, status, created_at, updated_at, form_data_id";

impl Database {
    pub fn new(db_path: &Path) -> AppResult<Self> {
        // Ensure the database directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;

        // Enable foreign key constraints (SQLite3 has them disabled by default)
        conn.execute("PRAGMA foreign_keys = ON", [])?;

        let database = Database {
            connection: Arc::new(Mutex::new(conn)),
        };

        database.run_migrations()?;

        Ok(database)
    }

    pub fn connection(&self) -> DbConnection {
        Arc::clone(&self.connection)
    }

    fn run_migrations(&self) -> AppResult<()> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS form_data (
                id TEXT PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL
            )",
            [],
        )?;

        // UNIQUE on form_data_id: the list contract models the relation as
        // singular/nullable, so a row can never hold two queries.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS queries (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                status TEXT NOT NULL DEFAULT 'OPEN' CHECK (status IN ('OPEN', 'RESOLVED')),
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                form_data_id TEXT NOT NULL UNIQUE,
                FOREIGN KEY (form_data_id) REFERENCES form_data (id)
            )",
            [],
        )?;

        tracing::info!("Database migrations completed");
        Ok(())
    }

    pub fn get_all_form_data(&self) -> AppResult<Vec<FormDataWithQuery>> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        let mut stmt = conn.prepare(
            "SELECT fd.id, fd.question, fd.answer,
                    q.id, q.title, q.description, q.status, q.created_at, q.updated_at, q.form_data_id
             FROM form_data fd
             LEFT JOIN queries q ON q.form_data_id = fd.id
             ORDER BY fd.rowid",
        )?;

        let entry_iter = stmt.query_map([], |row| {
            let query = match row.get::<_, Option<String>>(3)? {
                Some(query_id) => {
                    let status: String = row.get(6)?;
                    Some(Query {
                        id: query_id,
                        title: row.get(4)?,
                        description: row.get(5)?,
                        status: status_from_str(&status),
                        created_at: row.get(7)?,
                        updated_at: row.get(8)?,
                        form_data_id: row.get(9)?,
                    })
                }
                None => None,
            };

            Ok(FormDataWithQuery {
                id: row.get(0)?,
                question: row.get(1)?,
                answer: row.get(2)?,
                query,
            })
        })?;

        let mut entries = Vec::new();
        for entry in entry_iter {
            entries.push(entry?);
        }

        Ok(entries)
    }

    pub fn get_form_data_by_id(&self, id: &str) -> AppResult<FormData> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        let mut stmt = conn.prepare("SELECT id, question, answer FROM form_data WHERE id = ?")?;

        let entry = stmt
            .query_row([id], |row| {
                Ok(FormData {
                    id: row.get(0)?,
                    question: row.get(1)?,
                    answer: row.get(2)?,
                })
            })
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    AppError::NotFound(format!("FormData not found: {id}"))
                }
                _ => AppError::Database(e),
            })?;

        Ok(entry)
    }

    pub fn create_form_data(&self, entry: &FormData) -> AppResult<()> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        conn.execute(
            "INSERT INTO form_data (id, question, answer) VALUES (?, ?, ?)",
            params![entry.id, entry.question, entry.answer],
        )?;

        Ok(())
    }

    pub fn get_query_by_id(&self, id: &str) -> AppResult<Query> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        let mut stmt =
            conn.prepare(&format!("SELECT {QUERY_COLUMNS} FROM queries WHERE id = ?"))?;

        let query = stmt.query_row([id], query_from_row).map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => {
                AppError::NotFound(format!("Query not found: {id}"))
            }
            _ => AppError::Database(e),
        })?;

        Ok(query)
    }

    pub fn get_query_by_form_data_id(&self, form_data_id: &str) -> AppResult<Option<Query>> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {QUERY_COLUMNS} FROM queries WHERE form_data_id = ?"
        ))?;

        let query = stmt.query_row([form_data_id], query_from_row).optional()?;

        Ok(query)
    }

    pub fn create_query(&self, query: &Query) -> AppResult<()> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        conn.execute(
            "INSERT INTO queries (id, title, description, status, created_at, updated_at, form_data_id)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                query.id,
                query.title,
                query.description,
                query.status.as_str(),
                query.created_at,
                query.updated_at,
                query.form_data_id,
            ],
        )?;

        tracing::info!("Created query {} for form data {}", query.id, query.form_data_id);
        Ok(())
    }

    pub fn update_query_status(&self, id: &str, status: QueryStatus) -> AppResult<Query> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        let rows_affected = conn.execute(
            "UPDATE queries SET status = ?, updated_at = ? WHERE id = ?",
            params![status.as_str(), Utc::now().timestamp(), id],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!("Query not found: {id}")));
        }

        let mut stmt =
            conn.prepare(&format!("SELECT {QUERY_COLUMNS} FROM queries WHERE id = ?"))?;
        let query = stmt.query_row([id], query_from_row)?;

        Ok(query)
    }

    pub fn delete_query(&self, id: &str) -> AppResult<()> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        let rows_affected = conn.execute("DELETE FROM queries WHERE id = ?", [id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!("Query not found: {id}")));
        }

        tracing::info!("Deleted query {}", id);
        Ok(())
    }

    pub fn delete_all_records(&self) -> AppResult<()> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        // Deletion order matters: queries reference form_data.
        conn.execute("DELETE FROM queries", [])?;
        conn.execute("DELETE FROM form_data", [])?;

        tracing::info!("All records deleted");
        Ok(())
    }

    pub fn count_form_data(&self) -> AppResult<i64> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        let count = conn.query_row("SELECT COUNT(*) FROM form_data", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn count_queries(&self) -> AppResult<i64> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| AppError::Internal(format!("Failed to acquire database lock: {e}")))?;

        let count = conn.query_row("SELECT COUNT(*) FROM queries", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_database() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let database = Database::new(&temp_dir.path().join("test.db")).unwrap();
        (temp_dir, database)
    }

    #[test]
    fn list_includes_query_or_none() {
        let (_guard, db) = test_database();

        let plain = FormData::new("Q1".to_string(), "A1".to_string());
        let annotated = FormData::new("Q2".to_string(), "A2".to_string());
        db.create_form_data(&plain).unwrap();
        db.create_form_data(&annotated).unwrap();

        let query = Query::new("Query for Q2".to_string(), None, annotated.id.clone());
        db.create_query(&query).unwrap();

        let entries = db.get_all_form_data().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].query.is_none());
        let attached = entries[1].query.as_ref().unwrap();
        assert_eq!(attached.id, query.id);
        assert_eq!(attached.status, QueryStatus::Open);
    }

    #[test]
    fn second_query_for_same_row_is_rejected() {
        let (_guard, db) = test_database();

        let entry = FormData::new("Q1".to_string(), "A1".to_string());
        db.create_form_data(&entry).unwrap();

        let first = Query::new("first".to_string(), None, entry.id.clone());
        db.create_query(&first).unwrap();

        let second = Query::new("second".to_string(), None, entry.id.clone());
        assert!(matches!(
            db.create_query(&second),
            Err(AppError::Database(_))
        ));
        assert_eq!(db.count_queries().unwrap(), 1);
    }

    #[test]
    fn query_for_missing_form_data_violates_foreign_key() {
        let (_guard, db) = test_database();

        let orphan = Query::new("orphan".to_string(), None, "no-such-row".to_string());
        assert!(db.create_query(&orphan).is_err());
    }

    #[test]
    fn update_status_refreshes_updated_at() {
        let (_guard, db) = test_database();

        let entry = FormData::new("Q1".to_string(), "A1".to_string());
        db.create_form_data(&entry).unwrap();
        let query = Query::new("t".to_string(), None, entry.id.clone());
        db.create_query(&query).unwrap();

        let updated = db
            .update_query_status(&query.id, QueryStatus::Resolved)
            .unwrap();
        assert_eq!(updated.status, QueryStatus::Resolved);
        assert!(updated.updated_at >= query.updated_at);
        assert_eq!(updated.created_at, query.created_at);
    }

    #[test]
    fn update_missing_query_is_not_found() {
        let (_guard, db) = test_database();

        assert!(matches!(
            db.update_query_status("missing", QueryStatus::Resolved),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn delete_all_records_clears_both_tables() {
        let (_guard, db) = test_database();

        let entry = FormData::new("Q1".to_string(), "A1".to_string());
        db.create_form_data(&entry).unwrap();
        db.create_query(&Query::new("t".to_string(), None, entry.id.clone()))
            .unwrap();

        db.delete_all_records().unwrap();
        assert_eq!(db.count_form_data().unwrap(), 0);
        assert_eq!(db.count_queries().unwrap(), 0);
    }
}
