// Storage repository for tour-explorer
// Key/value persistence used for session tokens

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use super::DatabaseManager;

impl DatabaseManager {
    /// Get a stored value by key
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            get_value_impl(conn, key)
        })
    }

    /// Insert or replace a stored value
    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.with_connection(|conn| {
            set_value_impl(conn, key, value)
        })
    }

    /// Remove a stored value; missing keys are not an error
    pub fn remove_value(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            remove_value_impl(conn, key)
        })
    }
}

fn get_value_impl(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare(
        "SELECT value FROM client_storage WHERE key = ?"
    ).context("Failed to prepare get_value query")?;

    let result = stmt.query_row(params![key], |row| row.get(0));

    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).context("Failed to get stored value"),
    }
}

fn set_value_impl(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO client_storage (key, value, updated_at)
        VALUES (?1, ?2, datetime('now'))
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = datetime('now')
        "#,
        params![key, value],
    ).context("Failed to set stored value")?;

    Ok(())
}

fn remove_value_impl(conn: &Connection, key: &str) -> Result<()> {
    conn.execute(
        "DELETE FROM client_storage WHERE key = ?",
        params![key],
    ).context("Failed to remove stored value")?;

    Ok(())
}
