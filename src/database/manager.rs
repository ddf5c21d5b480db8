//! SQLite handle for the client's persistent storage
//!
//! One connection per process, guarded by a mutex. Several CLI invocations can
//! share the same file, so writers wait on a busy timeout instead of failing.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use super::migrations;

/// File name of the storage database inside the data directory
pub const STORAGE_FILE: &str = "storage.db";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DatabaseManager {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl DatabaseManager {
    /// Open (or create) the database at `db_path` and bring its schema up to date
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create storage directory {:?}", parent))?;
        }

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open storage at {:?}", db_path))?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .context("Failed to set storage busy timeout")?;

        migrations::run_migrations(&conn)
            .context("Failed to migrate storage schema")?;

        log::debug!("Storage opened at {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    /// Open [`STORAGE_FILE`] inside `data_dir`
    pub fn init_in_dir(data_dir: &Path) -> Result<Self> {
        Self::new(data_dir.join(STORAGE_FILE))
    }

    /// Run `f` with the connection held
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock()
            .map_err(|_| anyhow::anyhow!("Storage connection lock poisoned"))?;
        f(&conn)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
