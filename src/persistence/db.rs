use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::Connection;

use crate::persistence::error::StoreError;

/// Base schema for fresh databases. Columns match the TaskRecord fields.
const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    priority_level TEXT NOT NULL DEFAULT 'low',
    deadline TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

/// Columns added after the first release. Applied to databases created
/// before the column existed; adding twice is benign.
const MIGRATION_COLUMNS: &[&str] = &[
    "ALTER TABLE tasks ADD COLUMN priority_level TEXT NOT NULL DEFAULT 'low'",
    "ALTER TABLE tasks ADD COLUMN deadline TEXT",
];

/// Handle to the local SQLite database.
/// The connection is created once at startup and passed by reference to the
/// repository; there is no ambient global state.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open or create a database at the given path. Safe to call against an
    /// existing file: the schema is created if missing and newer columns are
    /// added to tables from older versions without disturbing existing rows.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("create dir: {e}")))?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: path.to_owned(),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
        })
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute(CREATE_TABLE, [])?;
        for ddl in MIGRATION_COLUMNS {
            add_column_if_missing(conn, ddl)?;
        }
        Ok(())
    }

    /// Execute a closure with the database connection
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Run an ALTER TABLE ADD COLUMN statement, treating "duplicate column name"
/// as a no-op. Any other failure propagates.
fn add_column_if_missing(conn: &Connection, ddl: &str) -> Result<(), StoreError> {
    match conn.execute(ddl, []) {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(_, Some(msg)))
            if msg.contains("duplicate column name") =>
        {
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
