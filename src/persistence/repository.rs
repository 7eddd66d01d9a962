use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{params, types::ToSql, Connection, Row};

use crate::domain::{Priority, TaskPatch, TaskRecord};
use crate::persistence::db::Database;
use crate::persistence::error::StoreError;

const SELECT_COLUMNS: &str =
    "id, name, completed, priority_level, deadline, created_at, updated_at";

/// Raw row values before translation into a TaskRecord
struct RawTask {
    id: i64,
    name: String,
    completed: bool,
    priority: Option<String>,
    deadline: Option<String>,
    created_at: String,
    updated_at: String,
}

/// Repository translating between TaskRecords and durable rows.
/// Each operation is performed as a single unit of work over a scoped
/// connection; storage failures propagate, never get swallowed.
pub struct TaskRepository {
    db: Database,
}

impl TaskRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a new task and return the fully materialized record,
    /// including the assigned id and timestamps.
    pub fn create(
        &self,
        name: &str,
        priority: Priority,
        deadline: Option<NaiveDate>,
    ) -> Result<TaskRecord, StoreError> {
        self.db.with_conn(|conn| {
            let now = Local::now().to_rfc3339();
            conn.execute(
                "INSERT INTO tasks (name, completed, priority_level, deadline, created_at, updated_at)
                 VALUES (?1, 0, ?2, ?3, ?4, ?4)",
                params![name, priority.as_str(), deadline.map(date_str), now],
            )?;

            let id = conn.last_insert_rowid();
            fetch(conn, id)?
                .ok_or_else(|| StoreError::Database(format!("task {id} missing after insert")))
        })
    }

    /// Every task, in the default presentation order: priority high to low
    /// (unknown values last), deadline ascending with NULLs last, then
    /// creation time descending.
    pub fn all(&self) -> Result<Vec<TaskRecord>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM tasks
                 ORDER BY
                     CASE priority_level
                         WHEN 'high' THEN 1
                         WHEN 'medium' THEN 2
                         WHEN 'low' THEN 3
                         ELSE 4
                     END,
                     CASE WHEN deadline IS NULL THEN 1 ELSE 0 END,
                     deadline ASC,
                     created_at DESC"
            ))?;

            let raws = stmt
                .query_map([], raw_from_row)?
                .collect::<Result<Vec<_>, _>>()?;

            raws.into_iter().map(materialize).collect()
        })
    }

    /// Apply only the fields set in the patch, always refreshing
    /// `updated_at`. Returns Ok(None) if no row with that id exists.
    pub fn update(&self, id: i64, patch: &TaskPatch) -> Result<Option<TaskRecord>, StoreError> {
        self.db.with_conn(|conn| {
            let mut sets: Vec<&str> = Vec::new();
            let mut values: Vec<Box<dyn ToSql>> = Vec::new();

            if let Some(name) = &patch.name {
                sets.push("name = ?");
                values.push(Box::new(name.clone()));
            }
            if let Some(completed) = patch.completed {
                sets.push("completed = ?");
                values.push(Box::new(completed));
            }
            if let Some(priority) = patch.priority {
                sets.push("priority_level = ?");
                values.push(Box::new(priority.as_str()));
            }
            if let Some(deadline) = patch.deadline {
                // Some(None) clears the stored deadline
                sets.push("deadline = ?");
                values.push(Box::new(deadline.map(date_str)));
            }

            sets.push("updated_at = ?");
            values.push(Box::new(Local::now().to_rfc3339()));
            values.push(Box::new(id));

            let sql = format!("UPDATE tasks SET {} WHERE id = ?", sets.join(", "));
            conn.execute(
                &sql,
                rusqlite::params_from_iter(values.iter().map(|v| v.as_ref())),
            )?;

            fetch(conn, id)
        })
    }

    /// Remove a row. Returns whether a row was actually removed.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.db.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<TaskRecord>, StoreError> {
    let raw = conn
        .query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM tasks WHERE id = ?1"),
            params![id],
            raw_from_row,
        )
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(other),
        })?;

    raw.map(materialize).transpose()
}

fn raw_from_row(row: &Row) -> rusqlite::Result<RawTask> {
    Ok(RawTask {
        id: row.get(0)?,
        name: row.get(1)?,
        completed: row.get(2)?,
        priority: row.get(3)?,
        deadline: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Translate a raw row into a TaskRecord. Legacy rows degrade gracefully:
/// unknown priority values fall back to Low, unparsable deadline strings
/// are treated as absent.
fn materialize(raw: RawTask) -> Result<TaskRecord, StoreError> {
    let priority = raw
        .priority
        .as_deref()
        .and_then(Priority::from_str)
        .unwrap_or_default();

    let deadline = raw
        .deadline
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

    Ok(TaskRecord {
        id: raw.id,
        name: raw.name,
        completed: raw.completed,
        priority,
        deadline,
        created_at: parse_timestamp(&raw.created_at)?,
        updated_at: parse_timestamp(&raw.updated_at)?,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Local>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| StoreError::Database(format!("bad timestamp {value:?}: {e}")))
}

fn date_str(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
