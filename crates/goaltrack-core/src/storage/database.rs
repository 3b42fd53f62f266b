//! SQLite-based storage for tasks and goals.
//!
//! One database file per owner; the exclusive connection serializes the
//! read-modify-write cycles of the streak operations for that store.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::migrations;
use crate::error::{CoreError, DatabaseError};
use crate::goal::{Goal, WeekdaySet};
use crate::task::Task;

// === Helper Functions ===

/// Parse an ISO date column, None on NULL or malformed text.
fn parse_date_opt(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}

/// Parse datetime from RFC3339 string with fallback to current time.
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Decode the persisted weekday tally (JSON array of 0-6).
fn parse_weekday_set(json: &str) -> WeekdaySet {
    serde_json::from_str(json).unwrap_or_default()
}

/// Build a Goal from a database row.
///
/// Column order: id, category, daily_target, weekly_streak,
/// current_week_days_completed, last_completed_date, streak_started_at,
/// created_at, updated_at.
fn row_to_goal(row: &rusqlite::Row) -> Result<Goal, rusqlite::Error> {
    let days_json: String = row.get(4)?;
    let created_at_str: String = row.get(7)?;
    let updated_at_str: String = row.get(8)?;

    Ok(Goal {
        id: row.get(0)?,
        category: row.get(1)?,
        daily_target: row.get(2)?,
        weekly_streak: row.get(3)?,
        current_week_days_completed: parse_weekday_set(&days_json),
        last_completed_date: parse_date_opt(row.get(5)?),
        streak_started_at: parse_date_opt(row.get(6)?),
        created_at: parse_datetime_fallback(&created_at_str),
        updated_at: parse_datetime_fallback(&updated_at_str),
    })
}

/// Build a Task from a database row.
///
/// Column order: id, title, description, category, completed, due_date,
/// created_at, updated_at.
fn row_to_task(row: &rusqlite::Row) -> Result<Task, rusqlite::Error> {
    let created_at_str: String = row.get(6)?;
    let updated_at_str: String = row.get(7)?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        completed: row.get(4)?,
        due_date: parse_date_opt(row.get(5)?),
        created_at: parse_datetime_fallback(&created_at_str),
        updated_at: parse_datetime_fallback(&updated_at_str),
    })
}

const GOAL_COLUMNS: &str = "id, category, daily_target, weekly_streak, \
     current_week_days_completed, last_completed_date, streak_started_at, \
     created_at, updated_at";

const TASK_COLUMNS: &str =
    "id, title, description, category, completed, due_date, created_at, updated_at";

/// SQLite database for task and goal storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/goaltrack/goaltrack.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = super::data_dir()?.join("goaltrack.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened goaltrack database");
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(|source| DatabaseError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        // Create base tables (v1 schema) first; migrations handle the rest.
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id          TEXT PRIMARY KEY,
                    title       TEXT NOT NULL,
                    description TEXT,
                    category    TEXT NOT NULL DEFAULT 'general',
                    completed   INTEGER NOT NULL DEFAULT 0,
                    due_date    TEXT,
                    created_at  TEXT NOT NULL,
                    updated_at  TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS goals (
                    id           TEXT PRIMARY KEY,
                    category     TEXT NOT NULL UNIQUE,
                    daily_target INTEGER NOT NULL DEFAULT 3,
                    created_at   TEXT NOT NULL,
                    updated_at   TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_tasks_category ON tasks(category);
                CREATE INDEX IF NOT EXISTS idx_tasks_completed ON tasks(completed);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    // === Goals ===

    /// Insert a new goal. Categories are unique per store.
    pub fn create_goal(&self, goal: &Goal) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO goals (id, category, daily_target, weekly_streak,
                 current_week_days_completed, last_completed_date,
                 streak_started_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                goal.id,
                goal.category,
                goal.daily_target,
                goal.weekly_streak,
                serde_json::to_string(&goal.current_week_days_completed)
                    .unwrap_or_else(|_| "[]".to_string()),
                goal.last_completed_date.map(|d| d.to_string()),
                goal.streak_started_at.map(|d| d.to_string()),
                goal.created_at.to_rfc3339(),
                goal.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_goal(&self, id: &str) -> Result<Option<Goal>, DatabaseError> {
        let goal = self
            .conn
            .query_row(
                &format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = ?1"),
                params![id],
                row_to_goal,
            )
            .optional()?;
        Ok(goal)
    }

    pub fn get_goal_by_category(&self, category: &str) -> Result<Option<Goal>, DatabaseError> {
        let goal = self
            .conn
            .query_row(
                &format!("SELECT {GOAL_COLUMNS} FROM goals WHERE category = ?1"),
                params![category],
                row_to_goal,
            )
            .optional()?;
        Ok(goal)
    }

    /// List all goals, ordered by category.
    pub fn list_goals(&self) -> Result<Vec<Goal>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {GOAL_COLUMNS} FROM goals ORDER BY category"))?;
        let goals = stmt
            .query_map([], row_to_goal)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    /// Write back every mutable field of a goal by id.
    pub fn update_goal(&self, goal: &Goal) -> Result<(), DatabaseError> {
        self.conn.execute(
            "UPDATE goals SET category = ?2, daily_target = ?3, weekly_streak = ?4,
                 current_week_days_completed = ?5, last_completed_date = ?6,
                 streak_started_at = ?7, updated_at = ?8
             WHERE id = ?1",
            params![
                goal.id,
                goal.category,
                goal.daily_target,
                goal.weekly_streak,
                serde_json::to_string(&goal.current_week_days_completed)
                    .unwrap_or_else(|_| "[]".to_string()),
                goal.last_completed_date.map(|d| d.to_string()),
                goal.streak_started_at.map(|d| d.to_string()),
                goal.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Delete a goal. Returns `true` if a row was removed.
    pub fn delete_goal(&self, id: &str) -> Result<bool, DatabaseError> {
        let affected = self
            .conn
            .execute("DELETE FROM goals WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // === Tasks ===

    pub fn create_task(&self, task: &Task) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO tasks (id, title, description, category, completed,
                 due_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                task.id,
                task.title,
                task.description,
                task.category,
                task.completed,
                task.due_date.map(|d| d.to_string()),
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>, DatabaseError> {
        let task = self
            .conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                row_to_task,
            )
            .optional()?;
        Ok(task)
    }

    /// List all tasks, newest first.
    pub fn list_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC"
        ))?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    pub fn update_task(&self, task: &Task) -> Result<(), DatabaseError> {
        self.conn.execute(
            "UPDATE tasks SET title = ?2, description = ?3, category = ?4,
                 completed = ?5, due_date = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.description,
                task.category,
                task.completed,
                task.due_date.map(|d| d.to_string()),
                task.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Delete a task. Returns `true` if a row was removed.
    pub fn delete_task(&self, id: &str) -> Result<bool, DatabaseError> {
        let affected = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}
