//! Database schema migrations for goaltrack.
//!
//! Migrations are versioned and applied automatically when opening the
//! database. The `schema_version` table tracks the current migration
//! version.

use rusqlite::{Connection, Result as SqliteResult};

/// Apply all pending migrations to bring the database to the current schema
/// version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

/// Create the schema_version table if it doesn't exist.
fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or(0)
}

/// Set the schema version in the database.
fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration v1: Initial schema (baseline).
///
/// The base tasks/goals tables are created by `Database::migrate()`
/// directly, so this only records the version.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    set_schema_version(conn, 1)?;
    Ok(())
}

/// Migration v2: Add weekly-streak fields to goals.
///
/// Adds the following columns to the goals table:
/// - weekly_streak: best count of distinct days completed in any one week
/// - current_week_days_completed: JSON array of weekday indices (0=Monday)
/// - last_completed_date: most recent completion date
/// - streak_started_at: first completion date ever recorded
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "ALTER TABLE goals ADD COLUMN weekly_streak INTEGER NOT NULL DEFAULT 0;
         ALTER TABLE goals ADD COLUMN current_week_days_completed TEXT NOT NULL DEFAULT '[]';
         ALTER TABLE goals ADD COLUMN last_completed_date TEXT;
         ALTER TABLE goals ADD COLUMN streak_started_at TEXT;",
    )?;

    tx.execute("DELETE FROM schema_version", [])?;
    tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [2])?;

    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_v1_goals_table(conn: &Connection) {
        conn.execute_batch(
            "CREATE TABLE goals (
                id           TEXT PRIMARY KEY,
                category     TEXT NOT NULL UNIQUE,
                daily_target INTEGER NOT NULL DEFAULT 3,
                created_at   TEXT NOT NULL,
                updated_at   TEXT NOT NULL
            );",
        )
        .unwrap();
    }

    /// Test migration from scratch (v0 -> v2)
    #[test]
    fn test_migrate_from_scratch() {
        let conn = Connection::open_in_memory().unwrap();
        create_v1_goals_table(&conn);

        conn.execute(
            "INSERT INTO goals (id, category, created_at, updated_at)
             VALUES ('goal1', 'dsa', '2024-01-01T12:00:00Z', '2024-01-01T12:00:00Z')",
            [],
        )
        .unwrap();

        migrate(&conn).unwrap();

        assert_eq!(get_schema_version(&conn), 2);

        // Existing rows pick up the streak defaults.
        let (streak, days, last): (i32, String, Option<String>) = conn
            .query_row(
                "SELECT weekly_streak, current_week_days_completed, last_completed_date
                 FROM goals WHERE id = 'goal1'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(streak, 0);
        assert_eq!(days, "[]");
        assert!(last.is_none());
    }

    /// Test that migrations are idempotent
    #[test]
    fn test_migrate_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_v1_goals_table(&conn);

        migrate(&conn).unwrap();
        migrate(&conn).unwrap();

        assert_eq!(get_schema_version(&conn), 2);
    }

    /// Test incremental migration (v1 -> v2)
    #[test]
    fn test_incremental_migration() {
        let conn = Connection::open_in_memory().unwrap();
        create_v1_goals_table(&conn);

        conn.execute(
            "CREATE TABLE schema_version (version INTEGER PRIMARY KEY)",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (1)", [])
            .unwrap();

        migrate(&conn).unwrap();

        assert_eq!(get_schema_version(&conn), 2);

        // New columns exist and are queryable.
        let stmt = conn
            .prepare(
                "SELECT weekly_streak, current_week_days_completed,
                        last_completed_date, streak_started_at
                 FROM goals",
            )
            .unwrap();
        drop(stmt);
    }
}
