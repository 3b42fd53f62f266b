//! CLI command implementations.

pub mod config;
pub mod goal;
pub mod streak;
pub mod task;

use goaltrack_core::storage::Database;
use goaltrack_core::Goal;

/// Print a value as JSON on stdout, pretty or compact per config.
pub fn print_json<T: serde::Serialize>(
    value: &T,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

/// Resolve a goal by id first, then by category.
pub fn resolve_goal(db: &Database, key: &str) -> Result<Goal, Box<dyn std::error::Error>> {
    if let Some(goal) = db.get_goal(key)? {
        return Ok(goal);
    }
    if let Some(goal) = db.get_goal_by_category(key)? {
        return Ok(goal);
    }
    Err(format!("Goal not found: {key}").into())
}
