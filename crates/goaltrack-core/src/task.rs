//! Task types.
//!
//! Tasks are plain to-do items grouped by the same category vocabulary as
//! goals. Completing tasks is what earns a goal its daily completion; the
//! linkage is driven by the caller, not by this module.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A one-off to-do item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Category the task belongs to (shared vocabulary with goals)
    pub category: String,
    /// Whether the task is completed
    pub completed: bool,
    /// Optional due date
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new open task.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        let now = Utc::now();
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            category: category.into(),
            completed: false,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the completed flag and stamp `updated_at`.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        self.touch();
    }

    /// Stamp `updated_at` with the current wall-clock time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serialization() {
        let mut task = Task::new("Solve two-sum", "dsa");
        task.description = Some("LeetCode #1".to_string());
        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.title, "Solve two-sum");
        assert_eq!(decoded.category, "dsa");
        assert!(!decoded.completed);
    }

    #[test]
    fn set_completed_updates_timestamp() {
        let mut task = Task::new("Review notes", "system_design");
        let before = task.updated_at;
        task.set_completed(true);
        assert!(task.completed);
        assert!(task.updated_at >= before);
    }
}
