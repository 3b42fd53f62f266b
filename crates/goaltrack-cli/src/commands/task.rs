//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use goaltrack_core::storage::{Config, Database};
use goaltrack_core::Task;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Category (default: general)
        #[arg(long, default_value = "general")]
        category: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<NaiveDate>,
    },
    /// List tasks
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Only show open tasks
        #[arg(long)]
        open: bool,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<NaiveDate>,
        /// Set completed status
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let cfg = Config::load()?;
    let pretty = cfg.output.pretty_json;

    match action {
        TaskAction::Create {
            title,
            description,
            category,
            due_date,
        } => {
            let mut task = Task::new(title, category);
            task.description = description;
            task.due_date = due_date;
            db.create_task(&task)?;
            println!("Task created: {}", task.id);
            super::print_json(&task, pretty)?;
        }
        TaskAction::List { category, open } => {
            let all_tasks = db.list_tasks()?;
            let filtered: Vec<_> = all_tasks
                .into_iter()
                .filter(|task| {
                    if let Some(ref c) = category {
                        if &task.category != c {
                            return false;
                        }
                    }
                    if open && task.completed {
                        return false;
                    }
                    true
                })
                .collect();
            super::print_json(&filtered, pretty)?;
        }
        TaskAction::Get { id } => match db.get_task(&id)? {
            Some(task) => super::print_json(&task, pretty)?,
            None => return Err(format!("Task not found: {id}").into()),
        },
        TaskAction::Update {
            id,
            title,
            description,
            category,
            due_date,
            completed,
        } => {
            let mut task = db.get_task(&id)?.ok_or(format!("Task not found: {id}"))?;

            if let Some(t) = title {
                task.title = t;
            }
            if let Some(d) = description {
                task.description = Some(d);
            }
            if let Some(c) = category {
                task.category = c;
            }
            if let Some(d) = due_date {
                task.due_date = Some(d);
            }
            if let Some(c) = completed {
                task.completed = c;
            }
            task.touch();

            db.update_task(&task)?;
            println!("Task updated:");
            super::print_json(&task, pretty)?;
        }
        TaskAction::Complete { id } => {
            let mut task = db.get_task(&id)?.ok_or(format!("Task not found: {id}"))?;
            task.set_completed(true);
            db.update_task(&task)?;
            super::print_json(&task, pretty)?;
        }
        TaskAction::Delete { id } => {
            if db.delete_task(&id)? {
                println!("Task deleted: {id}");
            } else {
                return Err(format!("Task not found: {id}").into());
            }
        }
    }
    Ok(())
}
