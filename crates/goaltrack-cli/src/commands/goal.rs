//! Goal management commands for CLI.

use clap::Subcommand;
use goaltrack_core::storage::{Config, Database};
use goaltrack_core::{Goal, ValidationError};

fn check_target(target: u32) -> Result<u32, ValidationError> {
    if target == 0 {
        return Err(ValidationError::InvalidValue {
            field: "daily_target".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(target)
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a new goal for a category
    Create {
        /// Category the goal tracks (unique, e.g. "dsa")
        category: String,
        /// Task completions per day counting as a full day
        #[arg(long)]
        daily_target: Option<u32>,
    },
    /// List goals
    List,
    /// Get goal details
    Get {
        /// Goal ID or category
        goal: String,
    },
    /// Change the daily target of a goal
    SetTarget {
        /// Goal ID or category
        goal: String,
        /// New daily target
        target: u32,
    },
    /// Delete a goal
    Delete {
        /// Goal ID
        id: String,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let cfg = Config::load()?;
    let pretty = cfg.output.pretty_json;

    match action {
        GoalAction::Create {
            category,
            daily_target,
        } => {
            if db.get_goal_by_category(&category)?.is_some() {
                return Err(format!("Goal already exists for category: {category}").into());
            }
            let target = check_target(daily_target.unwrap_or(cfg.goals.default_daily_target))?;
            let goal = Goal::new(category, target);
            db.create_goal(&goal)?;
            println!("Goal created: {}", goal.id);
            super::print_json(&goal, pretty)?;
        }
        GoalAction::List => {
            let goals = db.list_goals()?;
            super::print_json(&goals, pretty)?;
        }
        GoalAction::Get { goal } => {
            let goal = super::resolve_goal(&db, &goal)?;
            super::print_json(&goal, pretty)?;
        }
        GoalAction::SetTarget { goal, target } => {
            let mut goal = super::resolve_goal(&db, &goal)?;
            goal.daily_target = check_target(target)?;
            goal.touch();
            db.update_goal(&goal)?;
            println!("Goal updated:");
            super::print_json(&goal, pretty)?;
        }
        GoalAction::Delete { id } => {
            if db.delete_goal(&id)? {
                println!("Goal deleted: {id}");
            } else {
                return Err(format!("Goal not found: {id}").into());
            }
        }
    }
    Ok(())
}
