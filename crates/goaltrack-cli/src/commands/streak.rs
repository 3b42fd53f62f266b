//! Weekly streak commands: the thin handlers over the streak engine.
//!
//! `complete` and `reconcile` mirror the mark-daily-goal-completed and
//! update-all-streaks actions: resolve records, call the engine with an
//! explicit date, persist, echo the result as JSON.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use goaltrack_core::storage::{Config, Database};
use goaltrack_core::{streak, WeekdaySet};
use serde::Serialize;

#[derive(Subcommand)]
pub enum StreakAction {
    /// Mark a goal completed for today
    Complete {
        /// Goal ID or category
        goal: String,
        /// Override the calendar date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Run the daily reconciliation over all goals
    Reconcile {
        /// Override the calendar date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Show streak state for all goals
    Show {
        /// Limit to one category
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Serialize)]
struct MarkCompletedResponse {
    status: &'static str,
    weekly_streak: u32,
    current_week_days_completed: WeekdaySet,
}

#[derive(Serialize)]
struct ReconcileResponse {
    status: &'static str,
}

fn today_or_now(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let cfg = Config::load()?;
    let pretty = cfg.output.pretty_json;

    match action {
        StreakAction::Complete { goal, today } => {
            let today = today_or_now(today);
            let mut goal = super::resolve_goal(&db, &goal)?;
            let update = streak::mark_completed_today(&mut goal, today);
            if update.newly_marked {
                goal.touch();
            }
            db.update_goal(&goal)?;
            super::print_json(
                &MarkCompletedResponse {
                    status: "success",
                    weekly_streak: update.weekly_streak,
                    current_week_days_completed: update.current_week_days_completed,
                },
                pretty,
            )?;
        }
        StreakAction::Reconcile { today } => {
            let today = today_or_now(today);
            let mut goals = db.list_goals()?;
            let summary = streak::reconcile_daily(&mut goals, today);
            // Persist unconditionally, changed or not.
            for goal in &goals {
                db.update_goal(goal)?;
            }
            tracing::info!(
                goals = summary.goals_checked,
                rolled = summary.weeks_rolled,
                "daily streak reconciliation complete"
            );
            super::print_json(
                &ReconcileResponse {
                    status: "streaks checked and updated",
                },
                pretty,
            )?;
        }
        StreakAction::Show { category } => match category {
            Some(c) => {
                let goal = db
                    .get_goal_by_category(&c)?
                    .ok_or(format!("Goal not found: {c}"))?;
                super::print_json(&goal, pretty)?;
            }
            None => {
                let goals = db.list_goals()?;
                super::print_json(&goals, pretty)?;
            }
        },
    }
    Ok(())
}
