//! Weekly streak engine.
//!
//! The engine is a pure state machine over ([`Goal`] streak fields, date).
//! Callers supply `today` explicitly and persist the mutated goal; nothing
//! here reads the wall clock or touches storage.
//!
//! ## State transitions
//!
//! ```text
//! NoWeekSet ──first mark──> WeekInProgress(W)
//! WeekInProgress(W) ──mark new weekday, same week──> WeekInProgress(W)
//! WeekInProgress(W) ──repeat mark, same day───────> WeekInProgress(W)  (no-op)
//! WeekInProgress(W) ──mark/reconcile in week W'>W──> WeekInProgress(W') (tally reset)
//! ```
//!
//! A week runs Monday to Sunday and is identified by its Monday date.
//! `weekly_streak` is a high-water mark over the in-week tally sizes ever
//! observed; neither operation decreases it.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::goal::{Goal, WeekdaySet};

/// The Monday of the week containing `date`.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Result of [`mark_completed_today`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakUpdate {
    /// High-water mark after the operation.
    pub weekly_streak: u32,
    /// The in-week tally after the operation.
    pub current_week_days_completed: WeekdaySet,
    /// False when today's weekday was already marked.
    pub newly_marked: bool,
}

/// Result of [`reconcile_daily`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReconcileSummary {
    /// Number of goals examined.
    pub goals_checked: usize,
    /// Number of goals whose in-week tally was reset.
    pub weeks_rolled: usize,
}

/// Record a completion for `today` on `goal`.
///
/// If today falls in a strictly later week than the last completion, the
/// in-week tally is cleared first; `weekly_streak` keeps its historical
/// best. Marking the same day twice is a no-op. Total over any valid date.
pub fn mark_completed_today(goal: &mut Goal, today: NaiveDate) -> StreakUpdate {
    let today_weekday = today.weekday();

    // A new week invalidates the old tally, never the high-water mark.
    if let Some(last) = goal.last_completed_date {
        if week_monday(today) > week_monday(last) {
            goal.current_week_days_completed.clear();
        }
    }

    let newly_marked = goal.current_week_days_completed.insert(today_weekday);
    if newly_marked {
        goal.last_completed_date = Some(today);
        if goal.streak_started_at.is_none() {
            goal.streak_started_at = Some(today);
        }

        let days = goal.current_week_days_completed.len();
        if days > goal.weekly_streak {
            goal.weekly_streak = days;
        }
    }

    StreakUpdate {
        weekly_streak: goal.weekly_streak,
        current_week_days_completed: goal.current_week_days_completed,
        newly_marked,
    }
}

/// Daily reconciliation over all goals of one owner.
///
/// For each goal not completed yesterday, the in-week tally is cleared once
/// a week boundary has passed. `weekly_streak` and `streak_started_at` are
/// left untouched in all cases. Running this twice for the same `today`
/// produces the same end state as running it once; callers persist every
/// goal unconditionally.
pub fn reconcile_daily(goals: &mut [Goal], today: NaiveDate) -> ReconcileSummary {
    let yesterday = today - Duration::days(1);
    let mut summary = ReconcileSummary::default();

    for goal in goals.iter_mut() {
        summary.goals_checked += 1;

        if goal.last_completed_date != Some(yesterday) {
            if let Some(last) = goal.last_completed_date {
                if week_monday(today) > week_monday(last) {
                    if !goal.current_week_days_completed.is_empty() {
                        summary.weeks_rolled += 1;
                        tracing::debug!(
                            category = %goal.category,
                            "week rolled over; in-week tally reset"
                        );
                    }
                    goal.current_week_days_completed.clear();
                    // weekly_streak keeps its value until beaten this week.
                }
            }
        }
    }

    summary
}
