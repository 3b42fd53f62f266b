//! # Goaltrack Core Library
//!
//! This library provides the core business logic for Goaltrack, a personal
//! task and goal tracker with weekly streaks. It implements a CLI-first
//! philosophy where all operations are available via a standalone CLI
//! binary, with any front end being a thin layer over the same core
//! library.
//!
//! ## Architecture
//!
//! - **Streak Engine**: A pure state machine over (goal state, calendar
//!   date) -- the caller supplies `today` explicitly and persists results
//! - **Storage**: SQLite-based task/goal storage and TOML-based
//!   configuration, with versioned schema migrations
//! - **Models**: [`Goal`] with its fixed-capacity [`WeekdaySet`] tally,
//!   and plain [`Task`] records
//!
//! ## Key Components
//!
//! - [`streak::mark_completed_today`]: record a completion for a date
//! - [`streak::reconcile_daily`]: once-a-day batch trim of stale tallies
//! - [`Database`]: task and goal persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod goal;
pub mod storage;
pub mod streak;
pub mod task;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use goal::{Goal, WeekdaySet};
pub use storage::{Config, Database};
pub use streak::{mark_completed_today, reconcile_daily, week_monday, ReconcileSummary, StreakUpdate};
pub use task::Task;
