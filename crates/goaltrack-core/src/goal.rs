//! Goal types for weekly streak tracking.
//!
//! A goal is a recurring objective (one per category) whose completions are
//! tallied per weekday within the current Monday-to-Sunday window. The
//! streak fields on [`Goal`] are mutated only by the `streak` module.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Fixed-capacity set of weekdays, indexed Monday=0 .. Sunday=6.
///
/// Backed by a 7-bit mask, so members are unique and the length can never
/// exceed 7. Serializes as a sorted JSON array of indices to match the
/// persisted `current_week_days_completed` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdaySet(u8);

fn weekday_from_index(idx: u8) -> Option<Weekday> {
    match idx {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

impl WeekdaySet {
    /// The empty set.
    pub const fn empty() -> Self {
        WeekdaySet(0)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    /// Insert a weekday. Returns `true` if it was not already present.
    pub fn insert(&mut self, day: Weekday) -> bool {
        let bit = Self::bit(day);
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Number of distinct days in the set (0..=7).
    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Sorted weekday indices, Monday=0.
    pub fn indices(&self) -> Vec<u8> {
        (0..7u8).filter(|d| self.0 & (1 << d) != 0).collect()
    }

    /// Iterate members in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        let mask = self.0;
        (0..7u8)
            .filter(move |d| mask & (1 << d) != 0)
            .filter_map(weekday_from_index)
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let indices = self.indices();
        let mut seq = serializer.serialize_seq(Some(indices.len()))?;
        for idx in indices {
            seq.serialize_element(&idx)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = WeekdaySet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a sequence of weekday indices in 0..=6")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<WeekdaySet, A::Error> {
                let mut set = WeekdaySet::empty();
                while let Some(idx) = seq.next_element::<u8>()? {
                    if idx > 6 {
                        return Err(de::Error::custom(format!(
                            "weekday index {idx} out of range 0..=6"
                        )));
                    }
                    set.0 |= 1 << idx;
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(SetVisitor)
    }
}

/// A recurring objective tracked for daily completion within a week.
///
/// Streak field invariants:
/// - `current_week_days_completed` always belongs to the week containing
///   `last_completed_date` (or is empty).
/// - `last_completed_date` set implies `streak_started_at` set.
/// - `weekly_streak` never decreases under engine operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: String,
    /// Subject area the goal belongs to (e.g. "dsa", "job_search")
    pub category: String,
    /// Task completions per day that count as a full day
    pub daily_target: u32,
    /// Highest count of distinct days completed within any single week
    pub weekly_streak: u32,
    /// Days completed within the week currently being tracked
    pub current_week_days_completed: WeekdaySet,
    /// Most recent date a completion was recorded
    pub last_completed_date: Option<NaiveDate>,
    /// First date any completion was ever recorded; set once
    pub streak_started_at: Option<NaiveDate>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new goal with empty streak state.
    pub fn new(category: impl Into<String>, daily_target: u32) -> Self {
        let now = Utc::now();
        Goal {
            id: uuid::Uuid::new_v4().to_string(),
            category: category.into(),
            daily_target,
            weekly_streak: 0,
            current_week_days_completed: WeekdaySet::empty(),
            last_completed_date: None,
            streak_started_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamp `updated_at` with the current wall-clock time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
