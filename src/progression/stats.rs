//! Aggregate user statistics
//!
//! Totals across the whole tree: XP, streak, weekly time goal. The
//! per-skill counts (completed, in progress) are derived from the tree at
//! read time, not stored here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result of crediting a streak day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakOutcome {
    /// Today was already credited; nothing changed
    AlreadyCredited,
    /// The streak advanced (extended by one, or reset to 1 after a gap)
    Advanced { days: u32 },
}

/// Stored aggregate totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub total_xp: u64,
    pub streak_days: u32,
    /// Calendar date the streak was last credited
    pub last_streak_day: Option<NaiveDate>,
    /// Weekly time-spent goal, in hours
    pub weekly_goal: f32,
    /// Hours logged toward the weekly goal, clamped at the goal
    pub weekly_progress: f32,
    /// Coarse lifetime hours-learned counter
    pub hours_learned: f32,
}

impl UserStats {
    pub fn new(weekly_goal: f32) -> Self {
        Self {
            total_xp: 0,
            streak_days: 0,
            last_streak_day: None,
            weekly_goal,
            weekly_progress: 0.0,
            hours_learned: 0.0,
        }
    }

    /// Aggregate user level derived from total XP
    pub fn level(&self, xp_per_level: u64) -> u32 {
        (self.total_xp / xp_per_level) as u32 + 1
    }

    /// Add hours toward the weekly goal, clamped so progress never
    /// exceeds the goal
    pub fn add_weekly_hours(&mut self, hours: f32) {
        self.weekly_progress = (self.weekly_progress + hours).min(self.weekly_goal);
    }

    /// Credit at most one streak day per calendar date
    ///
    /// Consecutive-day activity extends the streak; a gap of more than
    /// one day resets it to 1. Dates at or before the last credited day
    /// are ignored.
    pub fn record_streak_day(&mut self, today: NaiveDate) -> StreakOutcome {
        match self.last_streak_day {
            Some(last) if (today - last).num_days() <= 0 => StreakOutcome::AlreadyCredited,
            Some(last) if (today - last).num_days() == 1 => {
                self.streak_days += 1;
                self.last_streak_day = Some(today);
                StreakOutcome::Advanced {
                    days: self.streak_days,
                }
            }
            _ => {
                self.streak_days = 1;
                self.last_streak_day = Some(today);
                StreakOutcome::Advanced { days: 1 }
            }
        }
    }
}
