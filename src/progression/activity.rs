//! Bounded recent-activity feed
//!
//! Keeps the most recent N entries in a ring; the oldest entry is evicted
//! when a new one arrives at capacity.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::types::{CategoryId, ModuleId, SkillId};

/// Maximum activity entries to keep
pub const ACTIVITY_CAPACITY: usize = 10;

/// What happened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActivityKind {
    ModuleCompleted {
        category: CategoryId,
        skill: SkillId,
        module: ModuleId,
    },
    XpEarned {
        skill: SkillId,
        amount: u32,
    },
    BadgeEarned {
        skill: SkillId,
        badge: String,
    },
    StreakUpdated {
        days: u32,
    },
}

/// A timestamped record of one user-visible progression event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    pub kind: ActivityKind,
}

/// The bounded feed itself
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityFeed {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityFeed {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(ACTIVITY_CAPACITY),
        }
    }

    /// Append an entry stamped with the current time, evicting the oldest
    /// entry at capacity
    pub fn record(&mut self, kind: ActivityKind) {
        if self.entries.len() >= ACTIVITY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(ActivityEntry {
            id: Uuid::new_v4(),
            at: Utc::now(),
            kind,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries most recent first
    pub fn recent(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().rev()
    }
}
