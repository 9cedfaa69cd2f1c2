//! Progression layer - the skill tree, user stats, and the store that
//! mutates them

pub mod activity;
pub mod skill;
pub mod stats;
pub mod store;
pub mod unlock;

pub use activity::{ActivityEntry, ActivityFeed, ActivityKind, ACTIVITY_CAPACITY};
pub use skill::{BadgeRule, Category, Module, Resource, Skill};
pub use stats::{StreakOutcome, UserStats};
pub use store::{CompletionOutcome, ProgressionStore, SkillProgress, StatsView};
pub use unlock::run_unlock_pass;
