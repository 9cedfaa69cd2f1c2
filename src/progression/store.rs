//! Progression store - owns the category/skill/module tree
//!
//! The single stateful engine: seeded once from a catalog, mutated through
//! a small set of named operations, read through derived projections. Every
//! mutation either applies atomically or returns a typed error without
//! touching state. The store is an explicit owned object; a concurrent host
//! wraps the whole thing in one mutex per user session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::core::config::ProgressionConfig;
use crate::core::error::{QuestError, Result};
use crate::core::types::{CategoryId, ModuleId, SkillId};
use crate::persistence::{Snapshot, SNAPSHOT_VERSION};
use crate::progression::activity::{ActivityEntry, ActivityFeed, ActivityKind};
use crate::progression::skill::{Category, Skill};
use crate::progression::stats::{StreakOutcome, UserStats};
use crate::progression::unlock::run_unlock_pass;

/// What a single `complete_module` call did
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub xp_awarded: u32,
    /// Levels reached by this award, in order (empty if no level-up)
    pub levels_reached: Vec<u8>,
    pub badges_earned: Vec<String>,
    /// Skills unlocked by the post-mutation prerequisite pass
    pub unlocked: Vec<SkillId>,
}

/// A skill merged with its derived progress fields and owning category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillProgress {
    pub category_id: CategoryId,
    pub category_name: String,
    pub category_theme: String,
    pub skill: Skill,
    pub completed_modules: usize,
    pub total_modules: usize,
    /// Completion percentage (0.0 to 100.0)
    pub progress: f32,
}

/// Aggregate stats with the tree-derived counts filled in
#[derive(Debug, Clone)]
pub struct StatsView {
    pub stats: UserStats,
    /// Aggregate user level derived from total XP
    pub level: u32,
    pub completed_skills: usize,
    pub in_progress_skills: usize,
}

/// The progression store
#[derive(Debug)]
pub struct ProgressionStore {
    categories: Vec<Category>,
    stats: UserStats,
    activity: ActivityFeed,
    config: ProgressionConfig,
}

impl ProgressionStore {
    /// Seed a fresh store from a catalog
    pub fn new(catalog: Catalog, config: ProgressionConfig) -> Result<Self> {
        config.validate().map_err(QuestError::InvalidArgument)?;

        let weekly_goal = config.weekly_goal_hours;
        Ok(Self {
            categories: catalog.into_categories(),
            stats: UserStats::new(weekly_goal),
            activity: ActivityFeed::new(),
            config,
        })
    }

    /// Rebuild a store from a previously saved snapshot
    pub fn from_snapshot(snapshot: Snapshot, config: ProgressionConfig) -> Result<Self> {
        config.validate().map_err(QuestError::InvalidArgument)?;

        Ok(Self {
            categories: snapshot.categories,
            stats: snapshot.stats,
            activity: snapshot.activity,
            config,
        })
    }

    /// Full-tree snapshot for the persistence provider
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: chrono::Utc::now(),
            categories: self.categories.clone(),
            stats: self.stats.clone(),
            activity: self.activity.clone(),
        }
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Mark a module complete, award XP, and run the level-up and unlock
    /// rules
    ///
    /// Rejects unknown paths with the matching `NotFound` error, locked
    /// skills with `SkillLocked`, and repeat completions with
    /// `AlreadyCompleted` (no second XP grant).
    pub fn complete_module(
        &mut self,
        category_id: &CategoryId,
        skill_id: &SkillId,
        module_id: &ModuleId,
    ) -> Result<CompletionOutcome> {
        let award = self.config.module_xp_award;
        let growth = self.config.xp_growth_factor;

        let category = self
            .categories
            .iter_mut()
            .find(|c| &c.id == category_id)
            .ok_or_else(|| QuestError::CategoryNotFound(category_id.clone()))?;
        let skill = category
            .skill_mut(skill_id)
            .ok_or_else(|| QuestError::SkillNotFound(skill_id.clone()))?;

        if skill.locked {
            return Err(QuestError::SkillLocked(skill_id.clone()));
        }

        let module = skill
            .module_mut(module_id)
            .ok_or_else(|| QuestError::ModuleNotFound(module_id.clone()))?;
        if module.completed {
            return Err(QuestError::AlreadyCompleted(module_id.clone()));
        }
        module.completed = true;

        let levels_reached = skill.grant_xp(award, growth);

        let mut badges_earned = Vec::new();
        for level in &levels_reached {
            let badge = skill.badge_for_level(*level).map(str::to_string);
            if let Some(badge) = badge {
                if !skill.badges.iter().any(|b| b == &badge) {
                    skill.badges.push(badge.clone());
                    badges_earned.push(badge);
                }
            }
        }

        self.stats.total_xp += u64::from(award);
        self.stats.hours_learned += self.config.hours_per_module;

        self.activity.record(ActivityKind::ModuleCompleted {
            category: category_id.clone(),
            skill: skill_id.clone(),
            module: module_id.clone(),
        });
        self.activity.record(ActivityKind::XpEarned {
            skill: skill_id.clone(),
            amount: award,
        });
        for badge in &badges_earned {
            self.activity.record(ActivityKind::BadgeEarned {
                skill: skill_id.clone(),
                badge: badge.clone(),
            });
        }

        let unlocked = run_unlock_pass(&mut self.categories);

        tracing::info!(
            "Completed module {} in {}/{} (+{} XP)",
            module_id,
            category_id,
            skill_id,
            award
        );
        for level in &levels_reached {
            tracing::info!("Skill {} reached level {}", skill_id, level);
        }
        for id in &unlocked {
            tracing::debug!("Skill {} unlocked", id);
        }

        Ok(CompletionOutcome {
            xp_awarded: award,
            levels_reached,
            badges_earned,
            unlocked,
        })
    }

    /// Add XP directly to the aggregate total (trusted internal callers
    /// only; no per-skill effect)
    pub fn add_xp(&mut self, amount: i64) -> Result<()> {
        if amount < 0 {
            return Err(QuestError::InvalidArgument(format!(
                "xp amount must be non-negative, got {amount}"
            )));
        }
        self.stats.total_xp += amount as u64;
        Ok(())
    }

    /// Log hours toward the weekly goal, clamped at the goal
    pub fn update_weekly_progress(&mut self, hours: f32) -> Result<()> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(QuestError::InvalidArgument(format!(
                "hours must be finite and non-negative, got {hours}"
            )));
        }
        self.stats.add_weekly_hours(hours);
        Ok(())
    }

    /// Credit today toward the streak (at most once per calendar date)
    pub fn record_streak_day(&mut self, today: NaiveDate) -> StreakOutcome {
        let outcome = self.stats.record_streak_day(today);
        if let StreakOutcome::Advanced { days } = outcome {
            self.activity.record(ActivityKind::StreakUpdated { days });
            tracing::info!("Streak advanced to {} day(s)", days);
        }
        outcome
    }

    /// Curated lock control; the unlock pass will not override it
    pub fn set_manual_lock(
        &mut self,
        category_id: &CategoryId,
        skill_id: &SkillId,
        locked: bool,
    ) -> Result<()> {
        let skill = self.skill_mut(category_id, skill_id)?;
        skill.locked = locked;
        skill.manual_lock = true;
        Ok(())
    }

    /// Drop a curated override and return the skill to prerequisite-derived
    /// locking
    pub fn clear_manual_lock(
        &mut self,
        category_id: &CategoryId,
        skill_id: &SkillId,
    ) -> Result<()> {
        let skill = self.skill_mut(category_id, skill_id)?;
        skill.manual_lock = false;
        run_unlock_pass(&mut self.categories);
        Ok(())
    }

    /// One skill with derived progress, or `None` if the path does not
    /// resolve
    pub fn skill_progress(
        &self,
        category_id: &CategoryId,
        skill_id: &SkillId,
    ) -> Option<SkillProgress> {
        let category = self.categories.iter().find(|c| &c.id == category_id)?;
        let skill = category.skill(skill_id)?;
        Some(Self::project(category, skill))
    }

    /// Every skill of every category, flattened in catalog order
    ///
    /// A snapshot, not a live view; re-fetch after mutations.
    pub fn all_skills(&self) -> Vec<SkillProgress> {
        self.categories
            .iter()
            .flat_map(|c| c.skills.iter().map(move |s| Self::project(c, s)))
            .collect()
    }

    /// Aggregate stats with completed / in-progress counts derived from
    /// the tree
    pub fn user_stats(&self) -> StatsView {
        let completed_skills = self
            .categories
            .iter()
            .flat_map(|c| c.skills.iter())
            .filter(|s| s.is_fully_complete())
            .count();
        let in_progress_skills = self
            .categories
            .iter()
            .flat_map(|c| c.skills.iter())
            .filter(|s| !s.is_fully_complete() && s.completed_modules() > 0)
            .count();

        StatsView {
            stats: self.stats.clone(),
            level: self.stats.level(self.config.user_level_xp),
            completed_skills,
            in_progress_skills,
        }
    }

    /// Recent activity, most recent first
    pub fn recent_activity(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.activity.recent()
    }

    fn skill_mut(&mut self, category_id: &CategoryId, skill_id: &SkillId) -> Result<&mut Skill> {
        let category = self
            .categories
            .iter_mut()
            .find(|c| &c.id == category_id)
            .ok_or_else(|| QuestError::CategoryNotFound(category_id.clone()))?;
        category
            .skill_mut(skill_id)
            .ok_or_else(|| QuestError::SkillNotFound(skill_id.clone()))
    }

    fn project(category: &Category, skill: &Skill) -> SkillProgress {
        SkillProgress {
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            category_theme: category.theme.clone(),
            skill: skill.clone(),
            completed_modules: skill.completed_modules(),
            total_modules: skill.total_modules(),
            progress: skill.progress_percent(),
        }
    }
}
