//! Skill tree data types and the level-up rule
//!
//! A skill accumulates XP from completed modules. Crossing the XP
//! threshold raises the level, carries the remainder over, and grows the
//! threshold by a fixed factor. One award can cross several thresholds;
//! the check loops until the remainder sits below the current threshold.

use serde::{Deserialize, Serialize};

use crate::core::types::{CategoryId, ModuleId, SkillId};

/// The smallest unit of completable content within a skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub completed: bool,
    /// Estimated time to finish, in minutes
    pub duration_minutes: u32,
}

/// A supplementary resource attached to a skill (article, worksheet, video)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

/// Attaches a badge name to a skill level; reaching the level earns it once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeRule {
    pub level: u8,
    pub name: String,
}

/// A learning topic with levels, XP, and an ordered set of modules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    /// Current level, 0 until the first threshold is crossed
    pub level: u8,
    pub max_level: u8,
    /// XP accumulated toward the next level, always below `max_xp`
    pub xp: u32,
    /// XP threshold for the next level-up
    pub max_xp: u32,
    pub modules: Vec<Module>,
    /// Badge names earned so far, in the order they were earned
    pub badges: Vec<String>,
    pub badge_rules: Vec<BadgeRule>,
    pub locked: bool,
    /// Curated lock override; the unlock pass never touches a skill with
    /// this flag set
    pub manual_lock: bool,
    pub prerequisites: Vec<SkillId>,
    pub resources: Vec<Resource>,
}

impl Skill {
    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| &m.id == id)
    }

    pub fn module_mut(&mut self, id: &ModuleId) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| &m.id == id)
    }

    pub fn total_modules(&self) -> usize {
        self.modules.len()
    }

    pub fn completed_modules(&self) -> usize {
        self.modules.iter().filter(|m| m.completed).count()
    }

    /// Completion percentage over this skill's modules (0.0 to 100.0)
    pub fn progress_percent(&self) -> f32 {
        if self.modules.is_empty() {
            return 0.0;
        }
        self.completed_modules() as f32 / self.total_modules() as f32 * 100.0
    }

    /// All modules done
    pub fn is_fully_complete(&self) -> bool {
        !self.modules.is_empty() && self.modules.iter().all(|m| m.completed)
    }

    /// Badge attached to `level` by this skill's rules, if any
    pub fn badge_for_level(&self, level: u8) -> Option<&str> {
        self.badge_rules
            .iter()
            .find(|r| r.level == level)
            .map(|r| r.name.as_str())
    }

    /// Grant XP and apply the level-up rule
    ///
    /// Loops the threshold check so an award large enough to cross two
    /// thresholds raises the level twice. Each level-up carries the
    /// remainder over and grows the threshold by `growth_factor`, floored
    /// to an integer. At `max_level` the XP saturates at `max_xp - 1`.
    ///
    /// Returns the levels reached, in order.
    pub fn grant_xp(&mut self, amount: u32, growth_factor: f32) -> Vec<u8> {
        self.xp = self.xp.saturating_add(amount);

        let mut reached = Vec::new();
        while self.xp >= self.max_xp && self.level < self.max_level {
            self.xp -= self.max_xp;
            self.level += 1;
            self.max_xp = (self.max_xp as f32 * growth_factor) as u32;
            reached.push(self.level);
        }

        // Mastered skills hold just below the threshold instead of
        // accumulating unbounded overflow
        if self.level >= self.max_level && self.xp >= self.max_xp {
            self.xp = self.max_xp.saturating_sub(1);
        }

        reached
    }
}

/// A themed group of skills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Visual theme tag the presentation layer maps to colors
    pub theme: String,
    pub skills: Vec<Skill>,
}

impl Category {
    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|s| &s.id == id)
    }

    pub fn skill_mut(&mut self, id: &SkillId) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| &s.id == id)
    }
}
