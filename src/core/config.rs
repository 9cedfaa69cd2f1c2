//! Progression tuning constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

/// Configuration for the progression engine
///
/// These values control pacing: how fast skills level, how quickly the
/// weekly goal fills, and how the aggregate user level is derived.
#[derive(Debug, Clone)]
pub struct ProgressionConfig {
    /// XP granted to a skill for each completed module
    ///
    /// At the default award (50) and default base threshold (500), a
    /// fresh skill reaches level 1 after ten modules.
    pub module_xp_award: u32,

    /// Multiplier applied to a skill's XP threshold on each level-up
    ///
    /// The new threshold is floored to an integer: 500 becomes 750,
    /// 750 becomes 1125. Growth keeps later levels meaningfully slower.
    pub xp_growth_factor: f32,

    /// Hours credited to the time-learned counter per completed module
    ///
    /// A coarse estimate, not wall-clock measurement. At 0.5, finishing
    /// a four-module skill credits two hours.
    pub hours_per_module: f32,

    /// Default weekly time-spent goal, in hours
    ///
    /// Weekly progress is clamped at this goal; overshoot is discarded
    /// rather than banked into the next week.
    pub weekly_goal_hours: f32,

    /// Total XP required per aggregate user level
    ///
    /// The user level shown in stats is `total_xp / user_level_xp + 1`,
    /// so a fresh account starts at level 1.
    pub user_level_xp: u64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            module_xp_award: 50,
            xp_growth_factor: 1.5,
            hours_per_module: 0.5,
            weekly_goal_hours: 10.0,
            user_level_xp: 1000,
        }
    }
}

impl ProgressionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.module_xp_award == 0 {
            return Err("module_xp_award must be positive".into());
        }

        // Growth below 1.0 would shrink thresholds and let a single award
        // cascade through every remaining level
        if self.xp_growth_factor < 1.0 {
            return Err(format!(
                "xp_growth_factor ({}) must be >= 1.0",
                self.xp_growth_factor
            ));
        }

        if !self.hours_per_module.is_finite() || self.hours_per_module < 0.0 {
            return Err(format!(
                "hours_per_module ({}) must be finite and non-negative",
                self.hours_per_module
            ));
        }

        if !self.weekly_goal_hours.is_finite() || self.weekly_goal_hours <= 0.0 {
            return Err(format!(
                "weekly_goal_hours ({}) must be finite and positive",
                self.weekly_goal_hours
            ));
        }

        if self.user_level_xp == 0 {
            return Err("user_level_xp must be positive".into());
        }

        Ok(())
    }
}
