//! Property tests for the progression invariants

use proptest::prelude::*;

use finquest::catalog::Catalog;
use finquest::core::config::ProgressionConfig;
use finquest::core::types::{CategoryId, ModuleId, SkillId};
use finquest::progression::activity::ACTIVITY_CAPACITY;
use finquest::progression::skill::Skill;
use finquest::progression::store::ProgressionStore;

fn module_paths(catalog: &Catalog) -> Vec<(CategoryId, SkillId, ModuleId)> {
    catalog
        .categories()
        .iter()
        .flat_map(|c| {
            c.skills.iter().flat_map(move |s| {
                s.modules
                    .iter()
                    .map(move |m| (c.id.clone(), s.id.clone(), m.id.clone()))
            })
        })
        .collect()
}

fn bare_skill(max_level: u8, base_max_xp: u32) -> Skill {
    Skill {
        id: SkillId::from("prop-skill"),
        name: "Prop Skill".to_string(),
        description: String::new(),
        level: 0,
        max_level,
        xp: 0,
        max_xp: base_max_xp,
        modules: Vec::new(),
        badges: Vec::new(),
        badge_rules: Vec::new(),
        locked: false,
        manual_lock: false,
        prerequisites: Vec::new(),
        resources: Vec::new(),
    }
}

proptest! {
    /// Any sequence of completion attempts (valid, repeated, or against
    /// locked skills) leaves every tree invariant intact
    #[test]
    fn prop_tree_invariants_hold(picks in prop::collection::vec(0usize..64, 0..80)) {
        let catalog = Catalog::builtin();
        let paths = module_paths(&catalog);
        let mut store = ProgressionStore::new(catalog, ProgressionConfig::default()).unwrap();

        let mut granted = 0u64;
        for pick in picks {
            let (cat, skill, module) = &paths[pick % paths.len()];
            if let Ok(outcome) = store.complete_module(cat, skill, module) {
                granted += u64::from(outcome.xp_awarded);
            }
        }

        prop_assert_eq!(store.user_stats().stats.total_xp, granted);
        prop_assert!(store.recent_activity().count() <= ACTIVITY_CAPACITY);

        for progress in store.all_skills() {
            let skill = &progress.skill;
            prop_assert!(skill.xp < skill.max_xp);
            prop_assert!(skill.level <= skill.max_level);
            prop_assert!(progress.completed_modules <= progress.total_modules);
            prop_assert!((0.0..=100.0).contains(&progress.progress));
        }
    }

    /// Completing the same module twice never double-grants: the total is
    /// exactly one award per distinct completed module
    #[test]
    fn prop_no_double_grant(picks in prop::collection::vec(0usize..64, 1..60)) {
        let catalog = Catalog::builtin();
        let paths = module_paths(&catalog);
        let mut store = ProgressionStore::new(catalog, ProgressionConfig::default()).unwrap();

        for pick in picks {
            let (cat, skill, module) = &paths[pick % paths.len()];
            let _ = store.complete_module(cat, skill, module);
        }

        let completed: usize = store
            .all_skills()
            .iter()
            .map(|p| p.completed_modules)
            .sum();
        prop_assert_eq!(store.user_stats().stats.total_xp, completed as u64 * 50);
    }

    /// The level-up rule keeps xp in [0, max_xp) and level at or below
    /// max_level for any award sequence
    #[test]
    fn prop_grant_xp_invariants(
        max_level in 1u8..6,
        base_max_xp in 50u32..500,
        awards in prop::collection::vec(0u32..1000, 0..40),
    ) {
        let mut skill = bare_skill(max_level, base_max_xp);
        for award in awards {
            skill.grant_xp(award, 1.5);
            prop_assert!(skill.xp < skill.max_xp);
            prop_assert!(skill.level <= skill.max_level);
        }
    }

    /// Weekly progress never exceeds the goal and never goes negative
    #[test]
    fn prop_weekly_progress_clamped(hours in prop::collection::vec(0.0f32..8.0, 0..30)) {
        let catalog = Catalog::builtin();
        let mut store = ProgressionStore::new(catalog, ProgressionConfig::default()).unwrap();

        for h in hours {
            store.update_weekly_progress(h).unwrap();
            let progress = store.user_stats().stats.weekly_progress;
            prop_assert!(progress >= 0.0);
            prop_assert!(progress <= store.config().weekly_goal_hours);
        }
    }
}
