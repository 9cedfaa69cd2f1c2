//! Prerequisite-driven skill unlocking
//!
//! A prerequisite is satisfied once that skill has completed all of its
//! modules. After every mutation the store runs one pass over the tree and
//! unlocks any skill whose full prerequisite set is satisfied, unless the
//! skill carries a curated manual lock. One pass suffices: unlocking never
//! completes modules, so satisfaction cannot cascade within a mutation.

use ahash::AHashMap;

use crate::core::types::SkillId;
use crate::progression::skill::Category;

/// Evaluate prerequisites across the tree, flipping `locked` off where
/// they are all satisfied. Returns the ids of newly unlocked skills.
pub fn run_unlock_pass(categories: &mut [Category]) -> Vec<SkillId> {
    // Snapshot completion before mutating lock flags
    let completed: AHashMap<SkillId, bool> = categories
        .iter()
        .flat_map(|c| c.skills.iter())
        .map(|s| (s.id.clone(), s.is_fully_complete()))
        .collect();

    let mut unlocked = Vec::new();
    for category in categories.iter_mut() {
        for skill in category.skills.iter_mut() {
            if !skill.locked || skill.manual_lock {
                continue;
            }

            let satisfied = skill
                .prerequisites
                .iter()
                .all(|p| completed.get(p).copied().unwrap_or(false));

            if satisfied {
                skill.locked = false;
                unlocked.push(skill.id.clone());
            }
        }
    }

    unlocked
}
