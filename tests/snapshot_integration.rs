//! Integration tests for snapshot persistence through the store

use finquest::catalog::Catalog;
use finquest::core::config::ProgressionConfig;
use finquest::core::types::{CategoryId, ModuleId, SkillId};
use finquest::persistence::{JsonSnapshotStore, SnapshotStore};
use finquest::progression::store::ProgressionStore;

fn seeded_store() -> ProgressionStore {
    ProgressionStore::new(Catalog::builtin(), ProgressionConfig::default()).unwrap()
}

/// Test 1: save/load restores the tree, stats, and activity feed
#[test]
fn test_snapshot_round_trip() {
    let mut store = seeded_store();
    store
        .complete_module(
            &CategoryId::from("budgeting"),
            &SkillId::from("first-budget"),
            &ModuleId::from("income-tracking"),
        )
        .unwrap();
    store.update_weekly_progress(2.5).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file_store = JsonSnapshotStore::new(dir.path().join("session.json"));
    file_store.save(&store.snapshot()).unwrap();

    let loaded = file_store.load().unwrap().unwrap();
    let restored = ProgressionStore::from_snapshot(loaded, ProgressionConfig::default()).unwrap();

    let before = store.user_stats();
    let after = restored.user_stats();
    assert_eq!(after.stats.total_xp, before.stats.total_xp);
    assert_eq!(after.stats.weekly_progress, before.stats.weekly_progress);
    assert_eq!(after.in_progress_skills, before.in_progress_skills);

    let progress = restored
        .skill_progress(&CategoryId::from("budgeting"), &SkillId::from("first-budget"))
        .unwrap();
    assert_eq!(progress.completed_modules, 1);

    let restored_activity: Vec<_> = restored.recent_activity().collect();
    let original_activity: Vec<_> = store.recent_activity().collect();
    assert_eq!(restored_activity.len(), original_activity.len());
}

/// Test 2: a restored store keeps progressing where it left off
#[test]
fn test_restored_store_continues() {
    let mut store = seeded_store();
    store
        .complete_module(
            &CategoryId::from("saving"),
            &SkillId::from("emergency-fund"),
            &ModuleId::from("why-emergency-funds"),
        )
        .unwrap();

    let snapshot = store.snapshot();
    let mut restored =
        ProgressionStore::from_snapshot(snapshot, ProgressionConfig::default()).unwrap();

    // Completed module stays completed
    let result = restored.complete_module(
        &CategoryId::from("saving"),
        &SkillId::from("emergency-fund"),
        &ModuleId::from("why-emergency-funds"),
    );
    assert!(result.is_err());

    // The next module still works
    restored
        .complete_module(
            &CategoryId::from("saving"),
            &SkillId::from("emergency-fund"),
            &ModuleId::from("sizing-your-fund"),
        )
        .unwrap();
    assert_eq!(restored.user_stats().stats.total_xp, 100);
}

/// Test 3: absent snapshot file means "use defaults"
#[test]
fn test_absent_snapshot_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file_store = JsonSnapshotStore::new(dir.path().join("none.json"));
    assert!(file_store.load().unwrap().is_none());
}
