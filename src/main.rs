//! FinQuest - Entry Point
//!
//! Interactive shell around the progression store: seeds the skill tree
//! from a catalog (built-in or a TOML file), optionally restores a saved
//! snapshot, and maps each command to one store operation.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use finquest::catalog::Catalog;
use finquest::core::config::ProgressionConfig;
use finquest::core::error::{QuestError, Result};
use finquest::core::types::{CategoryId, ModuleId, SkillId};
use finquest::persistence::{JsonSnapshotStore, SnapshotStore};
use finquest::progression::activity::ActivityKind;
use finquest::progression::store::ProgressionStore;

/// FinQuest interactive shell
#[derive(Parser, Debug)]
#[command(name = "finquest")]
#[command(about = "Gamified financial-literacy progression engine")]
struct Args {
    /// Catalog TOML file (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Snapshot file to restore from and save to
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Weekly time-spent goal in hours
    #[arg(long)]
    weekly_goal: Option<f32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("finquest=info")
        .init();

    let args = Args::parse();

    let mut config = ProgressionConfig::default();
    if let Some(goal) = args.weekly_goal {
        config.weekly_goal_hours = goal;
    }

    let catalog = match &args.catalog {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::builtin(),
    };

    let snapshot_store = args.snapshot.as_ref().map(JsonSnapshotStore::new);
    let mut store = match snapshot_store.as_ref().and_then(|s| s.load().transpose()) {
        Some(loaded) => {
            let snapshot = loaded.map_err(QuestError::Snapshot)?;
            tracing::info!("Restored snapshot saved at {}", snapshot.saved_at);
            ProgressionStore::from_snapshot(snapshot, config)?
        }
        None => ProgressionStore::new(catalog, config)?,
    };

    println!("\n=== FINQUEST ===");
    println!("Learn money skills, earn XP, keep the streak alive");
    println!();
    println!("Commands:");
    println!("  skills                        - List every skill with progress");
    println!("  skill <cat> <skill>           - Show one skill in detail");
    println!("  complete <cat> <skill> <mod>  - Complete a module");
    println!("  hours <h>                     - Log hours toward the weekly goal");
    println!("  streak                        - Credit today toward the streak");
    println!("  stats                         - Show aggregate stats");
    println!("  activity                      - Show the recent-activity feed");
    println!("  quit / q                      - Save (if configured) and exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["skills"] => display_skills(&store),
            ["skill", cat, skill] => {
                match store.skill_progress(&CategoryId::from(*cat), &SkillId::from(*skill)) {
                    Some(progress) => display_skill_detail(&progress),
                    None => println!("No such skill: {}/{}", cat, skill),
                }
            }
            ["complete", cat, skill, module] => {
                let result = store.complete_module(
                    &CategoryId::from(*cat),
                    &SkillId::from(*skill),
                    &ModuleId::from(*module),
                );
                match result {
                    Ok(outcome) => {
                        println!("+{} XP", outcome.xp_awarded);
                        for level in &outcome.levels_reached {
                            println!("Level up! {} is now level {}", skill, level);
                        }
                        for badge in &outcome.badges_earned {
                            println!("Badge earned: {}", badge);
                        }
                        for id in &outcome.unlocked {
                            println!("Unlocked: {}", id);
                        }
                    }
                    Err(e) => println!("Cannot complete: {}", e),
                }
            }
            ["hours", h] => match h.parse::<f32>() {
                Ok(hours) => match store.update_weekly_progress(hours) {
                    Ok(()) => {
                        let view = store.user_stats();
                        println!(
                            "Weekly progress: {:.1}/{:.1} hours",
                            view.stats.weekly_progress, view.stats.weekly_goal
                        );
                    }
                    Err(e) => println!("Cannot log hours: {}", e),
                },
                Err(_) => println!("Usage: hours <number>"),
            },
            ["streak"] => {
                let today = chrono::Utc::now().date_naive();
                let outcome = store.record_streak_day(today);
                let view = store.user_stats();
                println!(
                    "Streak: {} day(s) ({:?})",
                    view.stats.streak_days, outcome
                );
            }
            ["stats"] => display_stats(&store),
            ["activity"] => display_activity(&store),
            _ => println!(
                "Unknown command. Available: skills, skill, complete, hours, streak, stats, activity, quit"
            ),
        }
    }

    if let Some(snapshot_store) = &snapshot_store {
        snapshot_store
            .save(&store.snapshot())
            .map_err(QuestError::Snapshot)?;
        println!("Saved to {}", snapshot_store.path().display());
    }

    let view = store.user_stats();
    println!(
        "\nGoodbye! Level {} with {} XP, {} skill(s) completed.",
        view.level, view.stats.total_xp, view.completed_skills
    );
    Ok(())
}

fn display_skills(store: &ProgressionStore) {
    println!();
    for progress in store.all_skills() {
        let lock = if progress.skill.locked { " [locked]" } else { "" };
        println!(
            "  {}/{} - {} - Lv {} - {:.0}% ({}/{} modules){}",
            progress.category_id,
            progress.skill.id,
            progress.skill.name,
            progress.skill.level,
            progress.progress,
            progress.completed_modules,
            progress.total_modules,
            lock
        );
    }
    println!();
}

fn display_skill_detail(progress: &finquest::progression::store::SkillProgress) {
    let skill = &progress.skill;
    println!();
    println!("{} ({})", skill.name, progress.category_name);
    println!("  {}", skill.description);
    println!(
        "  Level {}/{} - {}/{} XP - {:.0}% complete",
        skill.level, skill.max_level, skill.xp, skill.max_xp, progress.progress
    );
    if skill.locked {
        let prereqs: Vec<&str> = skill.prerequisites.iter().map(|p| p.as_str()).collect();
        println!("  Locked (prerequisites: {})", prereqs.join(", "));
    }
    println!("  Modules:");
    for module in &skill.modules {
        let mark = if module.completed { "x" } else { " " };
        println!(
            "    [{}] {} - {} ({} min)",
            mark, module.id, module.name, module.duration_minutes
        );
    }
    if !skill.badges.is_empty() {
        println!("  Badges: {}", skill.badges.join(", "));
    }
    for resource in &skill.resources {
        println!("  Resource: {} <{}>", resource.title, resource.url);
    }
    println!();
}

fn display_stats(store: &ProgressionStore) {
    let view = store.user_stats();
    println!();
    println!("  Level {} ({} XP total)", view.level, view.stats.total_xp);
    println!(
        "  Skills: {} completed, {} in progress",
        view.completed_skills, view.in_progress_skills
    );
    println!("  Streak: {} day(s)", view.stats.streak_days);
    println!(
        "  This week: {:.1}/{:.1} hours ({:.1} hours learned overall)",
        view.stats.weekly_progress, view.stats.weekly_goal, view.stats.hours_learned
    );
    println!();
}

fn display_activity(store: &ProgressionStore) {
    println!();
    let mut empty = true;
    for entry in store.recent_activity() {
        empty = false;
        let when = entry.at.format("%Y-%m-%d %H:%M");
        match &entry.kind {
            ActivityKind::ModuleCompleted {
                category,
                skill,
                module,
            } => println!("  {} completed {}/{}/{}", when, category, skill, module),
            ActivityKind::XpEarned { skill, amount } => {
                println!("  {} earned {} XP in {}", when, amount, skill)
            }
            ActivityKind::BadgeEarned { skill, badge } => {
                println!("  {} earned badge \"{}\" in {}", when, badge, skill)
            }
            ActivityKind::StreakUpdated { days } => {
                println!("  {} streak updated to {} day(s)", when, days)
            }
        }
    }
    if empty {
        println!("  (no activity yet)");
    }
    println!();
}
