//! Catalog loading and validation
//!
//! Converts TOML catalog files (or the built-in default catalog) into the
//! runtime category/skill/module tree. All referential and structural
//! problems are rejected here, so the store can trust the tree it is
//! seeded with.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::catalog::schema::{CatalogFile, SkillDef};
use crate::core::types::{CategoryId, ModuleId, SkillId};
use crate::progression::skill::{BadgeRule, Category, Module, Resource, Skill};

/// Errors that can occur when loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate category id: {0}")]
    DuplicateCategory(String),

    #[error("duplicate skill id: {0}")]
    DuplicateSkill(String),

    #[error("duplicate module id {module} in skill {skill}")]
    DuplicateModule { skill: String, module: String },

    #[error("skill {0} has no modules")]
    EmptyModules(String),

    #[error("skill {skill} references unknown prerequisite {prerequisite}")]
    UnknownPrerequisite { skill: String, prerequisite: String },

    #[error("skill {0} lists itself as a prerequisite")]
    SelfPrerequisite(String),

    #[error("skill {0} has a zero XP threshold")]
    InvalidThreshold(String),

    #[error("skill {0} has max_level 0")]
    InvalidMaxLevel(String),

    #[error("skill {skill} attaches a badge to level {level}, but max_level is {max_level}")]
    BadgeLevelOutOfRange {
        skill: String,
        level: u8,
        max_level: u8,
    },
}

/// Embedded default catalog (financial-literacy content)
const DEFAULT_CATALOG: &str = include_str!("defaults.toml");

/// A validated catalog, ready to seed a store
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// The built-in financial-literacy catalog
    pub fn builtin() -> Self {
        Self::from_toml_str(DEFAULT_CATALOG).expect("built-in catalog is valid")
    }

    /// Load and validate a catalog from a TOML file on disk
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Load and validate a catalog from a TOML string
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::build(file)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn into_categories(self) -> Vec<Category> {
        self.categories
    }

    fn build(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut category_ids = HashSet::new();
        let mut skill_ids = HashSet::new();
        for cat in &file.categories {
            if !category_ids.insert(cat.id.as_str()) {
                return Err(CatalogError::DuplicateCategory(cat.id.clone()));
            }
            for skill in &cat.skills {
                if !skill_ids.insert(skill.id.as_str()) {
                    return Err(CatalogError::DuplicateSkill(skill.id.clone()));
                }
            }
        }

        let mut categories = Vec::with_capacity(file.categories.len());
        for cat in &file.categories {
            let mut skills = Vec::with_capacity(cat.skills.len());
            for def in &cat.skills {
                skills.push(build_skill(def, &skill_ids)?);
            }
            categories.push(Category {
                id: CategoryId::new(&cat.id),
                name: cat.name.clone(),
                theme: cat.theme.clone(),
                skills,
            });
        }

        tracing::debug!(
            "Catalog loaded: {} categories, {} skills",
            categories.len(),
            skill_ids.len()
        );

        Ok(Self { categories })
    }
}

fn build_skill(def: &SkillDef, known_skills: &HashSet<&str>) -> Result<Skill, CatalogError> {
    if def.modules.is_empty() {
        return Err(CatalogError::EmptyModules(def.id.clone()));
    }
    if def.base_max_xp == 0 {
        return Err(CatalogError::InvalidThreshold(def.id.clone()));
    }
    if def.max_level == 0 {
        return Err(CatalogError::InvalidMaxLevel(def.id.clone()));
    }

    let mut module_ids = HashSet::new();
    for module in &def.modules {
        if !module_ids.insert(module.id.as_str()) {
            return Err(CatalogError::DuplicateModule {
                skill: def.id.clone(),
                module: module.id.clone(),
            });
        }
    }

    for prereq in &def.prerequisites {
        if prereq == &def.id {
            return Err(CatalogError::SelfPrerequisite(def.id.clone()));
        }
        if !known_skills.contains(prereq.as_str()) {
            return Err(CatalogError::UnknownPrerequisite {
                skill: def.id.clone(),
                prerequisite: prereq.clone(),
            });
        }
    }

    for badge in &def.badges {
        if badge.level == 0 || badge.level > def.max_level {
            return Err(CatalogError::BadgeLevelOutOfRange {
                skill: def.id.clone(),
                level: badge.level,
                max_level: def.max_level,
            });
        }
    }

    // Lock state derives from prerequisites unless the catalog spells it
    // out; an explicit value that disagrees is a curated override
    let derived_lock = !def.prerequisites.is_empty();
    let locked = def.locked.unwrap_or(derived_lock);
    let manual_lock = def.locked.is_some() && locked != derived_lock;

    Ok(Skill {
        id: SkillId::new(&def.id),
        name: def.name.clone(),
        description: def.description.clone(),
        level: 0,
        max_level: def.max_level,
        xp: 0,
        max_xp: def.base_max_xp,
        modules: def
            .modules
            .iter()
            .map(|m| Module {
                id: ModuleId::new(&m.id),
                name: m.name.clone(),
                completed: false,
                duration_minutes: m.duration_minutes,
            })
            .collect(),
        badges: Vec::new(),
        badge_rules: def
            .badges
            .iter()
            .map(|b| BadgeRule {
                level: b.level,
                name: b.name.clone(),
            })
            .collect(),
        locked,
        manual_lock,
        prerequisites: def.prerequisites.iter().map(SkillId::new).collect(),
        resources: def
            .resources
            .iter()
            .map(|r| Resource {
                title: r.title.clone(),
                url: r.url.clone(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin();
        assert!(!catalog.categories().is_empty());
    }

    #[test]
    fn test_minimal_catalog() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[category]]
            id = "budgeting"
            name = "Budgeting"

            [[category.skill]]
            id = "first-budget"
            name = "Your First Budget"

            [[category.skill.module]]
            id = "income"
            name = "Tracking Income"
            "#,
        )
        .unwrap();

        let skill = catalog.categories()[0].skill(&SkillId::from("first-budget")).unwrap();
        assert_eq!(skill.max_level, 5);
        assert_eq!(skill.max_xp, 500);
        assert!(!skill.locked);
        assert!(!skill.manual_lock);
    }

    #[test]
    fn test_rejects_unknown_prerequisite() {
        let result = Catalog::from_toml_str(
            r#"
            [[category]]
            id = "c"
            name = "C"

            [[category.skill]]
            id = "a"
            name = "A"
            prerequisites = ["missing"]

            [[category.skill.module]]
            id = "m"
            name = "M"
            "#,
        );
        assert!(matches!(
            result,
            Err(CatalogError::UnknownPrerequisite { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_modules() {
        let result = Catalog::from_toml_str(
            r#"
            [[category]]
            id = "c"
            name = "C"

            [[category.skill]]
            id = "a"
            name = "A"
            "#,
        );
        assert!(matches!(result, Err(CatalogError::EmptyModules(_))));
    }

    #[test]
    fn test_rejects_duplicate_skill_across_categories() {
        let result = Catalog::from_toml_str(
            r#"
            [[category]]
            id = "c1"
            name = "C1"

            [[category.skill]]
            id = "a"
            name = "A"

            [[category.skill.module]]
            id = "m"
            name = "M"

            [[category]]
            id = "c2"
            name = "C2"

            [[category.skill]]
            id = "a"
            name = "A again"

            [[category.skill.module]]
            id = "m"
            name = "M"
            "#,
        );
        assert!(matches!(result, Err(CatalogError::DuplicateSkill(_))));
    }

    #[test]
    fn test_curated_lock_override() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[category]]
            id = "c"
            name = "C"

            [[category.skill]]
            id = "a"
            name = "A"
            locked = true

            [[category.skill.module]]
            id = "m"
            name = "M"
            "#,
        )
        .unwrap();

        let skill = catalog.categories()[0].skill(&SkillId::from("a")).unwrap();
        assert!(skill.locked);
        assert!(skill.manual_lock);
    }

    #[test]
    fn test_badge_level_out_of_range() {
        let result = Catalog::from_toml_str(
            r#"
            [[category]]
            id = "c"
            name = "C"

            [[category.skill]]
            id = "a"
            name = "A"
            max_level = 3

            [[category.skill.module]]
            id = "m"
            name = "M"

            [[category.skill.badge]]
            level = 4
            name = "Too High"
            "#,
        );
        assert!(matches!(
            result,
            Err(CatalogError::BadgeLevelOutOfRange { .. })
        ));
    }
}
