//! TOML catalog schema
//!
//! Raw deserialization targets for catalog files. These mirror the
//! authoring format; `loader` validates them and builds the runtime tree.

use serde::Deserialize;

fn default_theme() -> String {
    "slate".to_string()
}

fn default_max_level() -> u8 {
    5
}

fn default_base_max_xp() -> u32 {
    500
}

fn default_duration_minutes() -> u32 {
    15
}

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryDef>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryDef {
    pub id: String,
    pub name: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default, rename = "skill")]
    pub skills: Vec<SkillDef>,
}

#[derive(Debug, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_max_level")]
    pub max_level: u8,
    /// XP threshold for the first level-up
    #[serde(default = "default_base_max_xp")]
    pub base_max_xp: u32,
    /// Curated lock state. Omitted = derived: locked iff the skill has
    /// prerequisites. Writing a value that disagrees with the derivation
    /// marks the skill as manually curated.
    pub locked: Option<bool>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleDef>,
    #[serde(default, rename = "badge")]
    pub badges: Vec<BadgeDef>,
    #[serde(default, rename = "resource")]
    pub resources: Vec<ResourceDef>,
}

#[derive(Debug, Deserialize)]
pub struct ModuleDef {
    pub id: String,
    pub name: String,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
}

#[derive(Debug, Deserialize)]
pub struct BadgeDef {
    pub level: u8,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ResourceDef {
    pub title: String,
    pub url: String,
}
