use thiserror::Error;

use crate::core::types::{CategoryId, ModuleId, SkillId};

#[derive(Error, Debug)]
pub enum QuestError {
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("skill not found: {0}")]
    SkillNotFound(SkillId),

    #[error("module not found: {0}")]
    ModuleNotFound(ModuleId),

    #[error("module already completed: {0}")]
    AlreadyCompleted(ModuleId),

    #[error("skill is locked: {0}")]
    SkillLocked(SkillId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] crate::persistence::SnapshotError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuestError>;
