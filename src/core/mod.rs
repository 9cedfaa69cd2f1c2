pub mod config;
pub mod error;
pub mod types;

pub use config::ProgressionConfig;
pub use error::{QuestError, Result};
pub use types::{CategoryId, ModuleId, SkillId};
