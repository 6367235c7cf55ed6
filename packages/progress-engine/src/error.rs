use thiserror::Error;

/// Rejected achievement catalog. Raised only while building an
/// [`AchievementEngine`](crate::achievements::AchievementEngine).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("achievement definition has an empty id")]
    EmptyId,
    #[error("duplicate achievement id: {0}")]
    DuplicateId(String),
    #[error("achievement {id} has invalid requirement {requirement}")]
    InvalidRequirement { id: String, requirement: u32 },
    #[error("catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QualityError {
    #[error("unsupported response quality: {0}")]
    Unsupported(u8),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),
}
