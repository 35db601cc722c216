use thiserror::Error;

#[derive(Debug, Error)]
pub enum CadenceError {
    #[error("not initialized: run 'cadence init'")]
    NotInitialized,

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("no plan saved for {0}")]
    PlanNotFound(String),

    #[error("invalid action type: {0}")]
    InvalidActionType(String),

    #[error("invalid action state: {0}")]
    InvalidActionState(String),

    #[error("invalid channel: {0}")]
    InvalidChannel(String),

    #[error("invalid capacity tier '{0}': must be micro, light, standard, or heavy")]
    InvalidTier(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CadenceError>;
