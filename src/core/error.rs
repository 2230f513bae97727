use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Unknown hex: {0}")]
    UnknownHex(String),

    #[error("Monster not found: {0}")]
    MonsterNotFound(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Lore gateway error: {0}")]
    LoreError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
