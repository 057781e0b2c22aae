use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown activity: {0}")]
    UnknownActivity(Uuid),

    #[error("unknown swimlane: {0}")]
    UnknownSwimlane(Uuid),

    #[error("index {index} out of range for {len} swimlanes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("swimlane order does not match the current swimlanes")]
    InvalidOrder,
}
