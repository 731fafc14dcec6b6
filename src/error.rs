use thiserror::Error;

pub type Result<T> = std::result::Result<T, TasklaneError>;

#[derive(Debug, Error)]
pub enum TasklaneError {
    #[error("Duplicate column ID: {0}")]
    DuplicateColumn(String),

    #[error("Duplicate task ID: {0}")]
    DuplicateTask(String),

    #[error("Column {column} references unknown task {task}")]
    UnknownTask { column: String, task: String },

    #[error("Task {task} is placed in both {first} and {second}")]
    DuplicatePlacement {
        task: String,
        first: String,
        second: String,
    },

    #[error("Lane gate references unknown column: {0}")]
    UnknownGateColumn(String),

    #[error("Invalid task ID format: {0:?}")]
    InvalidTaskId(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
