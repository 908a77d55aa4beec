use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task `{name}` was cancelled and cannot be assigned")]
    Cancelled { name: String },
}

pub type Result<T> = std::result::Result<T, TaskError>;
