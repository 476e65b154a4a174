use thiserror::Error;

/// Errors raised while executing a task graph
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Task execution failed: {0}")]
    TaskExecutionFailed(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Context error: {0}")]
    ContextError(String),

    #[error("Graph '{0}' has no start task")]
    MissingStartTask(String),

    #[error("Graph execution exceeded {0} steps")]
    StepLimitExceeded(usize),
}

pub type Result<T> = std::result::Result<T, FlowError>;
