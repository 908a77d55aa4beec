use colony_task::TaskError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("creature {agent} has been removed from the simulation")]
    AgentRemoved { agent: u64 },

    #[error(transparent)]
    Task(#[from] TaskError),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
