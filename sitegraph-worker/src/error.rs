use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("A request is already in flight on this worker")]
    Busy,

    #[error("Worker has shut down")]
    Closed,

    #[error("Worker dropped the request without replying")]
    ReplyDropped,

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, WorkerError>;
