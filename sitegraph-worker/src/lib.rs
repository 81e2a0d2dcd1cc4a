pub mod error;
pub mod message;
pub mod worker;

pub use error::WorkerError;
pub use message::{Request, Response};
pub use worker::{EngineWorker, PendingReply, process};
