use crate::error::{Result, WorkerError};
use crate::message::{Request, Response};
use sitegraph_core::{SitegraphConfig, build_dataset};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Run the engine over one request and wrap the outcome as a reply.
/// Never fails: every error becomes `Response::Error`.
pub fn process(request: &Request, config: &SitegraphConfig) -> Response {
    match build_dataset(&request.content, request.format, config) {
        Ok(data) => Response::Success { data },
        Err(e) => {
            debug!("Request failed: {}", e);
            Response::Error {
                message: e.to_string(),
            }
        }
    }
}

struct Job {
    request: Request,
    reply: oneshot::Sender<Response>,
}

/// Handle to an isolated engine task.
///
/// At most one request is in flight: the permit taken on submit is held by
/// the returned [`PendingReply`] until the reply is consumed or dropped.
pub struct EngineWorker {
    sender: mpsc::Sender<Job>,
    in_flight: Arc<Semaphore>,
    handle: JoinHandle<()>,
}

/// Reply slot for a submitted request
pub struct PendingReply {
    receiver: oneshot::Receiver<Response>,
    _permit: OwnedSemaphorePermit,
}

impl PendingReply {
    pub async fn recv(self) -> Result<Response> {
        self.receiver.await.map_err(|_| WorkerError::ReplyDropped)
    }
}

impl EngineWorker {
    pub fn spawn() -> Self {
        Self::with_config(SitegraphConfig::default())
    }

    pub fn with_config(config: SitegraphConfig) -> Self {
        let (sender, receiver) = mpsc::channel(1);
        let handle = tokio::spawn(run(receiver, Arc::new(config)));

        Self {
            sender,
            in_flight: Arc::new(Semaphore::new(1)),
            handle,
        }
    }

    /// Submit a request, waiting until any in-flight request has been answered
    pub async fn submit(&self, request: Request) -> Result<PendingReply> {
        let permit = self
            .in_flight
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| WorkerError::Closed)?;
        self.dispatch(request, permit).await
    }

    /// Submit a request, failing with [`WorkerError::Busy`] if one is in flight
    pub async fn try_submit(&self, request: Request) -> Result<PendingReply> {
        let permit = match self.in_flight.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(TryAcquireError::NoPermits) => return Err(WorkerError::Busy),
            Err(TryAcquireError::Closed) => return Err(WorkerError::Closed),
        };
        self.dispatch(request, permit).await
    }

    /// Submit and wait for the reply
    pub async fn request(&self, request: Request) -> Result<Response> {
        self.submit(request).await?.recv().await
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.available_permits() == 0
    }

    async fn dispatch(&self, request: Request, permit: OwnedSemaphorePermit) -> Result<PendingReply> {
        let (reply, receiver) = oneshot::channel();
        self.sender
            .send(Job { request, reply })
            .await
            .map_err(|_| WorkerError::Closed)?;

        Ok(PendingReply {
            receiver,
            _permit: permit,
        })
    }

    /// Close the channel and wait for the task to finish its current job
    pub async fn shutdown(self) -> Result<()> {
        let Self {
            sender,
            in_flight,
            handle,
        } = self;
        in_flight.close();
        drop(sender);
        handle.await?;
        Ok(())
    }
}

async fn run(mut receiver: mpsc::Receiver<Job>, config: Arc<SitegraphConfig>) {
    info!("Engine worker started");

    while let Some(Job { request, reply }) = receiver.recv().await {
        debug!(
            "Processing {} request ({} bytes)",
            request.format.as_str(),
            request.content.len()
        );

        let config = config.clone();
        let response = match tokio::task::spawn_blocking(move || process(&request, &config)).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Engine task failed: {}", e);
                Response::Error {
                    message: format!("Engine task failed: {}", e),
                }
            }
        };

        if reply.send(response).is_err() {
            debug!("Caller went away before the reply was sent");
        }
    }

    info!("Engine worker stopped");
}
