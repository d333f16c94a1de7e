//! In-process background task queue.
//!
//! Tasks are dispatched with a non-blocking send on a bounded channel. A full or closed queue
//! drops the task with a warning; request handling never waits on the worker.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

/// Which profile a sign-up created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpKind {
    Center,
    Lector,
}

impl std::fmt::Display for SignUpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Center => write!(f, "center"),
            Self::Lector => write!(f, "lector"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundTask {
    /// A committed sign-up awaiting admin review.
    SignUpSubmitted { kind: SignUpKind, id: Uuid },
}

/// Sending half of the task queue, shared by the services.
#[derive(Clone)]
pub struct TaskQueue {
    sender: mpsc::Sender<BackgroundTask>,
}

impl TaskQueue {
    /// Create the queue and hand back the receiving end for a worker.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<BackgroundTask>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Create the queue and spawn the worker draining it.
    pub fn start(capacity: usize) -> (Self, JoinHandle<()>) {
        let (queue, receiver) = Self::channel(capacity);
        (queue, start_task_worker(receiver))
    }

    /// Fire-and-forget dispatch. Returns whether the task was queued.
    pub fn dispatch(&self, task: BackgroundTask) -> bool {
        match self.sender.try_send(task) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(task)) => {
                warn!(?task, "Task queue full, dropping task");
                false
            }
            Err(mpsc::error::TrySendError::Closed(task)) => {
                warn!(?task, "Task queue closed, dropping task");
                false
            }
        }
    }
}

/// Spawn the worker that drains the queue until every sender is gone.
pub fn start_task_worker(mut receiver: mpsc::Receiver<BackgroundTask>) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Background task worker started");
        while let Some(task) = receiver.recv().await {
            run_task(&task);
        }
        info!("Background task worker stopped");
    })
}

fn run_task(task: &BackgroundTask) {
    match task {
        BackgroundTask::SignUpSubmitted { kind, id } => {
            info!(kind = %kind, id = %id, "Sign-up submitted for review");
        }
    }
}
