//! Validation worker pool.
//!
//! Each worker is a task that owns one [`ValidatorWorker`] (and so one store
//! connection) for its whole life. Requests reach a worker over its own
//! channel and are answered on a oneshot; no connection is ever shared.

use chrono::{DateTime, Utc};
use lfs_auth_token::{Identity, StoreError, ValidatorWorker};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

const QUEUE_DEPTH: usize = 64;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("validation worker {0} is no longer running")]
    WorkerGone(usize),
}

struct AuthJob {
    header: Option<String>,
    now: DateTime<Utc>,
    reply: oneshot::Sender<Result<Option<Identity>, StoreError>>,
}

pub struct ValidatorPool {
    workers: Vec<mpsc::Sender<AuthJob>>,
    next: AtomicUsize,
}

impl ValidatorPool {
    /// Spawn `size` workers (at least one) validating against `database_path`.
    ///
    /// Must be called from within a tokio runtime. Connections are opened
    /// lazily by each worker on its first well-formed request.
    pub fn spawn(database_path: &Path, size: usize) -> Self {
        let workers = (0..size.max(1))
            .map(|id| {
                let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
                tokio::spawn(run_worker(id, ValidatorWorker::new(database_path), rx));
                tx
            })
            .collect();

        Self {
            workers,
            next: AtomicUsize::new(0),
        }
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Hand the header to the next worker, round-robin.
    pub async fn authenticate(
        &self,
        header: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Option<Identity>, PoolError> {
        let id = self.next.fetch_add(1, Ordering::Relaxed) % self.workers.len();
        let (reply, answer) = oneshot::channel();

        self.workers[id]
            .send(AuthJob { header, now, reply })
            .await
            .map_err(|_| PoolError::WorkerGone(id))?;

        let result = answer.await.map_err(|_| PoolError::WorkerGone(id))?;
        Ok(result?)
    }
}

async fn run_worker(id: usize, mut worker: ValidatorWorker, mut jobs: mpsc::Receiver<AuthJob>) {
    tracing::debug!(worker = id, database = %worker.database_path().display(), "validation worker started");
    while let Some(job) = jobs.recv().await {
        let result = worker.authenticate(job.header.as_deref(), job.now).await;
        // The requester may have gone away; nothing to do then.
        let _ = job.reply.send(result);
    }
    tracing::debug!(worker = id, "validation worker stopped");
}
