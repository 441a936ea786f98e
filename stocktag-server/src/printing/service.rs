//! Label print service - job submission and status tracking
//!
//! Submission is fire-and-forget for the caller: a durable `print_jobs` row
//! is inserted and the job id is pushed to the worker channel, then returned
//! immediately so status can be polled independent of the HTTP request.

use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::db::repository::{item, print_job, RepoError};
use crate::utils::AppError;
use shared::models::{LabelSize, PrintJob};

#[derive(Debug, Error)]
pub enum PrintServiceError {
    #[error("Storage error: {0}")]
    Repo(#[from] RepoError),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Print queue closed")]
    QueueClosed,
}

pub type PrintServiceResult<T> = Result<T, PrintServiceError>;

impl From<PrintServiceError> for AppError {
    fn from(err: PrintServiceError) -> Self {
        match err {
            PrintServiceError::Repo(e) => e.into(),
            PrintServiceError::ItemNotFound(id) => {
                AppError::not_found(format!("Item {id} not found"))
            }
            PrintServiceError::QueueClosed => AppError::internal("Print queue closed"),
        }
    }
}

/// Label print service
#[derive(Clone)]
pub struct LabelPrintService {
    pool: SqlitePool,
    queue: mpsc::Sender<String>,
}

impl LabelPrintService {
    pub fn new(pool: SqlitePool, queue: mpsc::Sender<String>) -> Self {
        Self { pool, queue }
    }

    /// Queue a print job for an existing item and return it immediately
    ///
    /// The worker re-loads the item at execution time, so the render always
    /// reflects current record state rather than a submit-time snapshot.
    pub async fn submit(
        &self,
        item_id: &str,
        size: LabelSize,
        copies: u32,
    ) -> PrintServiceResult<PrintJob> {
        if item::find_by_id(&self.pool, item_id).await?.is_none() {
            return Err(PrintServiceError::ItemNotFound(item_id.to_string()));
        }

        let job = print_job::create(&self.pool, item_id, size, copies).await?;
        self.queue
            .send(job.id.clone())
            .await
            .map_err(|_| PrintServiceError::QueueClosed)?;

        tracing::info!(job_id = %job.id, item_id = %item_id, size = %size, copies, "Print job queued");
        Ok(job)
    }

    /// Fetch a job for status polling
    pub async fn get_job(&self, id: &str) -> PrintServiceResult<Option<PrintJob>> {
        Ok(print_job::find_by_id(&self.pool, id).await?)
    }

    /// Re-enqueue jobs left `queued` by a previous process (startup recovery)
    pub async fn requeue_pending(&self) -> PrintServiceResult<usize> {
        let ids = print_job::find_queued_ids(&self.pool).await?;
        let count = ids.len();
        for id in ids {
            self.queue
                .send(id)
                .await
                .map_err(|_| PrintServiceError::QueueClosed)?;
        }
        if count > 0 {
            tracing::info!(count, "Re-enqueued pending print jobs");
        }
        Ok(count)
    }
}

impl std::fmt::Debug for LabelPrintService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelPrintService").finish_non_exhaustive()
    }
}
