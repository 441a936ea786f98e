//! Print Worker
//!
//! 监听打印任务通道，渲染标签并调用外部打印命令。
//! 每个任务占用一个信号量槽位并发执行，卡住的打印命令不会阻塞队列。

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::db::repository::{item, print_job};
use crate::printing::executor::PrintExecutor;
use stocktag_label::{label_filename, LabelContent, LabelRenderer};

/// 打印工作者
///
/// 从 mpsc 通道接收任务 id，逐个执行：
/// - 重新加载记录（渲染使用当前状态，而非提交时的快照）
/// - 渲染标签 PDF
/// - 调用打印命令并捕获结果
pub struct PrintWorker {
    pool: SqlitePool,
    renderer: LabelRenderer,
    executor: PrintExecutor,
    labels_dir: PathBuf,
    public_base_url: String,
    max_in_flight: usize,
}

impl PrintWorker {
    pub fn new(
        pool: SqlitePool,
        renderer: LabelRenderer,
        executor: PrintExecutor,
        labels_dir: PathBuf,
        public_base_url: String,
        max_in_flight: usize,
    ) -> Self {
        Self {
            pool,
            renderer,
            executor,
            labels_dir,
            public_base_url,
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// 运行工作者（阻塞直到通道关闭或收到 shutdown 信号）
    pub async fn run(self, mut job_rx: mpsc::Receiver<String>, shutdown: CancellationToken) {
        tracing::info!(max_in_flight = self.max_in_flight, "Print worker started");
        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let worker = Arc::new(self);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Print worker received shutdown signal");
                    break;
                }
                job = job_rx.recv() => {
                    let Some(job_id) = job else {
                        tracing::info!("Print channel closed, worker stopping");
                        break;
                    };
                    let Ok(permit) = semaphore.clone().acquire_owned().await else {
                        break;
                    };
                    let worker = worker.clone();
                    tokio::spawn(async move {
                        worker.process(&job_id).await;
                        drop(permit);
                    });
                }
            }
        }
    }

    async fn process(&self, job_id: &str) {
        if let Err(e) = self.execute(job_id).await {
            tracing::error!(job_id = %job_id, error = %e, "Failed to update print job");
        }
    }

    /// 执行单个打印任务
    async fn execute(&self, job_id: &str) -> Result<(), crate::db::repository::RepoError> {
        let Some(job) = print_job::find_by_id(&self.pool, job_id).await? else {
            tracing::warn!(job_id = %job_id, "Queued print job vanished");
            return Ok(());
        };

        // Load the record fresh: it may have changed since submission
        let Some(record) = item::find_by_id(&self.pool, &job.item_id).await? else {
            let reason = format!("Item {} not found", job.item_id);
            tracing::warn!(job_id = %job_id, item_id = %job.item_id, "Print job failed: item missing");
            print_job::mark_failed(&self.pool, job_id, None, None, None, None, &reason).await?;
            return Ok(());
        };

        let size_mm = job.size.dimensions_mm();
        let content = LabelContent {
            short_id: record.short_id.clone(),
            title: Some(record.title.clone()).filter(|t| !t.is_empty()),
            location: record.location.clone(),
            description: Some(record.description.clone()).filter(|d| !d.is_empty()),
        };
        let document = self.labels_dir.join(label_filename(&record.id, size_mm));

        if let Err(e) =
            self.renderer
                .render_to_pdf(&content, size_mm, &self.public_base_url, &document)
        {
            let reason = format!("Label render failed: {e}");
            tracing::error!(job_id = %job_id, error = %e, "Print job failed during render");
            print_job::mark_failed(&self.pool, job_id, None, None, None, None, &reason).await?;
            return Ok(());
        }

        match self.executor.spool(size_mm, job.copies, &document).await {
            Ok(out) if out.success() => {
                print_job::mark_completed(
                    &self.pool,
                    job_id,
                    &out.command,
                    out.exit_code,
                    &out.stdout,
                    &out.stderr,
                )
                .await?;
                tracing::info!(job_id = %job_id, item_id = %record.id, "Print job completed");
            }
            Ok(out) => {
                // Intentionally verbose: operators need the full picture
                let reason = format!(
                    "Print command exited with {:?}: command={} stdout={} stderr={}",
                    out.exit_code, out.command, out.stdout, out.stderr
                );
                print_job::mark_failed(
                    &self.pool,
                    job_id,
                    Some(&out.command),
                    out.exit_code,
                    Some(&out.stdout),
                    Some(&out.stderr),
                    &reason,
                )
                .await?;
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::error!(job_id = %job_id, error = %reason, "Spool command could not be started");
                print_job::mark_failed(&self.pool, job_id, None, None, None, None, &reason).await?;
            }
        }

        Ok(())
    }
}
