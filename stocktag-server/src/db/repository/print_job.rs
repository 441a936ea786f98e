//! Print Job Repository
//!
//! The print_jobs table doubles as the durable job queue: rows inserted as
//! `queued` survive restarts and are re-enqueued by the worker at startup.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult};
use shared::models::{LabelSize, PrintJob, PrintJobStatus};
use shared::util::now_millis;

#[derive(sqlx::FromRow)]
struct PrintJobRow {
    id: String,
    item_id: String,
    size: String,
    copies: i64,
    status: String,
    command: Option<String>,
    exit_code: Option<i64>,
    stdout: Option<String>,
    stderr: Option<String>,
    error: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl From<PrintJobRow> for PrintJob {
    fn from(row: PrintJobRow) -> Self {
        PrintJob {
            id: row.id,
            item_id: row.item_id,
            size: LabelSize::parse(&row.size).unwrap_or_default(),
            copies: row.copies.max(1) as u32,
            status: PrintJobStatus::parse(&row.status).unwrap_or(PrintJobStatus::Queued),
            command: row.command,
            exit_code: row.exit_code,
            stdout: row.stdout,
            stderr: row.stderr,
            error: row.error,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str =
    "id, item_id, size, copies, status, command, exit_code, stdout, stderr, error, \
     created_at, updated_at";

/// Insert a queued job
pub async fn create(
    pool: &SqlitePool,
    item_id: &str,
    size: LabelSize,
    copies: u32,
) -> RepoResult<PrintJob> {
    let id = Uuid::new_v4().to_string();
    let now = now_millis();

    sqlx::query(
        "INSERT INTO print_jobs (id, item_id, size, copies, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(item_id)
    .bind(size.as_str())
    .bind(copies as i64)
    .bind(PrintJobStatus::Queued.as_str())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Insert readback failed".to_string()))
}

/// Find a job by id
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<PrintJob>> {
    let row: Option<PrintJobRow> = sqlx::query_as(&format!(
        "SELECT {SELECT_COLUMNS} FROM print_jobs WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(PrintJob::from))
}

/// Ids of jobs still queued, oldest first (startup re-enqueue)
pub async fn find_queued_ids(pool: &SqlitePool) -> RepoResult<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        "SELECT id FROM print_jobs WHERE status = ? ORDER BY created_at",
    )
    .bind(PrintJobStatus::Queued.as_str())
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// Mark a job completed, keeping the captured spooler output
pub async fn mark_completed(
    pool: &SqlitePool,
    id: &str,
    command: &str,
    exit_code: Option<i64>,
    stdout: &str,
    stderr: &str,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE print_jobs SET status = ?, command = ?, exit_code = ?, stdout = ?, stderr = ?, \
         updated_at = ? WHERE id = ?",
    )
    .bind(PrintJobStatus::Completed.as_str())
    .bind(command)
    .bind(exit_code)
    .bind(stdout)
    .bind(stderr)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Mark a job failed with full diagnostics
pub async fn mark_failed(
    pool: &SqlitePool,
    id: &str,
    command: Option<&str>,
    exit_code: Option<i64>,
    stdout: Option<&str>,
    stderr: Option<&str>,
    error: &str,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE print_jobs SET status = ?, command = ?, exit_code = ?, stdout = ?, stderr = ?, \
         error = ?, updated_at = ? WHERE id = ?",
    )
    .bind(PrintJobStatus::Failed.as_str())
    .bind(command)
    .bind(exit_code)
    .bind(stdout)
    .bind(stderr)
    .bind(error)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}
