//! Print Job API Handlers

use axum::extract::{Path, State};
use axum::Json;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::PrintJob;

/// GET /api/print-jobs/:id - 查询打印任务状态
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PrintJob>> {
    let job = state
        .print_service
        .get_job(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Print job {id} not found")))?;
    Ok(Json(job))
}
