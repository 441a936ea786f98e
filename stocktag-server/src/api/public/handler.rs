//! Public Lookup Handlers

use axum::extract::{Path, State};
use axum::Json;

use crate::core::ServerState;
use crate::db::repository::item;
use crate::utils::{AppError, AppResult};
use shared::models::ItemPublic;

/// GET /i/:short_id - 扫码公共页面
///
/// The first attached image (by creation time) acts as the primary image.
pub async fn lookup(
    State(state): State<ServerState>,
    Path(short_id): Path<String>,
) -> AppResult<Json<ItemPublic>> {
    let record = item::find_by_short_id(&state.pool, &short_id)
        .await?
        .ok_or_else(|| AppError::not_found("Item not found"))?;

    let primary_image = record
        .images
        .first()
        .map(|img| format!("{}/media/{}", state.public_base_url(), img.path));

    Ok(Json(ItemPublic {
        short_id: record.short_id,
        title: record.title,
        description: record.description,
        tags: record.tags,
        location: record.location,
        status: record.status,
        primary_image,
    }))
}
