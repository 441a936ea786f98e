//! Item API Handlers

use std::io::Cursor;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use image::codecs::jpeg::JpegEncoder;
use serde::Deserialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::{item, item_image};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Item, ItemCreate, ItemCreateResponse, ItemImage, ItemUpdate, LabelSize, PrintRequest,
    PrintResponse,
};
use stocktag_label::{encode_qr, public_url};

/// Maximum upload size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported upload formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for stored item photos
const JPEG_QUALITY: u8 = 85;

/// Copy count upper bound per print request
const MAX_COPIES: u32 = 20;

/// QR module scale for the standalone qr.png endpoint
const QR_PNG_SCALE: u32 = 8;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

/// GET /api/items - 获取所有资产记录 (可选搜索)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = item::find_all(&state.pool, query.search.as_deref()).await?;
    Ok(Json(items))
}

/// POST /api/items - 创建记录并返回建议
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ItemCreate>,
) -> AppResult<Json<ItemCreateResponse>> {
    let text_hint = payload.text_hint.clone();
    let created = item::create(&state.pool, payload).await?;
    let suggestions = state.suggestions.describe(None, text_hint.as_deref());

    tracing::info!(item_id = %created.id, short_id = %created.short_id, "Item created");
    Ok(Json(ItemCreateResponse {
        item: created,
        suggestions,
    }))
}

/// GET /api/items/:id - 获取单条记录
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Item>> {
    let record = item::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
    Ok(Json(record))
}

/// PUT /api/items/:id - 更新记录 (缺省字段保持不变)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ItemUpdate>,
) -> AppResult<Json<Item>> {
    let record = item::update(&state.pool, &id, payload).await?;
    Ok(Json(record))
}

/// DELETE /api/items/:id - 删除记录及其图片
pub async fn delete_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let deleted = item::delete(&state.pool, &id).await?;

    if deleted {
        // Image rows cascade with the record; the files go with them
        let media_dir = state.config.items_media_dir().join(&id);
        if media_dir.exists() {
            if let Err(e) = std::fs::remove_dir_all(&media_dir) {
                tracing::warn!(item_id = %id, error = %e, "Failed to remove item media dir");
            }
        }
        tracing::info!(item_id = %id, "Item deleted");
    }

    Ok(Json(deleted))
}

/// POST /api/items/:id/images - 上传图片 (multipart)
pub async fn upload_image(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<Vec<ItemImage>>> {
    let record = item::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;

    let mut stored = false;
    while let Some(field) = multipart.next_field().await? {
        let Some(original_name) = field.file_name().map(|n| n.to_string()) else {
            continue;
        };
        let data = field.bytes().await?;

        validate_image(&data, &original_name)?;

        // Normalize to JPEG (smaller, uniform format for the public page)
        let img = image::load_from_memory(&data)
            .map_err(|e| AppError::validation(format!("Invalid image: {e}")))?;
        let mut buffer = Vec::new();
        {
            let mut cursor = Cursor::new(&mut buffer);
            let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
            img.to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
        }

        let filename = format!("{}.jpg", Uuid::new_v4());
        let dir = state.config.items_media_dir().join(&record.id);
        std::fs::create_dir_all(&dir)
            .map_err(|e| AppError::internal(format!("Failed to create media dir: {e}")))?;
        std::fs::write(dir.join(&filename), &buffer)
            .map_err(|e| AppError::internal(format!("Failed to store image: {e}")))?;

        let relative = format!("items/{}/{}", record.id, filename);
        item_image::add(&state.pool, &record.id, &relative).await?;
        tracing::info!(item_id = %record.id, path = %relative, "Image attached");
        stored = true;
        break;
    }

    if !stored {
        return Err(AppError::validation("Missing image file field"));
    }

    let images = item_image::find_for_item(&state.pool, &record.id).await?;
    Ok(Json(images))
}

/// GET /api/items/:id/qr.png - 记录二维码
pub async fn qr_png(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let record = item::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;

    let url = public_url(&state.public_base_url(), &record.short_id);
    let qr = encode_qr(&url, QR_PNG_SCALE, 2)?;

    let mut buffer = Vec::new();
    image::DynamicImage::ImageRgb8(qr)
        .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .map_err(|e| AppError::internal(format!("Failed to encode PNG: {e}")))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], buffer))
}

/// POST /api/items/:id/print - 提交打印任务
pub async fn print_label(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(request): Json<PrintRequest>,
) -> AppResult<Json<PrintResponse>> {
    let size = match request.size.as_deref() {
        None => LabelSize::default(),
        Some(raw) => LabelSize::parse(raw).ok_or_else(|| {
            AppError::validation(format!(
                "Unknown label size '{raw}', expected one of 50x30, 40x30, 62x30"
            ))
        })?,
    };

    let copies = request.copies.unwrap_or(1);
    if !(1..=MAX_COPIES).contains(&copies) {
        return Err(AppError::validation(format!(
            "copies must be between 1 and {MAX_COPIES}"
        )));
    }

    let job = state.print_service.submit(&id, size, copies).await?;
    Ok(Json(PrintResponse {
        status: "queued".to_string(),
        job_id: job.id,
    }))
}

fn validate_image(data: &[u8], original_name: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            MAX_FILE_SIZE,
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext = std::path::Path::new(original_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    Ok(())
}
