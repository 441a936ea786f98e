//! Item Image Repository

use sqlx::SqlitePool;
use uuid::Uuid;

use super::RepoResult;
use shared::models::ItemImage;
use shared::util::now_millis;

/// Attach an image record to an item
pub async fn add(pool: &SqlitePool, item_id: &str, path: &str) -> RepoResult<ItemImage> {
    let image = ItemImage {
        id: Uuid::new_v4().to_string(),
        item_id: item_id.to_string(),
        path: path.to_string(),
        created_at: now_millis(),
    };

    sqlx::query("INSERT INTO item_images (id, item_id, path, created_at) VALUES (?, ?, ?, ?)")
        .bind(&image.id)
        .bind(&image.item_id)
        .bind(&image.path)
        .bind(image.created_at)
        .execute(pool)
        .await?;

    Ok(image)
}

/// All images for an item, attachment order (creation time, then id for ties)
pub async fn find_for_item(pool: &SqlitePool, item_id: &str) -> RepoResult<Vec<ItemImage>> {
    let images = sqlx::query_as::<_, ItemImage>(
        "SELECT id, item_id, path, created_at FROM item_images \
         WHERE item_id = ? ORDER BY created_at, id",
    )
    .bind(item_id)
    .fetch_all(pool)
    .await?;
    Ok(images)
}

/// The first attached image acts as the item's primary image
pub async fn find_primary(pool: &SqlitePool, item_id: &str) -> RepoResult<Option<ItemImage>> {
    let image = sqlx::query_as::<_, ItemImage>(
        "SELECT id, item_id, path, created_at FROM item_images \
         WHERE item_id = ? ORDER BY created_at, id LIMIT 1",
    )
    .bind(item_id)
    .fetch_optional(pool)
    .await?;
    Ok(image)
}
